use crate::hooks::use_description;
use dugout_core::{PlayerError, PlayerRecord, PlayerUpdate};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Errors raised while reading the stat form
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StatFormError {
    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// Editable fields, kept as typed text until submitted
#[derive(Debug, Clone, PartialEq, Default)]
struct StatForm {
    name: String,
    games: String,
    hits: String,
    home_runs: String,
    rbi: String,
    batting_average: String,
}

impl StatForm {
    fn from_record(record: &PlayerRecord) -> Self {
        Self {
            name: record.name.clone(),
            games: record.games.to_string(),
            hits: record.hits.to_string(),
            home_runs: record.home_runs.to_string(),
            rbi: record.rbi.to_string(),
            batting_average: record
                .batting_average
                .map(|avg| format!("{:.3}", avg))
                .unwrap_or_default(),
        }
    }

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "games" => Some(&mut self.games),
            "hits" => Some(&mut self.hits),
            "home_runs" => Some(&mut self.home_runs),
            "rbi" => Some(&mut self.rbi),
            "batting_average" => Some(&mut self.batting_average),
            _ => None,
        }
    }

    /// Fields not on the form are carried over from `record`
    fn to_update(&self, record: &PlayerRecord) -> Result<PlayerUpdate, StatFormError> {
        let mut update = PlayerUpdate::from_record(record);
        update.name = self.name.trim().to_string();
        update.games = parse_count("games", &self.games)?;
        update.hits = parse_count("hits", &self.hits)?;
        update.home_runs = parse_count("home_runs", &self.home_runs)?;
        update.rbi = parse_count("rbi", &self.rbi)?;
        update.batting_average = parse_rate("batting_average", &self.batting_average)?;
        update.validate()?;
        Ok(update)
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, StatFormError> {
    value
        .trim()
        .parse()
        .map_err(|_| StatFormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Blank rates are sent as zero
fn parse_rate(field: &'static str, value: &str) -> Result<f64, StatFormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    value.parse().map_err(|_| StatFormError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Stat edit form of the active player
#[function_component(StatEditor)]
pub fn stat_editor() -> Html {
    let description = use_description();
    let form = use_state(StatForm::default);
    let form_error = use_state(|| None::<String>);

    {
        let form = form.clone();
        let form_error = form_error.clone();
        use_effect_with(description.active_player.clone(), move |player| {
            if let Some(player) = player {
                form.set(StatForm::from_record(player));
            }
            form_error.set(None);
            || ()
        });
    }

    let Some(player) = description.active_player.clone() else {
        return html! {};
    };

    let on_field = |field: &'static str| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            if let Some(slot) = next.field_mut(field) {
                *slot = input.value();
            }
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let form_error = form_error.clone();
        let description = description.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.to_update(&player) {
                Ok(update) => {
                    form_error.set(None);
                    (description.update_stats)(update);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Stat form rejected");
                    form_error.set(Some(err.to_string()));
                }
            }
        })
    };

    let row = |label: &'static str, field: &'static str, value: &str| {
        html! {
            <label class="dugout-stats__row">
                <span class="dugout-stats__label">{label}</span>
                <input
                    class="dugout-stats__input"
                    value={value.to_string()}
                    oninput={on_field(field)}
                />
            </label>
        }
    };

    let error = (*form_error).clone().or_else(|| description.player_error.clone());

    html! {
        <form class="dugout-stats" onsubmit={on_submit}>
            {row("Name", "name", &form.name)}
            {row("Games", "games", &form.games)}
            {row("Hits", "hits", &form.hits)}
            {row("Home runs", "home_runs", &form.home_runs)}
            {row("RBI", "rbi", &form.rbi)}
            {row("AVG", "batting_average", &form.batting_average)}
            if let Some(error) = error {
                <p class="dugout-stats__error">{error}</p>
            }
            <button class="dugout-stats__save" type="submit">{"Save stats"}</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlayerRecord {
        let mut record = PlayerRecord::new(7, "Mickey Mantle");
        record.games = 144;
        record.hits = 188;
        record.walks = 112;
        record.batting_average = Some(0.353);
        record
    }

    #[test]
    fn test_form_round_trips_record() {
        let record = record();
        let form = StatForm::from_record(&record);
        assert_eq!(form.batting_average, "0.353");

        let update = form.to_update(&record).unwrap();
        assert_eq!(update, PlayerUpdate::from_record(&record));
    }

    #[test]
    fn test_edited_fields_override_record() {
        let record = record();
        let mut form = StatForm::from_record(&record);
        *form.field_mut("home_runs").unwrap() = " 52 ".to_string();
        form.batting_average.clear();

        let update = form.to_update(&record).unwrap();
        assert_eq!(update.home_runs, 52);
        assert_eq!(update.batting_average, 0.0);
        assert_eq!(update.walks, 112);
    }

    #[test]
    fn test_invalid_number() {
        let record = record();
        let mut form = StatForm::from_record(&record);
        form.hits = "lots".to_string();

        assert_eq!(
            form.to_update(&record),
            Err(StatFormError::InvalidNumber {
                field: "hits",
                value: "lots".to_string()
            })
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let record = record();
        let mut form = StatForm::from_record(&record);
        form.name = "   ".to_string();

        assert_eq!(
            form.to_update(&record),
            Err(StatFormError::Player(PlayerError::EmptyName))
        );
    }
}
