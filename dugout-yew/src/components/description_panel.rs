use crate::hooks::use_description;
use dugout_core::{DescriptionState, Phase};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

/// What the description panel shows for a given state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelControls {
    /// Textarea accepts input
    pub editable: bool,
    pub show_regenerate: bool,
    pub show_save: bool,
    pub save_disabled: bool,
    /// Progress label, if an operation is running
    pub status: Option<&'static str>,
    pub error: Option<String>,
}

impl PanelControls {
    pub fn for_state(state: &DescriptionState) -> Self {
        let status = match state.phase {
            Phase::Loading => Some("Loading description..."),
            Phase::Generating => Some("Generating description..."),
            Phase::Saving => Some("Saving..."),
            Phase::Idle | Phase::Error => None,
        };

        Self {
            editable: state.is_editable(),
            show_regenerate: !matches!(state.phase, Phase::Loading | Phase::Generating),
            show_save: state.dirty,
            save_disabled: state.phase == Phase::Saving,
            status,
            error: match state.phase {
                Phase::Error => state.last_error.clone(),
                _ => None,
            },
        }
    }
}

/// Description of the active player with edit, regenerate and save
#[function_component(DescriptionPanel)]
pub fn description_panel() -> Html {
    let description = use_description();
    let controls = PanelControls::for_state(&description.state);

    let on_input = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.edit(input.value());
        })
    };

    let on_regenerate = {
        let description = description.clone();
        Callback::from(move |_: MouseEvent| description.regenerate())
    };

    let on_save = {
        let description = description.clone();
        Callback::from(move |_: MouseEvent| description.save())
    };

    let on_retry = {
        let description = description.clone();
        Callback::from(move |_: MouseEvent| description.retry())
    };

    let on_dismiss = {
        let description = description.clone();
        Callback::from(move |_: MouseEvent| description.dismiss_error())
    };

    if description.active_player.is_none() {
        return html! {};
    }

    html! {
        <div class="dugout-description">
            <div class="dugout-description__header">
                <h3 class="dugout-description__title">{"Description"}</h3>
                if controls.show_regenerate {
                    <button
                        class="dugout-description__regenerate"
                        onclick={on_regenerate}
                        disabled={description.state.is_busy()}
                    >
                        {"Regenerate"}
                    </button>
                }
            </div>

            if let Some(status) = controls.status {
                <p class="dugout-description__status">{status}</p>
            }

            <textarea
                class="dugout-description__text"
                value={description.state.text.clone()}
                oninput={on_input}
                readonly={!controls.editable}
                rows="6"
            />

            if controls.show_save {
                <button
                    class="dugout-description__save"
                    onclick={on_save}
                    disabled={controls.save_disabled}
                >
                    {if controls.save_disabled { "Saving..." } else { "Save" }}
                </button>
            }

            if let Some(error) = controls.error {
                <div class="dugout-description__error">
                    <span class="dugout-description__error-text">{error}</span>
                    <button class="dugout-description__retry" onclick={on_retry}>
                        {"Retry"}
                    </button>
                    <button class="dugout-description__dismiss" onclick={on_dismiss}>
                        {"Dismiss"}
                    </button>
                </div>
            }
        </div>
    }
}
