use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side identity of a player
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        PlayerId(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        PlayerId(id)
    }
}

/// A player as returned by `GET/PUT /players/{id}`
///
/// Counting stats default to zero and rate stats to `None` when the server
/// omits them. Timestamps and other unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub games: u32,
    #[serde(default)]
    pub at_bat: u32,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub hits: u32,
    #[serde(default)]
    pub double_2b: u32,
    /// Triples. The wire name is historical.
    #[serde(default)]
    pub third_baseman: u32,
    #[serde(default)]
    pub home_runs: u32,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub walks: u32,
    #[serde(default)]
    pub strikeouts: u32,
    #[serde(default)]
    pub stolen_bases: u32,
    #[serde(default)]
    pub caught_stealing: u32,

    #[serde(default)]
    pub batting_average: Option<f64>,
    #[serde(default)]
    pub on_base_percentage: Option<f64>,
    #[serde(default)]
    pub slugging_percentage: Option<f64>,
    #[serde(default)]
    pub on_base_plus_slugging: Option<f64>,

    /// Stored description, if the server sent one
    #[serde(default)]
    pub description: Option<String>,
}

/// Errors raised while building a stat update
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlayerError {
    #[error("Player name cannot be empty")]
    EmptyName,
}

impl PlayerRecord {
    /// Minimal record with zeroed stats
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        PlayerRecord {
            id: id.into(),
            name: name.into(),
            position: None,
            age: None,
            games: 0,
            at_bat: 0,
            runs: 0,
            hits: 0,
            double_2b: 0,
            third_baseman: 0,
            home_runs: 0,
            rbi: 0,
            walks: 0,
            strikeouts: 0,
            stolen_bases: 0,
            caught_stealing: 0,
            batting_average: None,
            on_base_percentage: None,
            slugging_percentage: None,
            on_base_plus_slugging: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Hits per game rounded to three decimals, `0.0` without games
    pub fn hits_per_game(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let raw = f64::from(self.hits) / f64::from(self.games);
        (raw * 1000.0).round() / 1000.0
    }

    /// The description the record carries, if it is non-blank
    pub fn carried_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Copy statistics from `other`, keeping identity and description
    pub fn merge_stats(&mut self, other: &PlayerRecord) {
        let description = self.description.take();
        *self = PlayerRecord {
            description,
            ..other.clone()
        };
    }
}

/// Body of the stat edit `PUT /players/{id}`
///
/// Never carries a description: description edits go through the
/// description endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerUpdate {
    pub name: String,
    pub position: Option<String>,
    pub games: u32,
    pub at_bat: u32,
    pub runs: u32,
    pub hits: u32,
    pub double_2b: u32,
    pub third_baseman: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub stolen_bases: u32,
    pub caught_stealing: u32,
    pub batting_average: f64,
    pub on_base_percentage: f64,
    pub slugging_percentage: f64,
    pub on_base_plus_slugging: f64,
}

impl PlayerUpdate {
    /// Seed an update form from a record. Missing rates become `0.0`.
    pub fn from_record(record: &PlayerRecord) -> Self {
        PlayerUpdate {
            name: record.name.clone(),
            position: record.position.clone(),
            games: record.games,
            at_bat: record.at_bat,
            runs: record.runs,
            hits: record.hits,
            double_2b: record.double_2b,
            third_baseman: record.third_baseman,
            home_runs: record.home_runs,
            rbi: record.rbi,
            walks: record.walks,
            strikeouts: record.strikeouts,
            stolen_bases: record.stolen_bases,
            caught_stealing: record.caught_stealing,
            batting_average: record.batting_average.unwrap_or(0.0),
            on_base_percentage: record.on_base_percentage.unwrap_or(0.0),
            slugging_percentage: record.slugging_percentage.unwrap_or(0.0),
            on_base_plus_slugging: record.on_base_plus_slugging.unwrap_or(0.0),
        }
    }

    pub fn validate(&self) -> Result<(), PlayerError> {
        if self.name.trim().is_empty() {
            return Err(PlayerError::EmptyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_per_game() {
        let mut record = PlayerRecord::new(1, "Ichiro Suzuki");
        assert_eq!(record.hits_per_game(), 0.0);

        record.games = 161;
        record.hits = 262;
        assert_eq!(record.hits_per_game(), 1.627);
    }

    #[test]
    fn test_deserialize_server_payload() {
        let json = r#"{
            "id": 7,
            "name": "Tony Gwynn",
            "position": "RF",
            "games": 110,
            "hits": 165,
            "batting_average": 0.394,
            "on_base_percentage": null,
            "hits_per_game": 1.5,
            "description": null,
            "created_at": "2024-01-01T00:00:00",
            "updated_at": null
        }"#;

        let record: PlayerRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, PlayerId::new(7));
        assert_eq!(record.position.as_deref(), Some("RF"));
        assert_eq!(record.runs, 0);
        assert_eq!(record.batting_average, Some(0.394));
        assert_eq!(record.on_base_percentage, None);
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_carried_description_ignores_blank() {
        let record = PlayerRecord::new(1, "A").with_description("   ");
        assert_eq!(record.carried_description(), None);

        let record = PlayerRecord::new(1, "A").with_description("Slugger");
        assert_eq!(record.carried_description(), Some("Slugger"));
    }

    #[test]
    fn test_merge_stats_keeps_description() {
        let mut current = PlayerRecord::new(3, "Old Name").with_description("kept");
        let mut updated = PlayerRecord::new(3, "New Name");
        updated.home_runs = 40;

        current.merge_stats(&updated);

        assert_eq!(current.name, "New Name");
        assert_eq!(current.home_runs, 40);
        assert_eq!(current.description.as_deref(), Some("kept"));
    }

    #[test]
    fn test_update_from_record_has_no_description() {
        let mut record = PlayerRecord::new(9, "Rickey Henderson").with_description("fast");
        record.stolen_bases = 130;

        let update = PlayerUpdate::from_record(&record);
        let json = serde_json::to_value(&update).unwrap();

        assert_eq!(json["stolen_bases"], 130);
        assert_eq!(json["batting_average"], 0.0);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_update_validation() {
        let mut update = PlayerUpdate::from_record(&PlayerRecord::new(1, "A"));
        assert!(update.validate().is_ok());

        update.name = "  ".to_string();
        assert_eq!(update.validate(), Err(PlayerError::EmptyName));
    }

    #[test]
    fn test_record_schema_lists_wire_fields() {
        let schema = schemars::schema_for!(PlayerRecord);
        let json = serde_json::to_value(&schema).unwrap();
        let properties = &json["properties"];

        assert!(properties.get("third_baseman").is_some());
        assert!(properties.get("description").is_some());
    }
}
