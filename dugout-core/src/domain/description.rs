use crate::domain::PlayerId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the description text currently has its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    None,
    Loaded,
    Generated,
    Edited,
}

/// Async phase of the description of the active player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Generating,
    Saving,
    Error,
}

impl Phase {
    /// A gateway call is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Phase::Loading | Phase::Generating | Phase::Saving)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Loading => write!(f, "loading"),
            Phase::Generating => write!(f, "generating"),
            Phase::Saving => write!(f, "saving"),
            Phase::Error => write!(f, "error"),
        }
    }
}

/// The three gateway operations a description can be waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Load,
    Generate,
    Save,
}

impl Operation {
    pub fn phase(&self) -> Phase {
        match self {
            Operation::Load => Phase::Loading,
            Operation::Generate => Phase::Generating,
            Operation::Save => Phase::Saving,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "load"),
            Operation::Generate => write!(f, "generate"),
            Operation::Save => write!(f, "save"),
        }
    }
}

/// Snapshot of the description of one player
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DescriptionState {
    pub text: String,
    pub origin: Origin,
    pub dirty: bool,
    pub phase: Phase,
    pub last_error: Option<String>,
}

impl DescriptionState {
    /// Text can be edited right now
    pub fn is_editable(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_in_flight()
    }
}

/// Invalid store transitions
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Expected phase {expected}, found {actual}")]
    UnexpectedPhase { expected: Phase, actual: Phase },

    #[error("A {0} is already in flight")]
    AlreadyInFlight(Phase),

    #[error("No player is active")]
    NoActivePlayer,
}

/// Holds the description of the active player. No I/O.
///
/// Every transition that is invalid for the current phase returns a
/// [`StoreError`] and leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct DescriptionStore {
    player_id: Option<PlayerId>,
    state: DescriptionState,
    /// Last text known to be stored server-side
    persisted: String,
}

impl DescriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id
    }

    pub fn state(&self) -> &DescriptionState {
        &self.state
    }

    pub fn persisted(&self) -> &str {
        &self.persisted
    }

    /// Start tracking `player_id` from a blank state
    pub fn reset(&mut self, player_id: PlayerId) {
        self.player_id = Some(player_id);
        self.state = DescriptionState::default();
        self.persisted.clear();
    }

    /// Stop tracking any player
    pub fn clear(&mut self) {
        self.player_id = None;
        self.state = DescriptionState::default();
        self.persisted.clear();
    }

    /// Enter the phase of `operation`. Allowed from `Idle` and `Error`.
    pub fn begin(&mut self, operation: Operation) -> Result<(), StoreError> {
        if self.player_id.is_none() {
            return Err(StoreError::NoActivePlayer);
        }
        if self.state.phase.is_in_flight() {
            return Err(StoreError::AlreadyInFlight(self.state.phase));
        }
        self.state.phase = operation.phase();
        self.state.last_error = None;
        Ok(())
    }

    /// User edit. Dirty only while the text differs from the stored one.
    pub fn set_text(&mut self, text: String) {
        self.state.dirty = text != self.persisted;
        self.state.text = text;
        self.state.origin = Origin::Edited;
    }

    pub fn apply_loaded(&mut self, text: String) -> Result<(), StoreError> {
        self.expect_phase(Phase::Loading)?;
        // An empty load leaves nothing to attribute
        self.state.origin = if text.trim().is_empty() {
            Origin::None
        } else {
            Origin::Loaded
        };
        self.persisted = text.clone();
        self.state.text = text;
        self.state.dirty = false;
        self.state.phase = Phase::Idle;
        Ok(())
    }

    pub fn apply_generated(&mut self, text: String) -> Result<(), StoreError> {
        self.expect_phase(Phase::Generating)?;
        self.persisted = text.clone();
        self.state.text = text;
        self.state.origin = Origin::Generated;
        self.state.dirty = false;
        self.state.phase = Phase::Idle;
        Ok(())
    }

    pub fn mark_saved(&mut self) -> Result<(), StoreError> {
        self.expect_phase(Phase::Saving)?;
        self.persisted = self.state.text.clone();
        self.state.dirty = false;
        self.state.phase = Phase::Idle;
        Ok(())
    }

    /// Description the server returned alongside a stat update
    pub fn apply_merged(&mut self, text: String) -> Result<(), StoreError> {
        if self.state.phase.is_in_flight() {
            return Err(StoreError::AlreadyInFlight(self.state.phase));
        }
        self.persisted = text.clone();
        self.state.text = text;
        self.state.origin = Origin::Loaded;
        self.state.dirty = false;
        self.state.phase = Phase::Idle;
        self.state.last_error = None;
        Ok(())
    }

    /// Text and dirty flag are kept so a failed save loses nothing
    pub fn fail(&mut self, message: String) {
        self.state.phase = Phase::Error;
        self.state.last_error = Some(message);
    }

    pub fn dismiss_error(&mut self) -> Result<(), StoreError> {
        self.expect_phase(Phase::Error)?;
        self.state.phase = Phase::Idle;
        self.state.last_error = None;
        Ok(())
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), StoreError> {
        if self.state.phase != expected {
            return Err(StoreError::UnexpectedPhase {
                expected,
                actual: self.state.phase,
            });
        }
        Ok(())
    }
}
