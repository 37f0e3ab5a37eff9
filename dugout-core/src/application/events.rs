use crate::application::{GatewayRequest, RequestTicket};
use crate::domain::{Operation, PlayerId};
use serde::{Deserialize, Serialize};

/// Which gateway call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    LoadFailed,
    GenerateFailed,
    SaveFailed,
}

impl From<Operation> for FailureKind {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Load => FailureKind::LoadFailed,
            Operation::Generate => FailureKind::GenerateFailed,
            Operation::Save => FailureKind::SaveFailed,
        }
    }
}

/// Events emitted by the lifecycle manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DescriptionEvent {
    /// A player became active; its state was reset
    Activated { player_id: PlayerId, epoch: u64 },

    /// The detail view was closed
    Deactivated { player_id: PlayerId },

    /// The runtime must perform this gateway call
    RequestIssued(GatewayRequest),

    /// Stored description arrived (may be empty)
    Loaded { player_id: PlayerId, text: String },

    /// Generated description arrived and is stored server-side
    Generated { player_id: PlayerId, text: String },

    /// User edit applied
    Edited { player_id: PlayerId, dirty: bool },

    /// Edited text was persisted
    Saved { player_id: PlayerId },

    /// New statistics merged into the active record
    Reconciled {
        player_id: PlayerId,
        description_replaced: bool,
    },

    /// A gateway call failed; the state is now `Error`
    Failed {
        player_id: PlayerId,
        kind: FailureKind,
        message: String,
    },

    /// Error acknowledged, back to idle
    ErrorDismissed { player_id: PlayerId },

    /// Reply for an activation that is no longer current
    StaleReplyDiscarded {
        ticket: RequestTicket,
        operation: Operation,
    },

    /// Command rejected; nothing changed
    Rejected { command: String, reason: String },
}

impl DescriptionEvent {
    pub fn request(&self) -> Option<&GatewayRequest> {
        match self {
            DescriptionEvent::RequestIssued(request) => Some(request),
            _ => None,
        }
    }
}
