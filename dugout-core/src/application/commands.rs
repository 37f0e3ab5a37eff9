use crate::domain::{Operation, Phase, PlayerId, PlayerRecord, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity a gateway request was issued for
///
/// The epoch increases on every activation, so a reply is only applied if
/// both the player and the activation it was issued for are still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub player_id: PlayerId,
    pub epoch: u64,
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {} (epoch {})", self.player_id, self.epoch)
    }
}

/// Remote call the runtime must perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayCall {
    Load,
    /// `automatic` is true when fired by the first empty load
    Generate { automatic: bool },
    Save { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRequest {
    pub ticket: RequestTicket,
    pub call: GatewayCall,
}

impl GatewayRequest {
    pub fn operation(&self) -> Operation {
        match self.call {
            GatewayCall::Load => Operation::Load,
            GatewayCall::Generate { .. } => Operation::Generate,
            GatewayCall::Save { .. } => Operation::Save,
        }
    }

    /// Build the reply for this request from the gateway outcome
    pub fn reply(&self, outcome: Result<String, String>) -> GatewayReply {
        GatewayReply {
            ticket: self.ticket,
            operation: self.operation(),
            outcome,
        }
    }
}

/// Completion of a [`GatewayRequest`]. Errors are already display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReply {
    pub ticket: RequestTicket,
    pub operation: Operation,
    pub outcome: Result<String, String>,
}

/// Inputs of the description lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DescriptionCommand {
    /// Open the detail view of a player
    Activate { player: PlayerRecord },

    /// Close the detail view
    Deactivate,

    /// User typed into the description
    EditRequested { text: String },

    /// User asked for a fresh description, discarding edits
    RegenerateRequested,

    /// User asked to persist the edited text
    SaveRequested,

    /// Load the stored description again
    RetryLoad,

    /// Acknowledge an error without retrying
    DismissError,

    /// The stat edit form stored new statistics for the player
    ReconcileStatUpdate { record: PlayerRecord },

    /// A gateway call finished
    GatewayReplied(GatewayReply),
}

impl DescriptionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DescriptionCommand::Activate { .. } => "Activate",
            DescriptionCommand::Deactivate => "Deactivate",
            DescriptionCommand::EditRequested { .. } => "EditRequested",
            DescriptionCommand::RegenerateRequested => "RegenerateRequested",
            DescriptionCommand::SaveRequested => "SaveRequested",
            DescriptionCommand::RetryLoad => "RetryLoad",
            DescriptionCommand::DismissError => "DismissError",
            DescriptionCommand::ReconcileStatUpdate { .. } => "ReconcileStatUpdate",
            DescriptionCommand::GatewayReplied(_) => "GatewayReplied",
        }
    }
}

/// Reasons a command is rejected without touching state
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("No player is active")]
    NoActivePlayer,

    #[error("Cannot start a request while {0} is in flight")]
    InFlight(Phase),

    #[error("Description is not editable while {0}")]
    NotEditable(Phase),

    #[error("No unsaved changes")]
    NothingToSave,

    #[error("Record for player {actual} does not match active player {expected}")]
    WrongPlayer { expected: PlayerId, actual: PlayerId },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(DescriptionCommand::SaveRequested.name(), "SaveRequested");
        assert_eq!(
            DescriptionCommand::EditRequested {
                text: "x".to_string()
            }
            .name(),
            "EditRequested"
        );
    }

    #[test]
    fn test_request_reply_carries_ticket() {
        let request = GatewayRequest {
            ticket: RequestTicket {
                player_id: PlayerId::new(4),
                epoch: 2,
            },
            call: GatewayCall::Save {
                text: "x".to_string(),
            },
        };

        let reply = request.reply(Err("offline".to_string()));

        assert_eq!(reply.ticket, request.ticket);
        assert_eq!(reply.operation, Operation::Save);
        assert_eq!(reply.outcome, Err("offline".to_string()));
    }

    #[test]
    fn test_command_serde() {
        let cmd = DescriptionCommand::Activate {
            player: PlayerRecord::new(1, "Hank Aaron"),
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let back: DescriptionCommand = serde_json::from_str(&json).unwrap();

        assert_eq!(cmd, back);
    }
}
