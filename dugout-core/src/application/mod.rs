mod commands;
mod events;
mod manager;
pub mod runtime;

pub use commands::{
    CommandError, DescriptionCommand, GatewayCall, GatewayReply, GatewayRequest, RequestTicket,
};
pub use events::{DescriptionEvent, FailureKind};
pub use manager::DescriptionManager;
