//! # Dugout Core
//!
//! Player records and the description lifecycle of the detail view.
//! Pure state, no I/O: gateway calls leave as events and come back as
//! commands.

pub mod application;
pub mod domain;

pub use application::runtime::{CommandQueue, DescriptionLoop, LoopConfig, QueueError};
pub use application::{
    CommandError, DescriptionCommand, DescriptionEvent, DescriptionManager, FailureKind,
    GatewayCall, GatewayReply, GatewayRequest, RequestTicket,
};
pub use domain::{
    DescriptionState, DescriptionStore, Operation, Origin, Phase, PlayerError, PlayerId,
    PlayerRecord, PlayerUpdate, StoreError,
};
