pub mod description;
pub mod player;

pub use description::{DescriptionState, DescriptionStore, Operation, Origin, Phase, StoreError};
pub use player::{PlayerError, PlayerId, PlayerRecord, PlayerUpdate};
