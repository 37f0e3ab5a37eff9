use dugout_core::{DescriptionCommand, DescriptionState, PlayerId, PlayerRecord, PlayerUpdate};
use std::rc::Rc;
use yew::prelude::*;

/// Description state accessible via hook
#[derive(Clone)]
pub struct DescriptionContext {
    pub state: DescriptionState,
    pub active_player: Option<PlayerRecord>,

    /// Message of the last failed player fetch or stat update
    pub player_error: Option<String>,

    /// Send commands to the description session
    pub send: Rc<dyn Fn(DescriptionCommand)>,

    /// Fetch a player's stored record and open it
    pub open_player: Rc<dyn Fn(PlayerId)>,

    /// Store new statistics for the active player
    pub update_stats: Rc<dyn Fn(PlayerUpdate)>,
}

impl PartialEq for DescriptionContext {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.active_player == other.active_player
            && self.player_error == other.player_error
    }
}

impl DescriptionContext {
    pub fn open(&self, player_id: PlayerId) {
        (self.open_player)(player_id);
    }

    pub fn deactivate(&self) {
        (self.send)(DescriptionCommand::Deactivate);
    }

    pub fn edit(&self, text: String) {
        (self.send)(DescriptionCommand::EditRequested { text });
    }

    pub fn regenerate(&self) {
        (self.send)(DescriptionCommand::RegenerateRequested);
    }

    pub fn save(&self) {
        (self.send)(DescriptionCommand::SaveRequested);
    }

    pub fn retry(&self) {
        (self.send)(DescriptionCommand::RetryLoad);
    }

    pub fn dismiss_error(&self) {
        (self.send)(DescriptionCommand::DismissError);
    }
}

/// Hook to access the description session
///
/// # Example
///
/// ```rust,ignore
/// use dugout_yew::use_description;
///
/// let description = use_description();
///
/// if description.state.dirty {
///     description.save();
/// }
/// ```
#[hook]
pub fn use_description() -> DescriptionContext {
    use_context::<DescriptionContext>()
        .expect("use_description must be used within a DescriptionProvider")
}
