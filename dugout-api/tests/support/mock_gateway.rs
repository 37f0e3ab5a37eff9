use async_trait::async_trait;
use dugout_api::{ApiError, DescriptionGateway, Result};
use dugout_core::{Operation, PlayerId, PlayerRecord, PlayerUpdate};
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::HashMap;

/// A call received by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(PlayerId),
    Generate(PlayerId),
    Save(PlayerId, String),
    ListPlayers,
    GetPlayer(PlayerId),
    UpdatePlayer(PlayerId),
}

impl Call {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Call::Load(_) => Some(Operation::Load),
            Call::Generate(_) => Some(Operation::Generate),
            Call::Save(..) => Some(Operation::Save),
            Call::ListPlayers | Call::GetPlayer(_) | Call::UpdatePlayer(_) => None,
        }
    }
}

type Outcome = std::result::Result<String, String>;

/// In-memory stand-in for the player API
///
/// In auto mode every call answers immediately from the `stored` map, like
/// the real server would. In held mode description calls wait until the
/// test releases them, so tests decide the completion order.
#[derive(Default)]
pub struct MockGateway {
    state: RefCell<MockState>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    stored: HashMap<PlayerId, String>,
    players: HashMap<PlayerId, PlayerRecord>,
    failures: HashMap<Operation, String>,
    held_mode: bool,
    held: Vec<(Call, oneshot::Sender<Outcome>)>,
    generated: usize,
    omit_description_in_updates: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Description calls wait for [`MockGateway::release`]
    pub fn held() -> Self {
        let gateway = Self::default();
        gateway.state.borrow_mut().held_mode = true;
        gateway
    }

    pub fn with_stored(self, player_id: u64, text: &str) -> Self {
        self.state
            .borrow_mut()
            .stored
            .insert(PlayerId::new(player_id), text.to_string());
        self
    }

    /// Stats the server holds for a player
    pub fn with_player(self, record: PlayerRecord) -> Self {
        self.state.borrow_mut().players.insert(record.id, record);
        self
    }

    pub fn player(&self, player_id: u64) -> Option<PlayerRecord> {
        self.state
            .borrow()
            .players
            .get(&PlayerId::new(player_id))
            .cloned()
    }

    /// Change the stored description behind the session's back
    pub fn set_stored(&self, player_id: u64, text: &str) {
        self.state
            .borrow_mut()
            .stored
            .insert(PlayerId::new(player_id), text.to_string());
    }

    /// Stat updates answer without a `description` field
    pub fn omitting_descriptions(self) -> Self {
        self.state.borrow_mut().omit_description_in_updates = true;
        self
    }

    /// Make the next call of `operation` fail with `message` (HTTP 500)
    pub fn fail_next(&self, operation: Operation, message: &str) {
        self.state
            .borrow_mut()
            .failures
            .insert(operation, message.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| call.operation() == Some(operation))
            .count()
    }

    pub fn stored(&self, player_id: u64) -> Option<String> {
        self.state
            .borrow()
            .stored
            .get(&PlayerId::new(player_id))
            .cloned()
    }

    /// Calls waiting for release, oldest first
    pub fn held_calls(&self) -> Vec<Call> {
        self.state
            .borrow()
            .held
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    /// Complete the oldest held `call`
    pub fn release(&self, call: &Call, outcome: std::result::Result<&str, &str>) {
        let sender = {
            let mut state = self.state.borrow_mut();
            let index = state
                .held
                .iter()
                .position(|(held, _)| held == call)
                .unwrap_or_else(|| panic!("{:?} is not held", call));
            state.held.remove(index).1
        };

        let outcome = outcome.map(str::to_string).map_err(str::to_string);
        sender.send(outcome).expect("session dropped the call");
    }

    async fn answer(&self, call: Call) -> Result<String> {
        let receiver = {
            let mut state = self.state.borrow_mut();
            state.calls.push(call.clone());

            if state.held_mode {
                let (sender, receiver) = oneshot::channel();
                state.held.push((call.clone(), sender));
                Some(receiver)
            } else {
                None
            }
        };

        let outcome = match receiver {
            Some(receiver) => receiver
                .await
                .map_err(|_| ApiError::Network("call cancelled".to_string()))?,
            None => self.respond(&call),
        };

        outcome.map_err(|message| ApiError::Status {
            status: 500,
            message,
        })
    }

    /// What the server would answer
    fn respond(&self, call: &Call) -> Outcome {
        let mut state = self.state.borrow_mut();

        if let Some(operation) = call.operation() {
            if let Some(message) = state.failures.remove(&operation) {
                return Err(message);
            }
        }

        match call {
            Call::Load(id) => Ok(state.stored.get(id).cloned().unwrap_or_default()),
            Call::Generate(id) => {
                state.generated += 1;
                let text = format!("Generated description #{} for player {}", state.generated, id);
                state.stored.insert(*id, text.clone());
                Ok(text)
            }
            Call::Save(id, text) => {
                state.stored.insert(*id, text.clone());
                Ok(text.clone())
            }
            Call::ListPlayers | Call::GetPlayer(_) | Call::UpdatePlayer(_) => Ok(String::new()),
        }
    }
}

#[async_trait(?Send)]
impl DescriptionGateway for MockGateway {
    async fn list_players(&self) -> Result<Vec<PlayerRecord>> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ListPlayers);

        let mut players: Vec<PlayerRecord> = state.players.values().cloned().collect();
        players.sort_by_key(|p| p.id);
        for player in &mut players {
            player.description = state.stored.get(&player.id).cloned();
        }
        Ok(players)
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<PlayerRecord> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::GetPlayer(player_id));

        let mut player = state
            .players
            .get(&player_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "HTTP 404".to_string(),
            })?;
        player.description = state.stored.get(&player_id).cloned();
        Ok(player)
    }

    async fn load_description(&self, player_id: PlayerId) -> Result<String> {
        self.answer(Call::Load(player_id)).await
    }

    async fn generate_description(&self, player_id: PlayerId) -> Result<String> {
        self.answer(Call::Generate(player_id)).await
    }

    async fn save_description(&self, player_id: PlayerId, text: &str) -> Result<String> {
        self.answer(Call::Save(player_id, text.to_string())).await
    }

    async fn update_player(
        &self,
        player_id: PlayerId,
        update: &PlayerUpdate,
    ) -> Result<PlayerRecord> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::UpdatePlayer(player_id));

        let mut record = state
            .players
            .get(&player_id)
            .cloned()
            .unwrap_or_else(|| PlayerRecord::new(player_id, update.name.clone()));
        record.name = update.name.clone();
        record.position = update.position.clone();
        record.games = update.games;
        record.at_bat = update.at_bat;
        record.runs = update.runs;
        record.hits = update.hits;
        record.double_2b = update.double_2b;
        record.third_baseman = update.third_baseman;
        record.home_runs = update.home_runs;
        record.rbi = update.rbi;
        record.walks = update.walks;
        record.strikeouts = update.strikeouts;
        record.stolen_bases = update.stolen_bases;
        record.caught_stealing = update.caught_stealing;
        record.batting_average = Some(update.batting_average);
        record.on_base_percentage = Some(update.on_base_percentage);
        record.slugging_percentage = Some(update.slugging_percentage);
        record.on_base_plus_slugging = Some(update.on_base_plus_slugging);
        state.players.insert(player_id, record.clone());

        record.description = None;
        if !state.omit_description_in_updates {
            record.description = state.stored.get(&player_id).cloned();
        }

        Ok(record)
    }
}
