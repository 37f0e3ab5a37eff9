use crate::application::{
    CommandError, DescriptionCommand, DescriptionEvent, FailureKind, GatewayCall, GatewayReply,
    GatewayRequest, RequestTicket,
};
use crate::domain::{DescriptionState, DescriptionStore, Operation, Phase, PlayerId, PlayerRecord};
use std::collections::HashSet;

/// Decides which gateway call fires when for the active player's description
///
/// Commands are handled one at a time and return the events they produced.
/// Gateway calls are never performed here: they are emitted as
/// [`DescriptionEvent::RequestIssued`] and their outcome comes back as
/// [`DescriptionCommand::GatewayReplied`].
#[derive(Debug, Clone, Default)]
pub struct DescriptionManager {
    store: DescriptionStore,

    /// Copy of the record shown in the detail view
    active: Option<PlayerRecord>,

    /// Activation counter, bumped on every `Activate`
    epoch: u64,

    /// Players whose first load completed, successfully or not
    auto_generate_attempted: HashSet<PlayerId>,
}

impl DescriptionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a single command and return the resulting events
    pub fn handle_command(&mut self, command: DescriptionCommand) -> Vec<DescriptionEvent> {
        let name = command.name();

        let result = match command {
            DescriptionCommand::Activate { player } => Ok(self.handle_activate(player)),
            DescriptionCommand::Deactivate => self.handle_deactivate(),
            DescriptionCommand::EditRequested { text } => self.handle_edit(text),
            DescriptionCommand::RegenerateRequested => self.handle_regenerate(),
            DescriptionCommand::SaveRequested => self.handle_save(),
            DescriptionCommand::RetryLoad => self.handle_retry_load(),
            DescriptionCommand::DismissError => self.handle_dismiss_error(),
            DescriptionCommand::ReconcileStatUpdate { record } => self.handle_reconcile(record),
            DescriptionCommand::GatewayReplied(reply) => self.handle_reply(reply),
        };

        match result {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(command = name, reason = %e, "Description command rejected");
                vec![DescriptionEvent::Rejected {
                    command: name.to_string(),
                    reason: e.to_string(),
                }]
            }
        }
    }

    fn handle_activate(&mut self, player: PlayerRecord) -> Vec<DescriptionEvent> {
        self.epoch += 1;
        let player_id = player.id;

        if let Some(previous) = &self.active {
            if self.store.state().phase.is_in_flight() {
                tracing::debug!(
                    previous = %previous.id,
                    phase = %self.store.state().phase,
                    "Switching player with a request in flight; its reply will be discarded"
                );
            }
        }

        self.store.reset(player_id);
        self.active = Some(player);

        tracing::info!(player = %player_id, epoch = self.epoch, "Player activated");

        let mut events = vec![DescriptionEvent::Activated {
            player_id,
            epoch: self.epoch,
        }];

        // Fresh store, nothing in flight
        match self.issue(GatewayCall::Load) {
            Ok(request) => events.push(request),
            Err(e) => events.push(DescriptionEvent::Rejected {
                command: "Activate".to_string(),
                reason: e.to_string(),
            }),
        }

        events
    }

    fn handle_deactivate(&mut self) -> Result<Vec<DescriptionEvent>, CommandError> {
        let player = self.active.take().ok_or(CommandError::NoActivePlayer)?;
        self.store.clear();

        tracing::info!(player = %player.id, "Player deactivated");

        Ok(vec![DescriptionEvent::Deactivated {
            player_id: player.id,
        }])
    }

    fn handle_edit(&mut self, text: String) -> Result<Vec<DescriptionEvent>, CommandError> {
        let player_id = self.active_id()?;
        let phase = self.store.state().phase;

        if phase != Phase::Idle {
            return Err(CommandError::NotEditable(phase));
        }

        self.store.set_text(text);

        Ok(vec![DescriptionEvent::Edited {
            player_id,
            dirty: self.store.state().dirty,
        }])
    }

    fn handle_regenerate(&mut self) -> Result<Vec<DescriptionEvent>, CommandError> {
        self.active_id()?;
        self.ensure_not_in_flight()?;

        if self.store.state().dirty {
            tracing::info!("Regenerating over unsaved edits");
        }

        Ok(vec![self.issue(GatewayCall::Generate { automatic: false })?])
    }

    fn handle_save(&mut self) -> Result<Vec<DescriptionEvent>, CommandError> {
        self.active_id()?;
        self.ensure_not_in_flight()?;

        if !self.store.state().dirty {
            return Err(CommandError::NothingToSave);
        }

        let text = self.store.state().text.clone();
        Ok(vec![self.issue(GatewayCall::Save { text })?])
    }

    fn handle_retry_load(&mut self) -> Result<Vec<DescriptionEvent>, CommandError> {
        self.active_id()?;
        self.ensure_not_in_flight()?;

        Ok(vec![self.issue(GatewayCall::Load)?])
    }

    fn handle_dismiss_error(&mut self) -> Result<Vec<DescriptionEvent>, CommandError> {
        let player_id = self.active_id()?;
        self.store.dismiss_error()?;

        Ok(vec![DescriptionEvent::ErrorDismissed { player_id }])
    }

    fn handle_reconcile(
        &mut self,
        record: PlayerRecord,
    ) -> Result<Vec<DescriptionEvent>, CommandError> {
        let player_id = self.active_id()?;

        if record.id != player_id {
            return Err(CommandError::WrongPlayer {
                expected: player_id,
                actual: record.id,
            });
        }

        let merged = record
            .carried_description()
            .filter(|text| *text != self.store.state().text)
            .map(str::to_string);

        let mut description_replaced = false;

        if let Some(text) = merged {
            if self.store.state().phase.is_in_flight() {
                // The in-flight reply decides the text
                tracing::debug!(
                    player = %player_id,
                    phase = %self.store.state().phase,
                    "Server description not merged while a request is in flight"
                );
            } else {
                self.store.apply_merged(text)?;
                description_replaced = true;
            }
        }

        if let Some(active) = self.active.as_mut() {
            active.merge_stats(&record);
            if description_replaced {
                active.description = record.description.clone();
            }
        }

        tracing::info!(player = %player_id, description_replaced, "Stat update reconciled");

        Ok(vec![DescriptionEvent::Reconciled {
            player_id,
            description_replaced,
        }])
    }

    fn handle_reply(&mut self, reply: GatewayReply) -> Result<Vec<DescriptionEvent>, CommandError> {
        let current = self.active_ticket();
        let awaited = self.store.state().phase == reply.operation.phase();

        if current != Some(reply.ticket) || !awaited {
            tracing::debug!(
                ticket = %reply.ticket,
                operation = %reply.operation,
                "Discarding stale gateway reply"
            );
            return Ok(vec![DescriptionEvent::StaleReplyDiscarded {
                ticket: reply.ticket,
                operation: reply.operation,
            }]);
        }

        let player_id = reply.ticket.player_id;

        // Only the first completed load may auto-generate, even if it failed
        let first_load =
            reply.operation == Operation::Load && self.auto_generate_attempted.insert(player_id);

        let text = match reply.outcome {
            Ok(text) => text,
            Err(message) => {
                tracing::warn!(
                    player = %player_id,
                    operation = %reply.operation,
                    %message,
                    "Gateway call failed"
                );
                self.store.fail(message.clone());
                return Ok(vec![DescriptionEvent::Failed {
                    player_id,
                    kind: FailureKind::from(reply.operation),
                    message,
                }]);
            }
        };

        match reply.operation {
            Operation::Load => self.apply_load(player_id, text, first_load),
            Operation::Generate => {
                self.store.apply_generated(text.clone())?;
                self.sync_record_description(&text);
                tracing::info!(player = %player_id, "Description generated");
                Ok(vec![DescriptionEvent::Generated { player_id, text }])
            }
            Operation::Save => {
                self.store.mark_saved()?;
                let saved = self.store.state().text.clone();
                self.sync_record_description(&saved);
                tracing::info!(player = %player_id, "Description saved");
                Ok(vec![DescriptionEvent::Saved { player_id }])
            }
        }
    }

    fn apply_load(
        &mut self,
        player_id: PlayerId,
        text: String,
        first_load: bool,
    ) -> Result<Vec<DescriptionEvent>, CommandError> {
        let empty = text.trim().is_empty();

        self.store.apply_loaded(text.clone())?;
        self.sync_record_description(&text);

        let mut events = vec![DescriptionEvent::Loaded { player_id, text }];

        if empty && first_load {
            tracing::info!(player = %player_id, "No stored description, generating one");
            events.push(self.issue(GatewayCall::Generate { automatic: true })?);
        } else if empty {
            tracing::debug!(player = %player_id, "Empty description, auto-generation already used");
        }

        Ok(events)
    }

    /// Enter the call's phase and describe the request to perform
    fn issue(&mut self, call: GatewayCall) -> Result<DescriptionEvent, CommandError> {
        let ticket = self.active_ticket().ok_or(CommandError::NoActivePlayer)?;
        let request = GatewayRequest { ticket, call };

        self.store.begin(request.operation())?;

        tracing::debug!(ticket = %ticket, operation = %request.operation(), "Request issued");

        Ok(DescriptionEvent::RequestIssued(request))
    }

    fn ensure_not_in_flight(&self) -> Result<(), CommandError> {
        let phase = self.store.state().phase;
        if phase.is_in_flight() {
            return Err(CommandError::InFlight(phase));
        }
        Ok(())
    }

    fn active_id(&self) -> Result<PlayerId, CommandError> {
        self.active
            .as_ref()
            .map(|player| player.id)
            .ok_or(CommandError::NoActivePlayer)
    }

    fn sync_record_description(&mut self, text: &str) {
        if let Some(active) = self.active.as_mut() {
            active.description = Some(text.to_string());
        }
    }

    // Queries

    pub fn state(&self) -> &DescriptionState {
        self.store.state()
    }

    pub fn active_player(&self) -> Option<&PlayerRecord> {
        self.active.as_ref()
    }

    /// Ticket replies must carry to be applied
    pub fn active_ticket(&self) -> Option<RequestTicket> {
        self.active.as_ref().map(|player| RequestTicket {
            player_id: player.id,
            epoch: self.epoch,
        })
    }

    pub fn has_attempted_auto_generate(&self, player_id: PlayerId) -> bool {
        self.auto_generate_attempted.contains(&player_id)
    }
}
