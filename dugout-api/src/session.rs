use crate::error::{ApiError, Result};
use crate::gateway::DescriptionGateway;
use dugout_core::{
    DescriptionCommand, DescriptionEvent, DescriptionLoop, DescriptionState, GatewayCall,
    GatewayReply, GatewayRequest, LoopConfig, PlayerId, PlayerRecord, PlayerUpdate, QueueError,
};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use std::rc::Rc;

type PendingReply = LocalBoxFuture<'static, GatewayReply>;

/// Drives a [`DescriptionLoop`] against a gateway
///
/// Requests the loop issues become in-flight futures. Their replies are fed
/// back through the loop's queue, so every state change happens in `poll`.
/// Calls for a player that is no longer active still complete and are then
/// discarded by the loop.
pub struct DescriptionSession<G: DescriptionGateway + 'static> {
    runtime: DescriptionLoop,
    gateway: Rc<G>,
    in_flight: FuturesUnordered<PendingReply>,
}

impl<G: DescriptionGateway + 'static> DescriptionSession<G> {
    pub fn new(gateway: G, config: LoopConfig) -> Self {
        Self::with_shared_gateway(Rc::new(gateway), config)
    }

    pub fn with_shared_gateway(gateway: Rc<G>, config: LoopConfig) -> Self {
        Self {
            runtime: DescriptionLoop::new(config),
            gateway,
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Queue a command; it takes effect on the next `poll`
    pub fn submit(&mut self, cmd: DescriptionCommand) -> std::result::Result<(), QueueError> {
        self.runtime.submit(cmd)
    }

    /// Collect finished gateway calls, process queued commands and dispatch
    /// the requests they issued. Never blocks.
    pub fn poll(&mut self) -> Vec<DescriptionEvent> {
        self.collect_finished();

        let mut events = Vec::new();
        loop {
            let processed = self.runtime.poll();
            for event in self.runtime.drain_events() {
                if let Some(request) = event.request() {
                    self.dispatch(request.clone());
                }
                events.push(event);
            }

            if processed == 0 || self.runtime.pending() == 0 {
                break;
            }
        }

        events
    }

    /// Wait for the next in-flight call and apply it.
    /// Returns `None` when nothing is in flight.
    pub async fn settle_next(&mut self) -> Option<Vec<DescriptionEvent>> {
        let reply = self.in_flight.next().await?;
        self.runtime.complete(reply);
        Some(self.poll())
    }

    /// Poll, then settle calls until nothing is in flight
    pub async fn run_until_settled(&mut self) -> Vec<DescriptionEvent> {
        let mut events = self.poll();
        while let Some(more) = self.settle_next().await {
            events.extend(more);
        }
        events
    }

    /// Fetch the stored record of `player_id` and open it
    pub async fn open_player(&mut self, player_id: PlayerId) -> Result<PlayerRecord> {
        let player = self.gateway.get_player(player_id).await?;

        self.submit(DescriptionCommand::Activate {
            player: player.clone(),
        })?;
        self.poll();

        Ok(player)
    }

    /// Store new statistics for the active player and reconcile the
    /// description with the record the server returns
    pub async fn update_player(&mut self, update: &PlayerUpdate) -> Result<PlayerRecord> {
        let player_id = self
            .runtime
            .manager()
            .active_player()
            .map(|player| player.id)
            .ok_or(ApiError::NoActivePlayer)?;

        let record = store_stats(self.gateway.as_ref(), player_id, update).await?;

        self.submit(DescriptionCommand::ReconcileStatUpdate {
            record: record.clone(),
        })?;
        self.poll();

        Ok(record)
    }

    pub fn state(&self) -> &DescriptionState {
        self.runtime.state()
    }

    pub fn active_player(&self) -> Option<&PlayerRecord> {
        self.runtime.manager().active_player()
    }

    /// Number of gateway calls still outstanding, stale ones included
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn gateway(&self) -> &Rc<G> {
        &self.gateway
    }

    fn collect_finished(&mut self) {
        while let Some(Some(reply)) = self.in_flight.next().now_or_never() {
            self.runtime.complete(reply);
        }
    }

    fn dispatch(&mut self, request: GatewayRequest) {
        tracing::debug!(
            ticket = %request.ticket,
            operation = %request.operation(),
            "Dispatching gateway call"
        );

        let gateway = Rc::clone(&self.gateway);
        let pending = async move {
            let player_id = request.ticket.player_id;
            let outcome = match &request.call {
                GatewayCall::Load => gateway.load_description(player_id).await,
                GatewayCall::Generate { .. } => gateway.generate_description(player_id).await,
                GatewayCall::Save { text } => gateway.save_description(player_id, text).await,
            };
            request.reply(outcome.map_err(|e| e.display_message()))
        };

        self.in_flight.push(pending.boxed_local());
    }
}

/// Validate and store `update`, returning the record the server kept.
///
/// The caller feeds the record back as
/// [`DescriptionCommand::ReconcileStatUpdate`].
pub async fn store_stats<G: DescriptionGateway + ?Sized>(
    gateway: &G,
    player_id: PlayerId,
    update: &PlayerUpdate,
) -> Result<PlayerRecord> {
    update.validate()?;

    let record = gateway.update_player(player_id, update).await?;
    tracing::info!(player = %player_id, "Stats saved");

    Ok(record)
}
