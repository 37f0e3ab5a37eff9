use crate::hooks::DescriptionContext;
use dugout_api::{store_stats, ApiConfig, DescriptionGateway, DescriptionSession, HttpGateway};
use dugout_core::{
    DescriptionCommand, DescriptionState, LoopConfig, PlayerId, PlayerRecord, PlayerUpdate,
};
use futures::StreamExt;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DescriptionProviderProps {
    #[prop_or_default]
    pub config: ApiConfig,
    pub children: Children,
}

/// Input collected from callbacks between two ticks of the poll loop
#[derive(Default)]
struct PendingInput {
    commands: Vec<DescriptionCommand>,
    opens: Vec<PlayerId>,
    stat_updates: Vec<PlayerUpdate>,

    /// Last player the user asked to open; older fetches are dropped
    latest_open: Option<PlayerId>,
}

impl PendingInput {
    fn enqueue_command(&mut self, cmd: DescriptionCommand) {
        self.commands.push(cmd);
    }

    fn enqueue_open(&mut self, player_id: PlayerId) {
        self.latest_open = Some(player_id);
        self.opens.push(player_id);
    }

    fn enqueue_stat_update(&mut self, update: PlayerUpdate) {
        self.stat_updates.push(update);
    }

    fn drain_commands(&mut self) -> Vec<DescriptionCommand> {
        std::mem::take(&mut self.commands)
    }

    fn drain_opens(&mut self) -> Vec<PlayerId> {
        std::mem::take(&mut self.opens)
    }

    fn drain_stat_updates(&mut self) -> Vec<PlayerUpdate> {
        std::mem::take(&mut self.stat_updates)
    }
}

/// Runs a [`DescriptionSession`] against the HTTP API and shares its state
#[function_component(DescriptionProvider)]
pub fn description_provider(props: &DescriptionProviderProps) -> Html {
    let state = use_state(DescriptionState::default);
    let active_player = use_state(|| None::<PlayerRecord>);
    let player_error = use_state(|| None::<String>);

    let pending = use_mut_ref(PendingInput::default);

    let send = {
        let pending = pending.clone();
        Rc::new(move |cmd: DescriptionCommand| {
            pending.borrow_mut().enqueue_command(cmd);
        }) as Rc<dyn Fn(DescriptionCommand)>
    };

    let open_player = {
        let pending = pending.clone();
        Rc::new(move |player_id: PlayerId| {
            pending.borrow_mut().enqueue_open(player_id);
        }) as Rc<dyn Fn(PlayerId)>
    };

    let update_stats = {
        let pending = pending.clone();
        Rc::new(move |update: PlayerUpdate| {
            pending.borrow_mut().enqueue_stat_update(update);
        }) as Rc<dyn Fn(PlayerUpdate)>
    };

    {
        let state = state.clone();
        let active_player = active_player.clone();
        let player_error = player_error.clone();
        let pending = pending.clone();

        use_effect_with(props.config.clone(), move |config| {
            let running = Rc::new(Cell::new(true));
            let poll_interval = config.poll_interval_ms as u32;
            let gateway = Rc::new(HttpGateway::new(config.clone()));

            tracing::info!(base_url = %config.base_url, "Starting description session");

            {
                let running = running.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let mut session = DescriptionSession::with_shared_gateway(
                        Rc::clone(&gateway),
                        LoopConfig::default(),
                    );
                    let mut interval = gloo_timers::future::IntervalStream::new(poll_interval);

                    while running.get() && interval.next().await.is_some() {
                        // 1. Submit queued commands
                        let commands = pending.borrow_mut().drain_commands();
                        for cmd in commands {
                            tracing::debug!(command = cmd.name(), "Submitting command");
                            if let Err(e) = session.submit(cmd) {
                                tracing::error!(error = %e, "Command dropped");
                            }
                        }

                        // 2. Start player fetches and stat updates
                        let opens = pending.borrow_mut().drain_opens();
                        for player_id in opens {
                            spawn_open(
                                Rc::clone(&gateway),
                                player_id,
                                pending.clone(),
                                player_error.clone(),
                            );
                        }

                        let updates = pending.borrow_mut().drain_stat_updates();
                        for update in updates {
                            match session.active_player() {
                                Some(player) => spawn_stat_update(
                                    Rc::clone(&gateway),
                                    player.id,
                                    update,
                                    pending.clone(),
                                    player_error.clone(),
                                ),
                                None => tracing::warn!("Stat update without active player"),
                            }
                        }

                        // 3. Poll and publish
                        if !session.poll().is_empty() {
                            state.set(session.state().clone());
                            active_player.set(session.active_player().cloned());
                        }
                    }

                    tracing::info!("Description session stopped");
                });
            }

            move || running.set(false)
        });
    }

    let context = DescriptionContext {
        state: (*state).clone(),
        active_player: (*active_player).clone(),
        player_error: (*player_error).clone(),
        send,
        open_player,
        update_stats,
    };

    html! {
        <ContextProvider<DescriptionContext> {context}>
            {props.children.clone()}
        </ContextProvider<DescriptionContext>>
    }
}

/// GET the player, then open it unless another player was picked meanwhile
fn spawn_open(
    gateway: Rc<HttpGateway>,
    player_id: PlayerId,
    pending: Rc<RefCell<PendingInput>>,
    player_error: UseStateHandle<Option<String>>,
) {
    wasm_bindgen_futures::spawn_local(async move {
        match gateway.get_player(player_id).await {
            Ok(player) => {
                let mut pending = pending.borrow_mut();
                if pending.latest_open != Some(player_id) {
                    tracing::debug!(%player_id, "Dropping superseded player fetch");
                    return;
                }
                player_error.set(None);
                pending.enqueue_command(DescriptionCommand::Activate { player });
            }
            Err(e) => {
                tracing::warn!(%player_id, error = %e, "Player fetch failed");
                player_error.set(Some(e.display_message()));
            }
        }
    });
}

/// PUT the stats, then hand the stored record back to the session
fn spawn_stat_update(
    gateway: Rc<HttpGateway>,
    player_id: PlayerId,
    update: PlayerUpdate,
    pending: Rc<RefCell<PendingInput>>,
    player_error: UseStateHandle<Option<String>>,
) {
    wasm_bindgen_futures::spawn_local(async move {
        match store_stats(gateway.as_ref(), player_id, &update).await {
            Ok(record) => {
                player_error.set(None);
                pending
                    .borrow_mut()
                    .enqueue_command(DescriptionCommand::ReconcileStatUpdate { record });
            }
            Err(e) => {
                tracing::warn!(%player_id, error = %e, "Stat update failed");
                player_error.set(Some(e.display_message()));
            }
        }
    });
}
