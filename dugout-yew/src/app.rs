use crate::components::{DescriptionPanel, StatEditor};
use crate::hooks::use_description;
use crate::providers::DescriptionProvider;
use dugout_api::{ApiConfig, DescriptionGateway, HttpGateway};
use dugout_core::PlayerRecord;
use yew::prelude::*;

/// Detail view of one player: header, stat form and description
#[function_component(PlayerDetail)]
fn player_detail() -> Html {
    let description = use_description();

    let Some(player) = description.active_player.clone() else {
        return html! {
            <div class="dugout-detail">
                if let Some(error) = description.player_error.clone() {
                    <p class="dugout-detail__error">{error}</p>
                }
                <p class="dugout-detail__empty">{"Pick a player to see the details"}</p>
            </div>
        };
    };

    let on_close = {
        let description = description.clone();
        Callback::from(move |_: MouseEvent| description.deactivate())
    };

    html! {
        <div class="dugout-detail">
            <div class="dugout-detail__header">
                <h2 class="dugout-detail__name">{&player.name}</h2>
                if let Some(position) = &player.position {
                    <span class="dugout-detail__position">{position}</span>
                }
                <span class="dugout-detail__rate">
                    {format!("{:.3} H/G", player.hits_per_game())}
                </span>
                <button class="dugout-detail__close" onclick={on_close}>{"Close"}</button>
            </div>
            <StatEditor />
            <DescriptionPanel />
        </div>
    }
}

/// Stored players; clicking one opens its detail view
#[function_component(PlayerList)]
fn player_list() -> Html {
    let description = use_description();
    let players = use_state(Vec::<PlayerRecord>::new);
    let error = use_state(|| None::<String>);

    {
        let players = players.clone();
        let error = error.clone();
        // Refetch whenever the detail view closes so edits show up
        use_effect_with(description.active_player.is_none(), move |closed| {
            if *closed {
                wasm_bindgen_futures::spawn_local(async move {
                    let gateway = HttpGateway::new(ApiConfig::default());
                    match gateway.list_players().await {
                        Ok(list) => {
                            tracing::info!(count = list.len(), "Players fetched");
                            players.set(list);
                            error.set(None);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to fetch players");
                            error.set(Some(e.display_message()));
                        }
                    }
                });
            }
            || ()
        });
    }

    let selected = description.active_player.as_ref().map(|p| p.id);

    html! {
        <div class="dugout-players">
            if let Some(error) = (*error).clone() {
                <p class="dugout-players__error">{error}</p>
            }
            <ul class="dugout-players__items">
                {for players.iter().map(|player| {
                    let on_click = {
                        let description = description.clone();
                        let player_id = player.id;
                        Callback::from(move |_: MouseEvent| {
                            tracing::info!(%player_id, "Opening player");
                            description.open(player_id);
                        })
                    };
                    let class = classes!(
                        "dugout-players__item",
                        (selected == Some(player.id)).then_some("selected")
                    );

                    html! {
                        <li {class} onclick={on_click}>
                            <span class="dugout-players__name">{&player.name}</span>
                            <span class="dugout-players__hits">{player.hits}{" H"}</span>
                            <span class="dugout-players__hr">{player.home_runs}{" HR"}</span>
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <DescriptionProvider config={ApiConfig::default()}>
            <div class="dugout-app">
                <PlayerList />
                <PlayerDetail />
            </div>
        </DescriptionProvider>
    }
}
