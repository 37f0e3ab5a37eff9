pub mod mock_gateway;

use dugout_api::DescriptionSession;
use dugout_core::{DescriptionCommand, DescriptionEvent, GatewayCall, LoopConfig, PlayerRecord};
use mock_gateway::MockGateway;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dugout_core=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn session(gateway: MockGateway) -> DescriptionSession<MockGateway> {
    init_tracing();
    DescriptionSession::new(gateway, LoopConfig::default())
}

pub fn player(id: u64) -> PlayerRecord {
    PlayerRecord::new(id, format!("Player {}", id))
}

pub fn activate(session: &mut DescriptionSession<MockGateway>, id: u64) {
    session
        .submit(DescriptionCommand::Activate { player: player(id) })
        .expect("queue has room");
}

pub fn send(session: &mut DescriptionSession<MockGateway>, cmd: DescriptionCommand) {
    session.submit(cmd).expect("queue has room");
}

pub fn edit(session: &mut DescriptionSession<MockGateway>, text: &str) {
    send(
        session,
        DescriptionCommand::EditRequested {
            text: text.to_string(),
        },
    );
}

/// Generate calls the manager fired on its own
pub fn automatic_generates(events: &[DescriptionEvent]) -> usize {
    events
        .iter()
        .filter_map(|e| e.request())
        .filter(|r| r.call == GatewayCall::Generate { automatic: true })
        .count()
}
