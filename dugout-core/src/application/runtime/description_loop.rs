use crate::application::runtime::{CommandQueue, QueueError};
use crate::application::{DescriptionCommand, DescriptionEvent, DescriptionManager, GatewayReply};
use crate::domain::DescriptionState;

/// Sizing of a [`DescriptionLoop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Max commands to process per poll
    pub batch_size: usize,

    /// Max queued user commands
    pub max_queue_size: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            batch_size: 16,
            max_queue_size: 64,
        }
    }
}

/// Description event loop - processes commands in batches
pub struct DescriptionLoop {
    /// Stateful manager (owns the description state)
    manager: DescriptionManager,

    /// Inbound command queue
    inbound: CommandQueue,

    /// Outbound event queue (caller drains this)
    outbound: Vec<DescriptionEvent>,

    /// Max commands to process per poll
    batch_size: usize,
}

impl DescriptionLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            manager: DescriptionManager::new(),
            inbound: CommandQueue::new(config.max_queue_size),
            outbound: Vec::new(),
            batch_size: config.batch_size,
        }
    }

    /// Submit a command (non-blocking)
    pub fn submit(&mut self, cmd: DescriptionCommand) -> Result<(), QueueError> {
        self.inbound.push(cmd)
    }

    /// Feed back the outcome of a gateway call. Never dropped.
    pub fn complete(&mut self, reply: GatewayReply) {
        self.inbound
            .push_unbounded(DescriptionCommand::GatewayReplied(reply));
    }

    /// Process up to `batch_size` commands
    /// Returns number of commands processed
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;

        while processed < self.batch_size {
            match self.inbound.pop() {
                Some(cmd) => {
                    let events = self.manager.handle_command(cmd);
                    self.outbound.extend(events);
                    processed += 1;
                }
                None => break,
            }
        }

        processed
    }

    /// Drain all emitted events (caller's responsibility)
    pub fn drain_events(&mut self) -> Vec<DescriptionEvent> {
        std::mem::take(&mut self.outbound)
    }

    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    /// Get reference to manager (for queries)
    pub fn manager(&self) -> &DescriptionManager {
        &self.manager
    }

    pub fn state(&self) -> &DescriptionState {
        self.manager.state()
    }
}

impl Default for DescriptionLoop {
    fn default() -> Self {
        Self::new(LoopConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::GatewayCall;
    use crate::domain::{Phase, PlayerRecord};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("dugout_core=debug"))
            .with_test_writer()
            .try_init();
    }

    fn activate(id: u64) -> DescriptionCommand {
        DescriptionCommand::Activate {
            player: PlayerRecord::new(id, "Test"),
        }
    }

    #[test]
    fn test_submit_and_poll() {
        let mut loop_ = DescriptionLoop::default();

        loop_.submit(activate(1)).unwrap();

        assert_eq!(loop_.poll(), 1);

        let events = loop_.drain_events();
        assert!(matches!(events[0], DescriptionEvent::Activated { .. }));
        let request = events[1].request().unwrap();
        assert_eq!(request.call, GatewayCall::Load);
        assert_eq!(loop_.state().phase, Phase::Loading);
    }

    #[test]
    fn test_reply_round_trip() {
        init_tracing();
        let mut loop_ = DescriptionLoop::default();
        loop_.submit(activate(1)).unwrap();
        loop_.poll();
        let request = loop_.drain_events()[1].request().cloned().unwrap();

        loop_.complete(request.reply(Ok("Leadoff hitter".to_string())));
        loop_.poll();

        let events = loop_.drain_events();
        assert!(matches!(events[0], DescriptionEvent::Loaded { .. }));
        assert_eq!(loop_.state().text, "Leadoff hitter");
    }

    #[test]
    fn test_batch_processing() {
        let mut loop_ = DescriptionLoop::new(LoopConfig {
            batch_size: 3,
            max_queue_size: 100,
        });

        for i in 0..5 {
            loop_.submit(activate(i)).unwrap();
        }

        assert_eq!(loop_.poll(), 3);
        assert_eq!(loop_.pending(), 2);
        assert_eq!(loop_.poll(), 2);
        assert_eq!(loop_.pending(), 0);

        assert_eq!(
            loop_.manager().active_player().map(|p| p.id.get()),
            Some(4)
        );
    }

    #[test]
    fn test_queue_overflow() {
        let mut loop_ = DescriptionLoop::new(LoopConfig {
            batch_size: 10,
            max_queue_size: 2,
        });

        loop_.submit(activate(1)).unwrap();
        loop_.submit(DescriptionCommand::RetryLoad).unwrap();

        let result = loop_.submit(DescriptionCommand::SaveRequested);
        assert!(result.is_err());
    }
}
