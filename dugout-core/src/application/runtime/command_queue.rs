use crate::application::DescriptionCommand;
use std::collections::VecDeque;

/// Synchronous command queue (no async, works in any runtime)
#[derive(Debug)]
pub struct CommandQueue {
    queue: VecDeque<DescriptionCommand>,
    max_size: usize,
}

impl CommandQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Push a command (returns error if full)
    pub fn push(&mut self, cmd: DescriptionCommand) -> Result<(), QueueError> {
        if self.queue.len() >= self.max_size {
            return Err(QueueError::Full { max: self.max_size });
        }
        self.queue.push_back(cmd);
        Ok(())
    }

    /// Push ignoring the size limit.
    ///
    /// Used for gateway replies: a dropped reply would leave the phase in
    /// flight with nothing left to complete it.
    pub fn push_unbounded(&mut self, cmd: DescriptionCommand) {
        self.queue.push_back(cmd);
    }

    /// Pop next command
    pub fn pop(&mut self) -> Option<DescriptionCommand> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueueError {
    #[error("Queue is full (max size: {max})")]
    Full { max: usize },
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(100)
    }
}
