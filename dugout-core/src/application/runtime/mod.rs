mod command_queue;
mod description_loop;

pub use command_queue::{CommandQueue, QueueError};
pub use description_loop::{DescriptionLoop, LoopConfig};
