//! # Dugout API
//!
//! Gateway to the player REST API and the session that runs the
//! description lifecycle against it.

pub mod config;
pub mod error;
pub mod gateway;
#[cfg(target_arch = "wasm32")]
pub mod http;
pub mod session;
pub mod wire;

pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::{ApiError, Result};
pub use gateway::DescriptionGateway;
#[cfg(target_arch = "wasm32")]
pub use http::HttpGateway;
pub use session::{store_stats, DescriptionSession};
pub use wire::DescriptionBody;
