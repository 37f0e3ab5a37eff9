//! # Dugout Yew Components
//!
//! Yew binding for the player detail view: a provider that runs the
//! description session, a hook to reach it, and the panels that render it.

#[cfg(target_arch = "wasm32")]
pub mod app;
pub mod components;
pub mod hooks;
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod providers;

// Re-exports for convenience
#[cfg(target_arch = "wasm32")]
pub use app::App;
pub use components::{DescriptionPanel, PanelControls, StatEditor, StatFormError};
pub use hooks::{use_description, DescriptionContext};
#[cfg(target_arch = "wasm32")]
pub use providers::{DescriptionProvider, DescriptionProviderProps};
