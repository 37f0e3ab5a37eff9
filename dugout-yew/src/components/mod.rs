//! UI components for the player detail view

mod description_panel;
mod stat_editor;
pub use description_panel::{DescriptionPanel, PanelControls};
pub use stat_editor::{StatEditor, StatFormError};
