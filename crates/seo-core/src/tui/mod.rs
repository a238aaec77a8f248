//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
pub mod commands;
#[cfg(feature = "tui")]
mod prompts;
#[cfg(feature = "tui")]
mod terminal;

#[cfg(feature = "tui")]
pub use commands::UserAction;
#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
#[cfg(feature = "tui")]
pub use terminal::TerminalPrompter;
