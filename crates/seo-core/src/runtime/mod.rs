//! Runtime detection and external tools
//!
//! This module provides:
//! - Python and Git detection
//! - A streaming runner for external commands
//! - Post-actions (package install, repository init)
//! - Commands delegated to a generated project

pub mod actions;
pub mod check;
pub mod project;
pub mod tool;

pub use actions::{run_all, PackageInstaller, PostActionOutcome, VersionControl};
pub use check::{check_git, check_python, check_runtimes_with_advisory, Runtime, RuntimeInfo};
pub use project::{detect_entry_point, DbAction, EntryPoint, ProjectCommands, RunMode};
pub use tool::ToolCommand;
