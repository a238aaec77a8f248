//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to brand the scaffolding flow and to
//! decide what the user is told once a project exists.

use crate::generator::PostAction;
use crate::preferences::PreferenceSet;
use std::path::Path;

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation.
    /// `pending` holds post-actions that were skipped or failed.
    fn next_steps(&self, dir: &Path, prefs: &PreferenceSet, pending: &[PostAction]) -> Vec<String>;
}
