//! Location of the tier template directories

use crate::generator::Tier;
use std::path::{Path, PathBuf};

/// Root directory holding one sub-directory per tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    root: PathBuf,
}

impl TemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Templates shipped alongside the workspace
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tier_dir(&self, tier: Tier) -> PathBuf {
        self.root.join(tier.dir_name())
    }

    pub fn has_tier(&self, tier: Tier) -> bool {
        self.tier_dir(tier).is_dir()
    }
}
