//! Settings resolution: CLI flag > environment variable > default

use crate::templates::TemplateSource;
use std::path::PathBuf;

/// Overrides the template root directory
pub const TEMPLATE_DIR_ENV: &str = "SEO_TEMPLATE_DIR";

/// Overrides the Python interpreter used for installs and delegated commands
pub const PYTHON_ENV: &str = "SEO_PYTHON";

/// Log filter for diagnostics (tracing `EnvFilter` syntax)
pub const LOG_ENV: &str = "SEO_LOG";

/// Python interpreters in order of preference
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Detect the available Python interpreter
pub fn detect_python() -> &'static str {
    for candidate in PYTHON_CANDIDATES {
        if std::process::Command::new(candidate)
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
        {
            return candidate;
        }
    }
    // Default to python3 if nothing detected (will fail at runtime with helpful error)
    PYTHON_CANDIDATES[0]
}

/// Fully resolved settings, ready for use
#[derive(Debug, Clone)]
pub struct Settings {
    pub templates: TemplateSource,
    pub python: String,
}

impl Settings {
    /// Resolve from CLI flags and the process environment
    pub fn resolve(template_dir: Option<PathBuf>, python: Option<String>) -> Self {
        Self::resolve_with(template_dir, python, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with(
        template_dir: Option<PathBuf>,
        python: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let templates = template_dir
            .or_else(|| env(TEMPLATE_DIR_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
            .map(TemplateSource::new)
            .unwrap_or_else(TemplateSource::bundled);

        let python = python
            .or_else(|| env(PYTHON_ENV).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| detect_python().to_string());

        tracing::debug!(
            templates = %templates.root().display(),
            python = %python,
            "resolved settings"
        );

        Self { templates, python }
    }
}
