//! Error taxonomy for the scaffolding pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting preferences or producing a project.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The user interrupted a prompt. No plan was produced.
    #[error("cancelled, no project was created")]
    Cancelled,

    /// A project type outside the known archetypes was requested.
    #[error("unknown project type: {0}")]
    UnknownProjectType(String),

    /// The destination already holds files the plan would write.
    #[error("refusing to overwrite {}: {reason}", path.display())]
    MaterializationConflict { path: PathBuf, reason: String },

    /// An external tool (pip, git, flask) failed or could not be started.
    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    /// A filesystem operation on `path` failed, e.g. "failed to create file".
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The terminal could not be read from or written to.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[source] io::Error),
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn conflict(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MaterializationConflict {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error stems from the user cancelling a prompt
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_action_and_path() {
        let err = ScaffoldError::io(
            "failed to create file",
            "/tmp/demo/app.py",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to create file /tmp/demo/app.py: denied");
        assert!(std::error::Error::source(&err).is_some());
    }
}
