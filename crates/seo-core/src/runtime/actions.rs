//! Post-actions run once the project files are on disk

use super::tool::ToolCommand;
use crate::error::ScaffoldError;
use crate::generator::{PostAction, REQUIREMENTS_FILE};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// pip can be slow on a cold cache
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Installs the packages listed in the generated requirements file
#[derive(Debug, Clone)]
pub struct PackageInstaller {
    python: String,
    project_dir: PathBuf,
}

impl PackageInstaller {
    pub fn new(python: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            project_dir: project_dir.into(),
        }
    }

    pub fn command(&self) -> ToolCommand {
        ToolCommand::new(&self.python)
            .args(["-m", "pip", "install", "-r", REQUIREMENTS_FILE])
            .current_dir(&self.project_dir)
            .timeout(INSTALL_TIMEOUT)
    }

    /// What the user can run by hand if the install fails
    pub fn manual_hint(&self) -> String {
        format!(
            "cd {} && {} -m pip install -r {}",
            self.project_dir.display(),
            self.python,
            REQUIREMENTS_FILE
        )
    }

    pub async fn install(&self) -> Result<(), ScaffoldError> {
        self.command().run_streaming().await
    }
}

/// Initializes a Git repository in the project directory
#[derive(Debug, Clone)]
pub struct VersionControl {
    project_dir: PathBuf,
}

impl VersionControl {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    pub fn command(&self) -> ToolCommand {
        ToolCommand::new("git")
            .arg("init")
            .current_dir(&self.project_dir)
            .timeout(GIT_TIMEOUT)
    }

    pub async fn init(&self) -> Result<(), ScaffoldError> {
        self.command().run_streaming().await
    }
}

/// Run one post-action against `project_dir`
pub async fn execute(
    action: PostAction,
    python: &str,
    project_dir: &Path,
) -> Result<(), ScaffoldError> {
    tracing::debug!(?action, dir = %project_dir.display(), "post-action");
    match action {
        PostAction::InstallPackages => PackageInstaller::new(python, project_dir).install().await,
        PostAction::InitVersionControl => VersionControl::new(project_dir).init().await,
    }
}

/// Result of running a plan's post-actions
#[derive(Debug, Default)]
pub struct PostActionOutcome {
    /// Actions the user still has to run, in plan order
    pub pending: Vec<PostAction>,
    /// First failure of a required action
    pub fatal: Option<ScaffoldError>,
}

impl PostActionOutcome {
    pub fn into_result(self) -> Result<Vec<PostAction>, ScaffoldError> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok(self.pending),
        }
    }
}

/// Run `actions` in order.
///
/// A failed best-effort action only lands in `pending`. A failed required
/// action is kept as the fatal error; later required actions are skipped
/// but best-effort ones are still attempted. `report` sees every result.
pub async fn run_all<F, Fut>(
    actions: &[PostAction],
    mut execute: F,
    mut report: impl FnMut(PostAction, &Result<(), ScaffoldError>) -> Result<(), ScaffoldError>,
) -> Result<PostActionOutcome, ScaffoldError>
where
    F: FnMut(PostAction) -> Fut,
    Fut: Future<Output = Result<(), ScaffoldError>>,
{
    let mut outcome = PostActionOutcome::default();

    for &action in actions {
        if outcome.fatal.is_some() && !action.is_best_effort() {
            tracing::debug!(?action, "skipped after a required action failed");
            outcome.pending.push(action);
            continue;
        }

        let result = execute(action).await;
        report(action, &result)?;

        if let Err(err) = result {
            outcome.pending.push(action);
            if !action.is_best_effort() && outcome.fatal.is_none() {
                outcome.fatal = Some(err);
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: [PostAction; 2] = [PostAction::InstallPackages, PostAction::InitVersionControl];

    fn failure(tool: &str) -> ScaffoldError {
        ScaffoldError::ExternalTool {
            tool: tool.to_string(),
            message: "exited with code 1".to_string(),
        }
    }

    #[test]
    fn test_installer_command() {
        let installer = PackageInstaller::new("python3", "/tmp/demo");
        let cmd = installer.command();
        assert_eq!(cmd.display(), "python3 -m pip install -r requirements.txt");
        assert_eq!(cmd.working_dir(), Some(Path::new("/tmp/demo")));
        assert_eq!(
            installer.manual_hint(),
            "cd /tmp/demo && python3 -m pip install -r requirements.txt"
        );
    }

    #[test]
    fn test_version_control_command() {
        let cmd = VersionControl::new("/tmp/demo").command();
        assert_eq!(cmd.display(), "git init");
        assert_eq!(cmd.working_dir(), Some(Path::new("/tmp/demo")));
    }

    #[tokio::test]
    async fn test_install_with_missing_python_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = execute(
            PostAction::InstallPackages,
            "seo-definitely-not-a-python",
            dir.path(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScaffoldError::ExternalTool { .. }));
    }

    #[tokio::test]
    async fn test_git_failure_is_pending_not_fatal() {
        let mut attempted = Vec::new();
        let mut reported = Vec::new();

        let outcome = run_all(
            &BOTH,
            |action| {
                attempted.push(action);
                let result = match action {
                    PostAction::InstallPackages => Ok(()),
                    PostAction::InitVersionControl => Err(failure("git init")),
                };
                async move { result }
            },
            |action, result| {
                reported.push((action, result.is_ok()));
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(attempted, BOTH);
        assert_eq!(
            reported,
            [
                (PostAction::InstallPackages, true),
                (PostAction::InitVersionControl, false)
            ]
        );
        assert_eq!(outcome.pending, [PostAction::InitVersionControl]);
        assert!(outcome.fatal.is_none());
    }

    #[tokio::test]
    async fn test_install_failure_is_fatal_and_git_still_runs() {
        let mut attempted = Vec::new();

        let outcome = run_all(
            &BOTH,
            |action| {
                attempted.push(action);
                let result = match action {
                    PostAction::InstallPackages => Err(failure("pip")),
                    PostAction::InitVersionControl => Ok(()),
                };
                async move { result }
            },
            |_, _| Ok(()),
        )
        .await
        .unwrap();

        assert_eq!(attempted, BOTH);
        assert_eq!(outcome.pending, [PostAction::InstallPackages]);
        assert!(matches!(
            outcome.into_result(),
            Err(ScaffoldError::ExternalTool { tool, .. }) if tool == "pip"
        ));
    }

    #[tokio::test]
    async fn test_report_error_stops_the_run() {
        let mut attempted = 0;
        let err = run_all(
            &BOTH,
            |_| {
                attempted += 1;
                async { Ok(()) }
            },
            |_, _| Err(ScaffoldError::Cancelled),
        )
        .await
        .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(attempted, 1);
    }
}
