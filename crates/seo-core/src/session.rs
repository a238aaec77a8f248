//! One scaffolding session, from the first question to a finished plan
//!
//! Nothing here touches the filesystem: a session that is interrupted or
//! declined leaves no trace.

use crate::error::ScaffoldError;
use crate::generator::{self, ProjectPlan};
use crate::policy;
use crate::preferences::PreferenceSet;
use crate::prompt::{self, Prompter};
use crate::wizard::Wizard;

const CONFIRM_TEXT: &str = "Create the project with this configuration?";

/// Normalized preferences and the plan derived from them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    pub preferences: PreferenceSet,
    pub plan: ProjectPlan,
}

/// Collect, normalize, confirm and plan.
///
/// Returns `Ok(None)` when the user declines the final confirmation.
pub fn prepare(
    wizard: Wizard,
    prompter: &mut dyn Prompter,
) -> Result<Option<Prepared>, ScaffoldError> {
    let raw = wizard.collect(prompter)?;
    let preferences = policy::normalize(raw, prompter)?;

    for line in preferences.summary_lines() {
        prompter.info(&line)?;
    }
    if !prompt::ask_confirm(prompter, CONFIRM_TEXT, true)? {
        tracing::info!("configuration declined");
        return Ok(None);
    }

    let generator = generator::resolve(&preferences);
    let plan = generator.plan(&preferences);
    tracing::info!(
        generator = generator.name(),
        packages = plan.packages.len(),
        entries = plan.manifest.len(),
        "plan built"
    );

    Ok(Some(Prepared { preferences, plan }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{PostAction, Tier};
    use crate::preferences::{AuthMode, Database, ProjectType};
    use crate::prompt::{DefaultsPrompter, ScriptedPrompter};

    #[test]
    fn test_learning_session() {
        let mut prompter = ScriptedPrompter::new(["demo", "1", "y", "y"]);
        let prepared = prepare(Wizard::new(), &mut prompter).unwrap().unwrap();

        assert_eq!(prepared.plan.project_name, "demo");
        assert_eq!(prepared.plan.tier, Tier::Beginner);
        assert_eq!(prepared.plan.packages, ["flask", "python-dotenv"]);
        assert_eq!(prompter.asked().last().unwrap(), CONFIRM_TEXT);
        assert!(prompter.messages().iter().any(|m| m.contains("demo")));
    }

    // prepare is never handed a directory, so there is nothing on disk to check
    #[test]
    fn test_interrupt_at_third_prompt_cancels_and_structurally_writes_nothing() {
        let mut prompter = ScriptedPrompter::new(["demo", "2"]);

        let err = prepare(Wizard::new(), &mut prompter).unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(prompter.asked().len(), 3);
    }

    #[test]
    fn test_declined_confirmation_yields_no_plan() {
        let mut prompter = ScriptedPrompter::new(["demo", "1", "n", "n"]);
        assert_eq!(prepare(Wizard::new(), &mut prompter).unwrap(), None);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_defaults_run_for_api() {
        let mut prompter = DefaultsPrompter::new(ScriptedPrompter::default());
        let wizard = Wizard::new()
            .with_project_name("svc")
            .with_project_type(ProjectType::Api);

        let prepared = prepare(wizard, &mut prompter).unwrap().unwrap();
        let prefs = &prepared.preferences;

        assert_eq!(prefs.database, Some(Database::Postgresql));
        assert_eq!(prefs.auth_mode, Some(AuthMode::Jwt));
        assert_eq!(prefs.docker, Some(true));
        assert!(prefs.version_control);
        assert_eq!(prepared.plan.tier, Tier::Professional);
        assert!(prepared.plan.packages.contains(&"psycopg2-binary".to_string()));
        assert_eq!(
            prepared.plan.post_actions,
            [PostAction::InstallPackages, PostAction::InitVersionControl]
        );
        assert!(prompter.into_inner().asked().is_empty());
    }

    #[test]
    fn test_sqlite_in_saas_is_rewritten_with_defaults() {
        let mut prompter = ScriptedPrompter::new(["shop", "4", "1", "1", "", "", "", "", "", ""]);
        let prepared = prepare(Wizard::new(), &mut prompter).unwrap().unwrap();
        assert_eq!(prepared.preferences.database, Some(Database::Postgresql));
        assert_eq!(prompter.remaining(), 0);
    }
}
