//! Cross-field consistency rules applied after the wizard
//!
//! Rules run in a fixed order and each sees the effects of the ones before
//! it. Only the sqlite rule talks to the user.

use crate::error::ScaffoldError;
use crate::preferences::{Database, PreferenceSet, ProjectType};
use crate::prompt::{self, Prompter};
use crate::wizard::nodes::{default_auth_mode, default_database};

type Rule = fn(&mut PreferenceSet, &mut dyn Prompter) -> Result<(), ScaffoldError>;

/// Rules in evaluation order
const RULES: &[(&str, Rule)] = &[
    ("database-auth-presence", database_auth_presence),
    ("sqlite-in-production", sqlite_in_production),
    ("docker-for-deployables", docker_for_deployables),
    ("saas-only-features", saas_only_features),
];

/// Apply every rule to `prefs` and return the normalized set
pub fn normalize(
    mut prefs: PreferenceSet,
    prompter: &mut dyn Prompter,
) -> Result<PreferenceSet, ScaffoldError> {
    for (name, rule) in RULES {
        let before = prefs.clone();
        rule(&mut prefs, prompter)?;
        if prefs != before {
            tracing::debug!(rule = name, "rule rewrote preferences");
        }
    }
    Ok(prefs)
}

/// Database and auth exist exactly when the project is not a learning one
fn database_auth_presence(
    prefs: &mut PreferenceSet,
    _prompter: &mut dyn Prompter,
) -> Result<(), ScaffoldError> {
    if prefs.project_type == ProjectType::Learning {
        prefs.database = None;
        prefs.auth_mode = None;
    } else {
        let project_type = Some(prefs.project_type);
        prefs
            .database
            .get_or_insert_with(|| default_database(project_type));
        prefs
            .auth_mode
            .get_or_insert_with(|| default_auth_mode(project_type));
    }
    Ok(())
}

/// SQLite in an API or SaaS project is rewritten to PostgreSQL unless the
/// user explicitly keeps it
fn sqlite_in_production(
    prefs: &mut PreferenceSet,
    prompter: &mut dyn Prompter,
) -> Result<(), ScaffoldError> {
    if prefs.database != Some(Database::Sqlite) || !prefs.project_type.is_production_grade() {
        return Ok(());
    }

    prompter.warn("SQLite is not recommended in production.")?;
    let keep = prompt::ask_confirm(prompter, "Keep SQLite anyway?", false)?;
    if !keep {
        prefs.database = Some(Database::Postgresql);
        prompter.info("Switching to PostgreSQL")?;
    }
    Ok(())
}

fn docker_for_deployables(
    prefs: &mut PreferenceSet,
    prompter: &mut dyn Prompter,
) -> Result<(), ScaffoldError> {
    if prefs.project_type.is_production_grade() {
        if prefs.docker != Some(true) {
            prompter.info("Docker included automatically")?;
        }
        prefs.docker = Some(true);
    }
    Ok(())
}

/// Stripe, email and queue flags only mean something for SaaS projects
fn saas_only_features(
    prefs: &mut PreferenceSet,
    _prompter: &mut dyn Prompter,
) -> Result<(), ScaffoldError> {
    if prefs.project_type != ProjectType::Saas {
        prefs.stripe = None;
        prefs.email = None;
        prefs.async_queue = None;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::AuthMode;
    use crate::prompt::ScriptedPrompter;

    fn prefs(project_type: ProjectType, database: Option<Database>) -> PreferenceSet {
        let mut p = PreferenceSet::new("demo", project_type);
        p.database = database;
        p.auth_mode = database.map(|_| AuthMode::Session);
        p
    }

    #[test]
    fn test_docker_forced_for_api_and_saas() {
        for project_type in [ProjectType::Api, ProjectType::Saas] {
            for docker in [None, Some(false), Some(true)] {
                let mut p = prefs(project_type, Some(Database::Postgresql));
                p.docker = docker;
                let mut prompter = ScriptedPrompter::default();
                let out = normalize(p, &mut prompter).unwrap();
                assert_eq!(out.docker, Some(true));
            }
        }
    }

    #[test]
    fn test_docker_choice_kept_for_application() {
        let mut p = prefs(ProjectType::Application, Some(Database::Sqlite));
        p.docker = Some(false);
        let out = normalize(p, &mut ScriptedPrompter::default()).unwrap();
        assert_eq!(out.docker, Some(false));
    }

    #[test]
    fn test_sqlite_override_declined_switches_to_postgresql() {
        let mut prompter = ScriptedPrompter::new(["n"]);
        let out = normalize(prefs(ProjectType::Api, Some(Database::Sqlite)), &mut prompter).unwrap();
        assert_eq!(out.database, Some(Database::Postgresql));
        assert_eq!(prompter.asked(), &["Keep SQLite anyway?".to_string()]);
    }

    #[test]
    fn test_sqlite_override_default_is_decline() {
        let mut prompter = ScriptedPrompter::new([""]);
        let out = normalize(prefs(ProjectType::Saas, Some(Database::Sqlite)), &mut prompter).unwrap();
        assert_eq!(out.database, Some(Database::Postgresql));
    }

    #[test]
    fn test_sqlite_override_accepted_keeps_sqlite() {
        let mut prompter = ScriptedPrompter::new(["y"]);
        let out = normalize(prefs(ProjectType::Api, Some(Database::Sqlite)), &mut prompter).unwrap();
        assert_eq!(out.database, Some(Database::Sqlite));
    }

    #[test]
    fn test_sqlite_allowed_for_application_without_asking() {
        let mut prompter = ScriptedPrompter::default();
        let out = normalize(
            prefs(ProjectType::Application, Some(Database::Sqlite)),
            &mut prompter,
        )
        .unwrap();
        assert_eq!(out.database, Some(Database::Sqlite));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_stripe_does_not_influence_database_rule() {
        for stripe in [Some(true), Some(false), None] {
            let mut p = prefs(ProjectType::Saas, Some(Database::Postgresql));
            p.stripe = stripe;
            let mut prompter = ScriptedPrompter::default();
            let out = normalize(p, &mut prompter).unwrap();
            assert_eq!(out.database, Some(Database::Postgresql));
            assert_eq!(out.stripe, stripe);
            assert!(prompter.asked().is_empty());
        }
    }

    #[test]
    fn test_saas_flags_unset_for_other_types() {
        let mut p = prefs(ProjectType::Api, Some(Database::Mysql));
        p.stripe = Some(true);
        p.email = Some(false);
        p.async_queue = Some(true);
        let out = normalize(p, &mut ScriptedPrompter::default()).unwrap();
        assert_eq!(out.stripe, None);
        assert_eq!(out.email, None);
        assert_eq!(out.async_queue, None);
    }

    #[test]
    fn test_learning_has_no_database_or_auth() {
        let out = normalize(
            prefs(ProjectType::Learning, Some(Database::Mysql)),
            &mut ScriptedPrompter::default(),
        )
        .unwrap();
        assert_eq!(out.database, None);
        assert_eq!(out.auth_mode, None);
    }

    #[test]
    fn test_missing_database_filled_before_sqlite_rule() {
        let mut prompter = ScriptedPrompter::default();
        let out = normalize(prefs(ProjectType::Api, None), &mut prompter).unwrap();
        assert_eq!(out.database, Some(Database::Postgresql));
        assert_eq!(out.auth_mode, Some(AuthMode::Jwt));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_interrupt_during_override_cancels() {
        let mut prompter = ScriptedPrompter::default();
        let err = normalize(prefs(ProjectType::Api, Some(Database::Sqlite)), &mut prompter)
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
