//! The fixed question sequence

use super::{Ask, PreferenceDraft, QuestionNode};
use crate::error::ScaffoldError;
use crate::preferences::{AuthMode, Database, ProjectType, DEFAULT_PROJECT_NAME};
use crate::prompt::InputError;

const PROJECT_TYPE_LABELS: [&str; 4] = [
    ProjectType::Learning.display_name(),
    ProjectType::Application.display_name(),
    ProjectType::Api.display_name(),
    ProjectType::Saas.display_name(),
];

const DATABASE_LABELS: [&str; 3] = [
    Database::Sqlite.display_name(),
    Database::Postgresql.display_name(),
    Database::Mysql.display_name(),
];

const AUTH_LABELS: [&str; 3] = [
    AuthMode::Session.display_name(),
    AuthMode::Jwt.display_name(),
    AuthMode::Oauth.display_name(),
];

/// Questions in traversal order. Later guards only look at earlier answers.
pub fn questions() -> Vec<QuestionNode> {
    vec![
        QuestionNode {
            id: "project_name",
            text: "Project name",
            guard: Some(name_not_prefilled),
            ask: Ask::Text {
                default: DEFAULT_PROJECT_NAME,
                check: check_project_name,
                write: |d, name| d.project_name = Some(name),
            },
        },
        QuestionNode {
            id: "project_type",
            text: "What kind of project?",
            guard: Some(type_not_prefilled),
            ask: Ask::Choice {
                options: &PROJECT_TYPE_LABELS,
                default: |_| 0,
                write: write_project_type,
            },
        },
        QuestionNode {
            id: "database",
            text: "Which database?",
            guard: Some(not_learning),
            ask: Ask::Choice {
                options: &DATABASE_LABELS,
                default: |d| index_of(&Database::ALL, default_database(d.project_type)),
                write: |d, idx| {
                    d.database = Database::ALL.get(idx).copied();
                    Ok(())
                },
            },
        },
        QuestionNode {
            id: "auth_mode",
            text: "Authentication type?",
            guard: Some(not_learning),
            ask: Ask::Choice {
                options: &AUTH_LABELS,
                default: |d| index_of(&AuthMode::ALL, default_auth_mode(d.project_type)),
                write: |d, idx| {
                    d.auth_mode = AuthMode::ALL.get(idx).copied();
                    Ok(())
                },
            },
        },
        QuestionNode {
            id: "docker",
            text: "Include Docker?",
            guard: Some(is_application),
            ask: Ask::Confirm {
                default: |_| true,
                write: |d, yes| d.docker = Some(yes),
            },
        },
        QuestionNode {
            id: "stripe",
            text: "Include Stripe payments?",
            guard: Some(is_saas),
            ask: Ask::Confirm {
                default: |_| true,
                write: |d, yes| d.stripe = Some(yes),
            },
        },
        QuestionNode {
            id: "email",
            text: "Include Flask-Mail?",
            guard: Some(is_saas),
            ask: Ask::Confirm {
                default: |_| true,
                write: |d, yes| d.email = Some(yes),
            },
        },
        QuestionNode {
            id: "async_queue",
            text: "Include Celery background jobs?",
            guard: Some(is_saas),
            ask: Ask::Confirm {
                default: |_| true,
                write: |d, yes| d.async_queue = Some(yes),
            },
        },
        QuestionNode {
            id: "version_control",
            text: "Initialize a Git repository?",
            guard: None,
            ask: Ask::Confirm {
                default: |_| true,
                write: |d, yes| d.version_control = Some(yes),
            },
        },
    ]
}

/// Database offered first for a project type
pub fn default_database(project_type: Option<ProjectType>) -> Database {
    match project_type {
        Some(t) if t.is_production_grade() => Database::Postgresql,
        _ => Database::Sqlite,
    }
}

/// Auth mode offered first for a project type
pub fn default_auth_mode(project_type: Option<ProjectType>) -> AuthMode {
    match project_type {
        Some(ProjectType::Api) => AuthMode::Jwt,
        _ => AuthMode::Session,
    }
}

fn index_of<T: PartialEq>(all: &[T], value: T) -> usize {
    all.iter().position(|v| *v == value).unwrap_or(0)
}

fn write_project_type(d: &mut PreferenceDraft, idx: usize) -> Result<(), ScaffoldError> {
    d.project_type = Some(ProjectType::from_index(idx)?);
    Ok(())
}

/// The name becomes a directory under the chosen parent and must stay there
pub fn check_project_name(name: &str) -> Result<(), InputError> {
    if name.contains(['/', '\\']) || name.contains("..") || name == "." {
        return Err(InputError::InvalidName);
    }
    Ok(())
}

fn name_not_prefilled(d: &PreferenceDraft) -> bool {
    d.project_name.is_none()
}

fn type_not_prefilled(d: &PreferenceDraft) -> bool {
    d.project_type.is_none()
}

fn not_learning(d: &PreferenceDraft) -> bool {
    d.project_type != Some(ProjectType::Learning)
}

fn is_application(d: &PreferenceDraft) -> bool {
    d.project_type == Some(ProjectType::Application)
}

fn is_saas(d: &PreferenceDraft) -> bool {
    d.project_type == Some(ProjectType::Saas)
}
