//! User preference record built by the wizard

use crate::error::ScaffoldError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Project name used when the user accepts the default
pub const DEFAULT_PROJECT_NAME: &str = "my-project";

/// Project archetypes, in the order they are offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Learning,
    Application,
    Api,
    Saas,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::Learning,
        ProjectType::Application,
        ProjectType::Api,
        ProjectType::Saas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Learning => "learning",
            ProjectType::Application => "application",
            ProjectType::Api => "api",
            ProjectType::Saas => "saas",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Learning => "Learning (simple, to get started)",
            ProjectType::Application => "Web application (full MVC structure)",
            ProjectType::Api => "Professional API (production-ready)",
            ProjectType::Saas => "SaaS startup (auth, payments, dashboard)",
        }
    }

    /// API and SaaS projects are meant to be deployed
    pub fn is_production_grade(&self) -> bool {
        matches!(self, ProjectType::Api | ProjectType::Saas)
    }

    /// Map a zero-based wizard choice to a project type
    pub fn from_index(index: usize) -> Result<Self, ScaffoldError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| ScaffoldError::UnknownProjectType(format!("choice #{}", index + 1)))
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "learning" => Ok(ProjectType::Learning),
            "application" | "app" => Ok(ProjectType::Application),
            "api" => Ok(ProjectType::Api),
            "saas" => Ok(ProjectType::Saas),
            _ => Err(ScaffoldError::UnknownProjectType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Sqlite,
    Postgresql,
    Mysql,
}

impl Database {
    pub const ALL: [Database; 3] = [Database::Sqlite, Database::Postgresql, Database::Mysql];

    pub const fn display_name(&self) -> &'static str {
        match self {
            Database::Sqlite => "SQLite (simple, local file)",
            Database::Postgresql => "PostgreSQL (recommended for production)",
            Database::Mysql => "MySQL (compatible, widely used)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Sqlite => "sqlite",
            Database::Postgresql => "postgresql",
            Database::Mysql => "mysql",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Session,
    Jwt,
    Oauth,
}

impl AuthMode {
    pub const ALL: [AuthMode; 3] = [AuthMode::Session, AuthMode::Jwt, AuthMode::Oauth];

    pub const fn display_name(&self) -> &'static str {
        match self {
            AuthMode::Session => "Classic session (Flask cookies)",
            AuthMode::Jwt => "JWT (tokens, for APIs)",
            AuthMode::Oauth => "OAuth2 (Google, GitHub, ...)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Session => "session",
            AuthMode::Jwt => "jwt",
            AuthMode::Oauth => "oauth",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated record of user choices driving generation.
///
/// Optional fields are `None` when the question was skipped; a skipped
/// field is never filled with a value that looks like a real answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceSet {
    pub project_name: String,
    pub project_type: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Database>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<AuthMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub async_queue: Option<bool>,
    pub version_control: bool,
}

impl PreferenceSet {
    /// A set with only the required fields populated
    pub fn new(project_name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            project_name: project_name.into(),
            project_type,
            database: None,
            auth_mode: None,
            docker: None,
            stripe: None,
            email: None,
            async_queue: None,
            version_control: false,
        }
    }

    pub fn docker_enabled(&self) -> bool {
        self.docker.unwrap_or(false)
    }

    pub fn stripe_enabled(&self) -> bool {
        self.stripe.unwrap_or(false)
    }

    pub fn email_enabled(&self) -> bool {
        self.email.unwrap_or(false)
    }

    pub fn async_queue_enabled(&self) -> bool {
        self.async_queue.unwrap_or(false)
    }

    /// Human-readable summary shown before the user confirms
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Project:  {}", self.project_name),
            format!("Type:     {}", self.project_type),
        ];
        if let Some(db) = self.database {
            lines.push(format!("Database: {}", db));
        }
        if let Some(auth) = self.auth_mode {
            lines.push(format!("Auth:     {}", auth));
        }
        for (label, enabled) in [
            ("Docker", self.docker_enabled()),
            ("Stripe", self.stripe_enabled()),
            ("Email", self.email_enabled()),
            ("Celery", self.async_queue_enabled()),
            ("Git", self.version_control),
        ] {
            if enabled {
                lines.push(format!("{}: yes", label));
            }
        }
        lines
    }
}
