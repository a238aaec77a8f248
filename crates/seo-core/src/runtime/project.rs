//! Commands delegated to a generated project (migrations, users, dev server)
//!
//! Everything here runs the project's own Python code; nothing is
//! reimplemented on the Rust side.

use super::tool::ToolCommand;
use crate::error::ScaffoldError;
use std::fmt;
use std::path::{Path, PathBuf};

const USERNAME_ENV: &str = "SEO_USERNAME";
const EMAIL_ENV: &str = "SEO_EMAIL";
const PASSWORD_ENV: &str = "SEO_PASSWORD";

/// Values arrive through the environment so they are never parsed as code
const CREATE_USER_SCRIPT: &str = r#"import os
from app import create_app, db
from app.models import User

app = create_app()
with app.app_context():
    user = User(
        username=os.environ["SEO_USERNAME"],
        email=os.environ["SEO_EMAIL"],
        is_admin=True,
    )
    user.set_password(os.environ["SEO_PASSWORD"])
    db.session.add(user)
    db.session.commit()
    print(f"User '{user.username}' created")
"#;

const LIST_USERS_SCRIPT: &str = r#"from app import create_app
from app.models import User

app = create_app()
with app.app_context():
    for user in User.query.order_by(User.username).all():
        print(f"  {user.username}")
"#;

/// Entry scripts probed by `run`, in order
const ENTRY_SCRIPTS: &[&str] = &["run.py", "app.py", "wsgi.py"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbAction {
    Init,
    Migrate,
    Upgrade,
    Downgrade,
}

impl DbAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbAction::Init => "init",
            DbAction::Migrate => "migrate",
            DbAction::Upgrade => "upgrade",
            DbAction::Downgrade => "downgrade",
        }
    }
}

impl fmt::Display for DbAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Dev,
    Prod,
}

impl RunMode {
    /// `FLASK_ENV` and `FLASK_DEBUG` values
    pub fn flask_env(&self) -> (&'static str, &'static str) {
        match self {
            RunMode::Dev => ("development", "1"),
            RunMode::Prod => ("production", "0"),
        }
    }
}

/// How the application gets started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    Script(&'static str),
    FlaskRun,
}

/// First entry script present in `dir`, else `flask run`
pub fn detect_entry_point(dir: &Path) -> EntryPoint {
    ENTRY_SCRIPTS
        .iter()
        .copied()
        .find(|name| dir.join(name).is_file())
        .map(EntryPoint::Script)
        .unwrap_or(EntryPoint::FlaskRun)
}

/// Builds and runs delegated commands inside one project directory
#[derive(Debug, Clone)]
pub struct ProjectCommands {
    python: String,
    project_dir: PathBuf,
}

impl ProjectCommands {
    pub fn new(python: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            project_dir: project_dir.into(),
        }
    }

    fn python(&self) -> ToolCommand {
        ToolCommand::new(&self.python).current_dir(&self.project_dir)
    }

    pub fn db_command(&self, action: DbAction, message: Option<&str>) -> ToolCommand {
        let mut cmd = self.python().args(["-m", "flask", "db", action.as_str()]);
        if action == DbAction::Migrate {
            if let Some(message) = message.filter(|m| !m.is_empty()) {
                cmd = cmd.arg("-m").arg(message);
            }
        }
        cmd
    }

    pub async fn db(&self, action: DbAction, message: Option<&str>) -> Result<(), ScaffoldError> {
        self.db_command(action, message).run_attached().await
    }

    pub fn create_user_command(&self, username: &str, email: &str, password: &str) -> ToolCommand {
        self.python()
            .arg("-c")
            .arg(CREATE_USER_SCRIPT)
            .env(USERNAME_ENV, username)
            .env(EMAIL_ENV, email)
            .env(PASSWORD_ENV, password)
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ScaffoldError> {
        self.create_user_command(username, email, password)
            .run_attached()
            .await
    }

    pub fn list_users_command(&self) -> ToolCommand {
        self.python().arg("-c").arg(LIST_USERS_SCRIPT)
    }

    pub async fn list_users(&self) -> Result<(), ScaffoldError> {
        self.list_users_command().run_attached().await
    }

    pub fn run_command(&self, mode: RunMode) -> ToolCommand {
        let (flask_env, debug) = mode.flask_env();
        let cmd = match detect_entry_point(&self.project_dir) {
            EntryPoint::Script(script) => self.python().arg(script),
            EntryPoint::FlaskRun => {
                let cmd = self.python().args(["-m", "flask", "run"]);
                if mode == RunMode::Dev {
                    cmd.arg("--debug")
                } else {
                    cmd
                }
            }
        };
        cmd.env("FLASK_ENV", flask_env).env("FLASK_DEBUG", debug)
    }

    pub async fn run(&self, mode: RunMode) -> Result<(), ScaffoldError> {
        self.run_command(mode).run_attached().await
    }
}
