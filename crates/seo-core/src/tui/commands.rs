//! Commands run against an existing project in the current directory

use super::terminal::TerminalPrompter;
use crate::config::Settings;
use crate::error::ScaffoldError;
use crate::prompt;
use crate::runtime::{DbAction, ProjectCommands, RunMode};
use anyhow::Result;
use std::path::PathBuf;

/// Which `user` subcommand to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Create,
    List,
}

fn project_commands() -> ProjectCommands {
    let settings = Settings::resolve(None, None);
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    ProjectCommands::new(settings.python, dir)
}

/// `db <action>`; `migrate` asks for a message when none was given
pub async fn db(action: DbAction, message: Option<String>) -> Result<()> {
    let message = match (action, message) {
        (DbAction::Migrate, None) => {
            prompt::ask_optional_text(&mut TerminalPrompter, "Migration message (optional)")
                .map_err(ScaffoldError::from)?
        }
        (_, message) => message,
    };

    cliclack::log::step(format!("flask db {}", action))?;
    project_commands().db(action, message.as_deref()).await?;
    cliclack::log::success(format!("flask db {} done", action))?;
    Ok(())
}

pub async fn user(action: UserAction) -> Result<()> {
    let commands = project_commands();
    match action {
        UserAction::Create => {
            cliclack::intro("Create an admin user")?;
            let mut prompter = TerminalPrompter;
            let username =
                prompt::ask_text(&mut prompter, "Username", "").map_err(ScaffoldError::from)?;
            let email =
                prompt::ask_text(&mut prompter, "Email", "").map_err(ScaffoldError::from)?;
            let password =
                prompt::ask_secret(&mut prompter, "Password").map_err(ScaffoldError::from)?;
            commands.create_user(&username, &email, &password).await?;
            cliclack::outro(format!("User '{}' created", username))?;
        }
        UserAction::List => {
            println!();
            println!("  Users");
            println!();
            commands.list_users().await?;
        }
    }
    Ok(())
}

pub async fn run(mode: RunMode) -> Result<()> {
    let commands = project_commands();
    cliclack::log::info(format!(
        "Starting in {} mode: {}",
        mode.flask_env().0,
        commands.run_command(mode).display()
    ))?;
    commands.run(mode).await?;
    Ok(())
}
