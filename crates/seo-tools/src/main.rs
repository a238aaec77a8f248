//! SEO CLI - Interactive scaffolding for Flask projects

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use seo_core::config::LOG_ENV;
use seo_core::runtime::{DbAction, RunMode};
use seo_core::tui::{commands, CreateArgs, UserAction};
use seo_core::{PostAction, PreferenceSet, ProductConfig, ProjectType, ScaffoldError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// SEO product configuration
#[derive(Clone)]
pub struct SeoConfig;

impl ProductConfig for SeoConfig {
    fn name(&self) -> &'static str {
        "seo"
    }

    fn display_name(&self) -> &'static str {
        "SEO - Flask project scaffolder"
    }

    fn docs_url(&self) -> &'static str {
        "https://flask.palletsprojects.com"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding Flask backend projects"
    }

    fn next_steps(&self, dir: &Path, prefs: &PreferenceSet, pending: &[PostAction]) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Set up Python environment when pip did not run
        if pending.contains(&PostAction::InstallPackages) {
            steps.push(
                "Set up Python environment:\n\
                      python3 -m venv .venv && .venv/bin/pip install -r requirements.txt"
                    .to_string(),
            );
        }

        if pending.contains(&PostAction::InitVersionControl) {
            steps.push("git init".to_string());
        }

        // Step 3: Configuration and database
        if prefs.project_type != ProjectType::Learning {
            steps.push("cp .env.example .env".to_string());
            steps.push(format!(
                "{} db init && {} db migrate && {} db upgrade",
                self.name(),
                self.name(),
                self.name()
            ));
            steps.push(format!("{} user create", self.name()));
        }

        if prefs.docker_enabled() {
            steps.push("docker compose up --build".to_string());
        }

        // Step 4: Start dev server
        steps.push(format!("{} run", self.name()));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Flask project
    Create(CliCreateArgs),
    /// Manage database migrations (run inside a project)
    Db {
        #[arg(value_enum)]
        action: CliDbAction,
        /// Migration message (migrate only)
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Manage users (run inside a project)
    User {
        #[arg(value_enum)]
        action: CliUserAction,
    },
    /// Start the application (run inside a project)
    Run {
        #[arg(value_enum, default_value_t = CliRunMode::Dev)]
        mode: CliRunMode,
    },
    /// Show the command reference
    Help,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name
    pub name: Option<String>,

    /// Project type (learning, application, api, saas)
    #[arg(short = 't', long = "type")]
    pub project_type: Option<ProjectType>,

    /// Parent directory of the new project
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Python interpreter used to install packages
    #[arg(long)]
    pub python: Option<String>,

    /// Accept every default (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Print the plan as YAML without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Do not install Python packages
    #[arg(long = "no-install")]
    pub no_install: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            project_type: args.project_type,
            directory: args.directory,
            template_dir: args.template_dir,
            python: args.python,
            yes: args.yes,
            dry_run: args.dry_run,
            no_install: args.no_install,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CliDbAction {
    Init,
    Migrate,
    Upgrade,
    Downgrade,
}

impl From<CliDbAction> for DbAction {
    fn from(action: CliDbAction) -> Self {
        match action {
            CliDbAction::Init => DbAction::Init,
            CliDbAction::Migrate => DbAction::Migrate,
            CliDbAction::Upgrade => DbAction::Upgrade,
            CliDbAction::Downgrade => DbAction::Downgrade,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CliUserAction {
    Create,
    List,
}

impl From<CliUserAction> for UserAction {
    fn from(action: CliUserAction) -> Self {
        match action {
            CliUserAction::Create => UserAction::Create,
            CliUserAction::List => UserAction::List,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliRunMode {
    Dev,
    Prod,
}

impl From<CliRunMode> for RunMode {
    fn from(mode: CliRunMode) -> Self {
        match mode {
            CliRunMode::Dev => RunMode::Dev,
            CliRunMode::Prod => RunMode::Prod,
        }
    }
}

/// Command definition branded from the product configuration
fn cli<C: ProductConfig>(config: &C) -> clap::Command {
    Args::command()
        .name(config.name())
        .about(config.cli_description())
}

fn parse_args<C, I, T>(config: &C, argv: I) -> Result<Args, clap::Error>
where
    C: ProductConfig,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = cli(config).try_get_matches_from(argv)?;
    Args::from_arg_matches(&matches)
}

fn print_help() {
    let section = |title: &str| println!("\n  {}", title.bold());
    let line = |cmd: &str, what: &str| println!("    {:<28} {}", cmd.cyan(), what.dimmed());

    println!("\n{}", "SEO commands".bold().green());

    section("Projects");
    line("seo create [name]", "Create a new Flask project");
    line("seo create --yes", "Create with every default");
    line("seo create --dry-run", "Show the plan without writing");

    section("Database");
    line("seo db init", "Initialize migrations");
    line("seo db migrate [-m msg]", "Create a migration");
    line("seo db upgrade", "Apply migrations");
    line("seo db downgrade", "Revert the last migration");

    section("Users");
    line("seo user create", "Create an admin user");
    line("seo user list", "List users");

    section("Running");
    line("seo run [dev|prod]", "Start the application");
    println!();
}

/// Diagnostics go to stderr, filtered by `SEO_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn dispatch(command: Command) -> Result<()> {
    let config = SeoConfig;
    match command {
        Command::Create(create_args) => seo_core::run(&config, create_args.into()).await,
        Command::Db { action, message } => commands::db(action.into(), message).await,
        Command::User { action } => commands::user(action.into()).await,
        Command::Run { mode } => commands::run(mode.into()).await,
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();

    let args = match parse_args(&SeoConfig, std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    let Some(command) = args.command else {
        print_help();
        return ExitCode::SUCCESS;
    };

    let result = dispatch(command).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<ScaffoldError>().is_some_and(|e| e.is_cancelled()) => {
            let _ = cliclack::outro_cancel("Cancelled, nothing was created.");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli(&SeoConfig).debug_assert();
    }

    #[test]
    fn test_help_text_uses_product_description() {
        let help = cli(&SeoConfig).render_help().to_string();
        assert!(help.contains(SeoConfig.cli_description()));
        assert_eq!(cli(&SeoConfig).get_name(), "seo");
    }

    #[test]
    fn test_create_flags() {
        let args = parse_args(&SeoConfig, [
            "seo", "create", "blog", "--type", "api", "--yes", "--no-install", "-d", "/tmp",
        ])
        .unwrap();
        let Some(Command::Create(create)) = args.command else {
            panic!("expected create");
        };
        let create: CreateArgs = create.into();
        assert_eq!(create.name.as_deref(), Some("blog"));
        assert_eq!(create.project_type, Some(ProjectType::Api));
        assert!(create.yes && create.no_install && !create.dry_run);
        assert_eq!(create.directory, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_unknown_project_type_is_rejected() {
        assert!(parse_args(&SeoConfig, ["seo", "create", "--type", "desktop"]).is_err());
    }

    #[test]
    fn test_run_defaults_to_dev() {
        let args = parse_args(&SeoConfig, ["seo", "run"]).unwrap();
        assert!(matches!(args.command, Some(Command::Run { mode: CliRunMode::Dev })));
    }

    #[test]
    fn test_help_and_no_subcommand() {
        assert!(matches!(
            parse_args(&SeoConfig, ["seo", "help"]).unwrap().command,
            Some(Command::Help)
        ));
        assert!(parse_args(&SeoConfig, ["seo"]).unwrap().command.is_none());
    }

    #[test]
    fn test_next_steps_for_learning_project() {
        let prefs = PreferenceSet::new("demo", ProjectType::Learning);
        let steps = SeoConfig.next_steps(Path::new("/nonexistent/demo"), &prefs, &[]);
        assert_eq!(steps, ["cd /nonexistent/demo", "seo run"]);
    }

    #[test]
    fn test_next_steps_list_pending_install() {
        let mut prefs = PreferenceSet::new("svc", ProjectType::Api);
        prefs.docker = Some(true);
        let steps = SeoConfig.next_steps(
            Path::new("/nonexistent/svc"),
            &prefs,
            &[PostAction::InstallPackages],
        );
        assert!(steps[1].contains("pip install -r requirements.txt"));
        assert!(steps.contains(&"docker compose up --build".to_string()));
        assert!(steps.contains(&"seo user create".to_string()));
    }
}
