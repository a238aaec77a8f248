//! The interactive `create` flow

use super::terminal::TerminalPrompter;
use crate::config::Settings;
use crate::error::ScaffoldError;
use crate::generator::{PostAction, ProjectPlan};
use crate::preferences::{PreferenceSet, ProjectType};
use crate::product::ProductConfig;
use crate::prompt::DefaultsPrompter;
use crate::runtime::{actions, check, PackageInstaller, PostActionOutcome};
use crate::session::{self, Prepared};
use crate::templates::Materializer;
use crate::wizard::Wizard;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name; skips the name question
    pub name: Option<String>,

    /// Project type; skips the type question
    pub project_type: Option<ProjectType>,

    /// Parent directory of the new project
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Python interpreter for the package install
    pub python: Option<String>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Print the plan instead of writing it
    pub dry_run: bool,

    /// Leave package installation to the user
    pub no_install: bool,
}

#[derive(Serialize)]
struct DryRun<'a> {
    preferences: &'a PreferenceSet,
    plan: &'a ProjectPlan,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let settings = Settings::resolve(args.template_dir.clone(), args.python.clone());
    if args.template_dir.is_some() {
        cliclack::log::info(format!(
            "Using local templates from {}",
            settings.templates.root().display()
        ))?;
    }

    // Step 1: Questions, policy and plan
    let Some(Prepared {
        preferences,
        mut plan,
    }) = prepare(&args)?
    else {
        cliclack::outro("Nothing was created.")?;
        return Ok(());
    };

    if args.no_install && plan.skip_action(PostAction::InstallPackages) {
        cliclack::log::info("Skipping package installation (--no-install)")?;
    }

    // Step 2: Dry run stops before anything is written
    if args.dry_run {
        let yaml = serde_yaml::to_string(&DryRun {
            preferences: &preferences,
            plan: &plan,
        })
        .context("failed to render plan")?;
        cliclack::outro("Dry run, nothing was written")?;
        println!("{}", yaml);
        return Ok(());
    }

    // Step 3: Resolve the project directory
    let project_dir = project_directory(&args, &preferences.project_name)?;

    // Step 4: Check runtimes the post-actions need
    check_runtimes(&settings, &plan)?;

    // Step 5: Write the files
    create_project(&settings, &plan, &project_dir).await?;

    // Step 6: Post-actions
    let outcome = run_post_actions(&settings, &plan, &project_dir).await?;

    // Step 7: Show next steps
    print_next_steps(config, &project_dir, &preferences, &outcome.pending)?;

    outcome
        .into_result()
        .context("project created but not ready to run")?;
    Ok(())
}

fn prepare(args: &CreateArgs) -> Result<Option<Prepared>> {
    let mut wizard = Wizard::new();
    if let Some(name) = &args.name {
        wizard = wizard.with_project_name(name.as_str());
    }
    if let Some(project_type) = args.project_type {
        wizard = wizard.with_project_type(project_type);
    }

    let prepared = if args.yes {
        session::prepare(wizard, &mut DefaultsPrompter::new(TerminalPrompter))?
    } else {
        session::prepare(wizard, &mut TerminalPrompter)?
    };
    Ok(prepared)
}

fn project_directory(args: &CreateArgs, project_name: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let parent = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !parent.is_dir() {
        anyhow::bail!("Parent directory does not exist: {}", parent.display());
    }

    let path = parent.join(project_name);
    cliclack::log::info(format!("Using directory: {}", path.display()))?;
    Ok(path)
}

fn check_runtimes(settings: &Settings, plan: &ProjectPlan) -> Result<()> {
    let mut required = Vec::new();
    let mut advisory = Vec::new();
    if plan.has_action(PostAction::InstallPackages) {
        required.push(check::Runtime::Python);
    }
    if plan.has_action(PostAction::InitVersionControl) {
        advisory.push(check::Runtime::Git);
    }
    if required.is_empty() && advisory.is_empty() {
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes_with_advisory(&settings.python, &required, &advisory) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes.iter().map(|r| r.describe()).collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing runtimes or pass --no-install.");
        }
    }
}

async fn create_project(
    settings: &Settings,
    plan: &ProjectPlan,
    project_dir: &Path,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let materializer = Materializer::new(project_dir, settings.templates.clone());
    let report = match materializer.apply(plan).await {
        Ok(report) => report,
        Err(e) => {
            spinner.error("Project creation failed");
            return Err(e.into());
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        report.files.len(),
        project_dir.display()
    ));

    if report.used_fallback {
        cliclack::log::warning(format!(
            "Template {} not found, a minimal skeleton was written instead",
            settings.templates.tier_dir(plan.tier).display()
        ))?;
    }

    Ok(())
}

async fn run_post_actions(
    settings: &Settings,
    plan: &ProjectPlan,
    project_dir: &Path,
) -> Result<PostActionOutcome> {
    let python = settings.python.as_str();

    let mut outcome = actions::run_all(
        &plan.post_actions,
        |action| async move {
            cliclack::log::step(action.description()).map_err(ScaffoldError::Terminal)?;
            actions::execute(action, python, project_dir).await
        },
        |action, result| {
            let logged = match result {
                Ok(()) => cliclack::log::success(format!("{} done", action.description())),
                Err(e) if action.is_best_effort() => cliclack::log::warning(format!(
                    "{} skipped: {}",
                    action.description(),
                    e
                )),
                Err(e) => {
                    let installer = PackageInstaller::new(python, project_dir);
                    cliclack::log::error(format!("{}", e)).and_then(|()| {
                        cliclack::log::info(format!("Install manually: {}", installer.manual_hint()))
                    })
                }
            };
            logged.map_err(ScaffoldError::Terminal)
        },
    )
    .await?;

    // Installation dropped by --no-install is still a step for the user
    if !plan.has_action(PostAction::InstallPackages) {
        outcome.pending.insert(0, PostAction::InstallPackages);
    }

    Ok(outcome)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    preferences: &PreferenceSet,
    pending: &[PostAction],
) -> Result<()> {
    let steps = config.next_steps(project_dir, preferences, pending);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Docs: {}", config.docs_url()))?;

    Ok(())
}
