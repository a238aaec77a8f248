//! SEO Core - Interactive scaffolding of Flask projects
//!
//! This library turns a short question-and-answer session into a Flask
//! project on disk. It is used by the `seo` binary but can be driven by any
//! front-end that implements [`Prompter`].
//!
//! # Architecture
//!
//! The pipeline is organized into layers:
//!
//! - **Layer 1: Decisions** - [`wizard`] asks guarded questions, [`policy`]
//!   reconciles the answers, [`generator`] derives an immutable [`ProjectPlan`]
//! - **Layer 2: Effects** - [`templates::Materializer`] writes the plan,
//!   [`runtime`] runs pip, git and the project's own commands
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! Layer 1 never touches the filesystem, so an interrupted or declined
//! session leaves nothing behind.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based terminal prompter and `create` flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use seo_core::{session, prompt::ScriptedPrompter, wizard::Wizard};
//!
//! let mut answers = ScriptedPrompter::new(["blog", "1", "y", "y"]);
//! let prepared = session::prepare(Wizard::new(), &mut answers)?.expect("confirmed");
//! let materializer = Materializer::new("blog", TemplateSource::bundled());
//! materializer.apply(&prepared.plan).await?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod policy;
pub mod preferences;
pub mod product;
pub mod prompt;
pub mod runtime;
pub mod session;
pub mod templates;
pub mod wizard;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use generator::{PostAction, ProjectGenerator, ProjectPlan};
pub use preferences::{AuthMode, Database, PreferenceSet, ProjectType};
pub use product::ProductConfig;
pub use prompt::Prompter;
pub use session::Prepared;
pub use templates::{Materializer, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
