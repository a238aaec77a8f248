//! Template lookup and plan materialization
//!
//! This module provides:
//! - Template root resolution (bundled, `--template-dir` or `SEO_TEMPLATE_DIR`)
//! - The [`Materializer`] that writes a [`ProjectPlan`](crate::generator::ProjectPlan) to disk

pub mod copier;
pub mod source;

pub use copier::{MaterializeReport, Materializer};
pub use source::TemplateSource;
