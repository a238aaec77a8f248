//! Configuration resolution

pub mod settings;

pub use settings::{detect_python, Settings, LOG_ENV, PYTHON_ENV, TEMPLATE_DIR_ENV};
