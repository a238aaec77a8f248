//! Applying a project plan to the filesystem
//!
//! Nothing is ever overwritten: the project directory must be absent or
//! empty, and every file is created with create-new semantics. A failure
//! halfway leaves what was already written in place.

use super::source::TemplateSource;
use crate::error::{Result, ScaffoldError};
use crate::generator::{EntryKind, ProjectPlan};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

/// Written when the tier's template directory cannot be found
const FALLBACK_APP: &str = r#"import os

from flask import Flask, render_template

app = Flask(__name__)


@app.route("/")
def index():
    return render_template("index.html")


if __name__ == "__main__":
    app.run(debug=os.environ.get("FLASK_DEBUG") == "1")
"#;

const FALLBACK_INDEX: &str = "<h1>Welcome</h1>\n";

/// Entries never copied out of a template tree
const IGNORED_NAMES: &[&str] = &["__pycache__", ".DS_Store"];

/// What [`Materializer::apply`] did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files written, relative to the project directory
    pub files: Vec<PathBuf>,
    /// The tier template was missing and the minimal skeleton was used
    pub used_fallback: bool,
}

pub struct Materializer {
    project_dir: PathBuf,
    templates: TemplateSource,
}

impl Materializer {
    pub fn new(project_dir: impl Into<PathBuf>, templates: TemplateSource) -> Self {
        Self {
            project_dir: project_dir.into(),
            templates,
        }
    }

    /// Fail if the project directory already has content
    pub async fn preflight(&self) -> Result<()> {
        let dir = &self.project_dir;
        let meta = match fs::metadata(dir).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(ScaffoldError::io("failed to inspect", dir, e)),
        };
        if !meta.is_dir() {
            return Err(ScaffoldError::conflict(dir, "path exists and is not a directory"));
        }

        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|e| ScaffoldError::io("failed to read", dir, e))?;
        let mut count = 0usize;
        while entries
            .next_entry()
            .await
            .map_err(|e| ScaffoldError::io("failed to read", dir, e))?
            .is_some()
        {
            count += 1;
        }
        if count > 0 {
            return Err(ScaffoldError::conflict(
                dir,
                format!("directory has {} existing items", count),
            ));
        }
        Ok(())
    }

    /// Create `path` and its parents; succeeds if it already is a directory
    pub async fn ensure_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| ScaffoldError::io("failed to create directory", path, e))
    }

    /// Create `path` with `content`. An existing file is a conflict.
    pub async fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.ensure_directory(parent).await?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(ScaffoldError::conflict(path, "file already exists"));
            }
            Err(e) => return Err(ScaffoldError::io("failed to create file", path, e)),
        };

        file.write_all(content)
            .await
            .map_err(|e| ScaffoldError::io("failed to write file", path, e))?;
        file.flush()
            .await
            .map_err(|e| ScaffoldError::io("failed to write file", path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }

    /// Copy a file or directory tree from `source` to `dest`.
    /// Returns the copied files relative to `dest`.
    pub async fn copy_tree(&self, source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
        let mut copied = Vec::new();

        let walker = WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.file_name()
                    .to_str()
                    .map_or(true, |name| !IGNORED_NAMES.contains(&name) && !name.ends_with(".pyc"))
            });

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source).to_path_buf();
                ScaffoldError::io("failed to walk", path, e.into())
            })?;
            let rel = entry.path().strip_prefix(source).unwrap_or(entry.path());
            let target = if rel.as_os_str().is_empty() {
                dest.to_path_buf()
            } else {
                dest.join(rel)
            };

            if entry.file_type().is_dir() {
                self.ensure_directory(&target).await?;
            } else {
                let content = fs::read(entry.path())
                    .await
                    .map_err(|e| ScaffoldError::io("failed to read template", entry.path(), e))?;
                self.write_file(&target, &content).await?;
                copied.push(rel.to_path_buf());
            }
        }

        Ok(copied)
    }

    /// Write every manifest entry of `plan` into the project directory
    pub async fn apply(&self, plan: &ProjectPlan) -> Result<MaterializeReport> {
        self.preflight().await?;
        self.ensure_directory(&self.project_dir).await?;

        let mut report = MaterializeReport::default();
        let tier_dir = self.templates.tier_dir(plan.tier);
        let has_template = self.templates.has_tier(plan.tier);

        if !has_template {
            tracing::warn!(
                template = %tier_dir.display(),
                "template not found, writing minimal skeleton"
            );
            report.used_fallback = true;
            for (rel, content) in [
                ("app.py", FALLBACK_APP),
                ("templates/index.html", FALLBACK_INDEX),
            ] {
                self.write_file(&self.project_dir.join(rel), content.as_bytes())
                    .await?;
                report.files.push(PathBuf::from(rel));
            }
        }

        for entry in &plan.manifest {
            let target = self.project_dir.join(&entry.path);
            match &entry.kind {
                EntryKind::CopyFromTemplate => {
                    if !has_template {
                        continue;
                    }
                    let source = tier_dir.join(&entry.path);
                    if !source.exists() {
                        return Err(ScaffoldError::io(
                            "template entry missing",
                            source,
                            std::io::ErrorKind::NotFound.into(),
                        ));
                    }
                    let copied = self.copy_tree(&source, &target).await?;
                    let base = Path::new(&entry.path);
                    report.files.extend(copied.into_iter().map(|rel| {
                        if rel.as_os_str().is_empty() {
                            base.to_path_buf()
                        } else {
                            base.join(rel)
                        }
                    }));
                }
                EntryKind::GenerateInline { content } => {
                    self.write_file(&target, content.as_bytes()).await?;
                    report.files.push(PathBuf::from(&entry.path));
                }
                EntryKind::Directory => {
                    self.ensure_directory(&target).await?;
                }
            }
        }

        tracing::info!(
            dir = %self.project_dir.display(),
            files = report.files.len(),
            "project materialized"
        );
        Ok(report)
    }
}
