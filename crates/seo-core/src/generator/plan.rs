//! The immutable output of a project generator

use super::Tier;
use serde::Serialize;

/// Name of the dependency manifest written at the project root
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// How a manifest entry is produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum EntryKind {
    /// Copied from the tier's template directory (file or whole tree)
    CopyFromTemplate,
    /// Written from content computed during planning
    GenerateInline {
        #[serde(skip_serializing)]
        content: String,
    },
    /// An empty directory
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl ManifestEntry {
    pub fn template(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: EntryKind::CopyFromTemplate,
        }
    }

    pub fn inline(path: &str, content: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            kind: EntryKind::GenerateInline {
                content: content.into(),
            },
        }
    }

    pub fn directory(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: EntryKind::Directory,
        }
    }
}

/// Steps run after the files are on disk, in plan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostAction {
    InstallPackages,
    InitVersionControl,
}

impl PostAction {
    /// Best-effort actions only warn when they fail
    pub fn is_best_effort(&self) -> bool {
        matches!(self, PostAction::InitVersionControl)
    }

    pub fn description(&self) -> &'static str {
        match self {
            PostAction::InstallPackages => "Install Python packages",
            PostAction::InitVersionControl => "Initialize Git repository",
        }
    }
}

/// Everything needed to materialize one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPlan {
    pub project_name: String,
    pub tier: Tier,
    pub packages: Vec<String>,
    pub manifest: Vec<ManifestEntry>,
    pub post_actions: Vec<PostAction>,
}

impl ProjectPlan {
    pub fn has_action(&self, action: PostAction) -> bool {
        self.post_actions.contains(&action)
    }

    /// Drop a post-action (e.g. `--no-install`). Returns whether it was planned.
    pub fn skip_action(&mut self, action: PostAction) -> bool {
        let before = self.post_actions.len();
        self.post_actions.retain(|a| *a != action);
        before != self.post_actions.len()
    }

    pub fn entry(&self, path: &str) -> Option<&ManifestEntry> {
        self.manifest.iter().find(|e| e.path == path)
    }
}

/// Ordered package list; duplicates are dropped at their later occurrences
#[derive(Debug, Default)]
pub(crate) struct PackageList {
    packages: Vec<String>,
}

impl PackageList {
    pub(crate) fn extend<'a>(&mut self, packages: impl IntoIterator<Item = &'a str>) {
        for package in packages {
            self.push(package);
        }
    }

    pub(crate) fn push(&mut self, package: &str) {
        if !self.packages.iter().any(|p| p == package) {
            self.packages.push(package.to_string());
        }
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.packages
    }
}

/// One package specifier per line
pub fn render_requirements(packages: &[String]) -> String {
    let mut out = packages.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_list_keeps_first_occurrence() {
        let mut list = PackageList::default();
        list.extend(["flask", "flask-jwt-extended", "gunicorn"]);
        list.push("flask-jwt-extended");
        list.extend(["redis", "flask"]);
        assert_eq!(
            list.into_vec(),
            vec!["flask", "flask-jwt-extended", "gunicorn", "redis"]
        );
    }

    #[test]
    fn test_render_requirements() {
        let packages = vec!["flask".to_string(), "python-dotenv".to_string()];
        assert_eq!(render_requirements(&packages), "flask\npython-dotenv\n");
    }

    #[test]
    fn test_post_action_severity() {
        assert!(PostAction::InitVersionControl.is_best_effort());
        assert!(!PostAction::InstallPackages.is_best_effort());
    }

    #[test]
    fn test_inline_content_not_serialized() {
        let entry = ManifestEntry::inline("README.md", "# secret body");
        let yaml = serde_yaml::to_string(&entry).unwrap();
        assert!(yaml.contains("generate-inline"));
        assert!(!yaml.contains("secret body"));
    }
}
