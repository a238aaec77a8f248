//! Preference collection as a fixed sequence of guarded question nodes
//!
//! Each node is visited at most once, in order. A node's guard is evaluated
//! right before it would be asked, against the answers collected so far;
//! a node whose guard fails leaves its field unset.

pub mod nodes;

use crate::error::ScaffoldError;
use crate::preferences::{AuthMode, Database, PreferenceSet, ProjectType, DEFAULT_PROJECT_NAME};
use crate::prompt::{self, InputError, Prompter};

/// Answers collected so far. Every field starts unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceDraft {
    pub project_name: Option<String>,
    pub project_type: Option<ProjectType>,
    pub database: Option<Database>,
    pub auth_mode: Option<AuthMode>,
    pub docker: Option<bool>,
    pub stripe: Option<bool>,
    pub email: Option<bool>,
    pub async_queue: Option<bool>,
    pub version_control: Option<bool>,
}

impl PreferenceDraft {
    /// Turn the draft into a preference set. Skipped optional fields stay unset.
    pub fn freeze(self) -> Result<PreferenceSet, ScaffoldError> {
        let project_type = self
            .project_type
            .ok_or_else(|| ScaffoldError::UnknownProjectType("<unanswered>".to_string()))?;

        Ok(PreferenceSet {
            project_name: self
                .project_name
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            project_type,
            database: self.database,
            auth_mode: self.auth_mode,
            docker: self.docker,
            stripe: self.stripe,
            email: self.email,
            async_queue: self.async_queue,
            version_control: self.version_control.unwrap_or(false),
        })
    }
}

type Guard = fn(&PreferenceDraft) -> bool;

/// How a node asks its question and where the answer goes
pub enum Ask {
    Text {
        default: &'static str,
        check: fn(&str) -> Result<(), InputError>,
        write: fn(&mut PreferenceDraft, String),
    },
    Choice {
        options: &'static [&'static str],
        default: fn(&PreferenceDraft) -> usize,
        write: fn(&mut PreferenceDraft, usize) -> Result<(), ScaffoldError>,
    },
    Confirm {
        default: fn(&PreferenceDraft) -> bool,
        write: fn(&mut PreferenceDraft, bool),
    },
}

pub struct QuestionNode {
    pub id: &'static str,
    pub text: &'static str,
    /// `None` means the node is always visited
    pub guard: Option<Guard>,
    pub ask: Ask,
}

impl QuestionNode {
    fn should_visit(&self, draft: &PreferenceDraft) -> bool {
        self.guard.map_or(true, |guard| guard(draft))
    }

    fn visit<P: Prompter + ?Sized>(
        &self,
        draft: &mut PreferenceDraft,
        prompter: &mut P,
    ) -> Result<(), ScaffoldError> {
        match &self.ask {
            Ask::Text {
                default,
                check,
                write,
            } => {
                let answer = prompt::ask_text_checked(prompter, self.text, default, check)?;
                write(draft, answer);
            }
            Ask::Choice {
                options,
                default,
                write,
            } => {
                let default = default(draft);
                let index = prompt::ask_choice(prompter, self.text, options, default)?;
                write(draft, index)?;
            }
            Ask::Confirm { default, write } => {
                let default = default(draft);
                let answer = prompt::ask_confirm(prompter, self.text, default)?;
                write(draft, answer);
            }
        }
        Ok(())
    }
}

/// Walks the question nodes and produces a [`PreferenceSet`]
pub struct Wizard {
    nodes: Vec<QuestionNode>,
    draft: PreferenceDraft,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            nodes: nodes::questions(),
            draft: PreferenceDraft::default(),
        }
    }

    /// Pre-fill the project name; its question is then skipped.
    /// A name that would not stay inside the parent directory is dropped
    /// and asked for instead.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return self;
        }
        match nodes::check_project_name(name) {
            Ok(()) => self.draft.project_name = Some(name.to_string()),
            Err(e) => tracing::warn!(name, "ignoring project name: {}", e),
        }
        self
    }

    /// Pre-fill the project type; its question is then skipped
    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.draft.project_type = Some(project_type);
        self
    }

    /// Ask every applicable question in order.
    ///
    /// An interruption aborts the whole walk with [`ScaffoldError::Cancelled`];
    /// the partial draft is dropped.
    pub fn collect<P: Prompter + ?Sized>(
        self,
        prompter: &mut P,
    ) -> Result<PreferenceSet, ScaffoldError> {
        let Wizard { nodes, mut draft } = self;

        for node in &nodes {
            if !node.should_visit(&draft) {
                tracing::debug!(node = node.id, "skipped");
                continue;
            }
            tracing::debug!(node = node.id, "visiting");
            node.visit(&mut draft, prompter)?;
        }

        draft.freeze()
    }
}
