//! Prompters that do not need a terminal

use super::{InputError, Prompt, PromptError, PromptKind, Prompter};
use std::collections::VecDeque;

/// Replays a fixed list of answers. Running out of answers behaves like
/// the user pressing Ctrl+C.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
    rejections: Vec<InputError>,
    messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Text of every prompt that was read, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn rejections(&self) -> &[InputError] {
        &self.rejections
    }

    /// Info and warning messages, in order
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Answers that were never consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read(&mut self, prompt: &Prompt<'_>) -> Result<String, PromptError> {
        self.asked.push(prompt.text.to_string());
        self.answers.pop_front().ok_or(PromptError::Interrupted)
    }

    fn reject(&mut self, _prompt: &Prompt<'_>, error: &InputError) -> Result<(), PromptError> {
        self.rejections.push(error.clone());
        Ok(())
    }

    fn info(&mut self, message: &str) -> Result<(), PromptError> {
        self.messages.push(message.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<(), PromptError> {
        self.messages.push(message.to_string());
        Ok(())
    }
}

/// Accepts the default of every question that has one (`--yes` mode).
/// Questions without a default and all output go to the wrapped prompter.
pub struct DefaultsPrompter<P> {
    inner: P,
}

impl<P: Prompter> DefaultsPrompter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Prompter> Prompter for DefaultsPrompter<P> {
    fn read(&mut self, prompt: &Prompt<'_>) -> Result<String, PromptError> {
        match prompt.kind {
            PromptKind::Choice { .. } | PromptKind::Confirm { .. } => Ok(String::new()),
            PromptKind::Text { default } if !default.is_empty() => Ok(String::new()),
            PromptKind::Text { .. } | PromptKind::Secret => self.inner.read(prompt),
        }
    }

    fn reject(&mut self, prompt: &Prompt<'_>, error: &InputError) -> Result<(), PromptError> {
        self.inner.reject(prompt, error)
    }

    fn info(&mut self, message: &str) -> Result<(), PromptError> {
        self.inner.info(message)
    }

    fn warn(&mut self, message: &str) -> Result<(), PromptError> {
        self.inner.warn(message)
    }
}
