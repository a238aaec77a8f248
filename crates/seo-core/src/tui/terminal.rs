//! [`Prompter`] backed by cliclack widgets

use crate::prompt::{InputError, Prompt, PromptError, PromptKind, Prompter};

/// Reads answers from the terminal.
///
/// Widgets hand back the raw form the shared parsers expect: 1-based
/// numbers for choices, `yes`/`no` for confirmations and an empty string
/// when a text field is left blank.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read(&mut self, prompt: &Prompt<'_>) -> Result<String, PromptError> {
        let answer = match prompt.kind {
            PromptKind::Choice { options, default } => {
                let mut select = cliclack::select(prompt.text);
                for (idx, label) in options.iter().enumerate() {
                    select = select.item(idx, label, "");
                }
                let idx: usize = select.initial_value(default).interact()?;
                (idx + 1).to_string()
            }
            PromptKind::Text { default } => cliclack::input(prompt.text)
                .placeholder(default)
                .required(false)
                .interact()?,
            PromptKind::Confirm { default } => {
                let yes: bool = cliclack::confirm(prompt.text)
                    .initial_value(default)
                    .interact()?;
                if yes { "yes" } else { "no" }.to_string()
            }
            PromptKind::Secret => cliclack::password(prompt.text).mask('▪').interact()?,
        };
        Ok(answer)
    }

    fn reject(&mut self, _prompt: &Prompt<'_>, error: &InputError) -> Result<(), PromptError> {
        cliclack::log::warning(error)?;
        Ok(())
    }

    fn info(&mut self, message: &str) -> Result<(), PromptError> {
        cliclack::log::info(message)?;
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<(), PromptError> {
        cliclack::log::warning(message)?;
        Ok(())
    }
}
