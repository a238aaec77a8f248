//! The prompting boundary between the core and the terminal
//!
//! A [`Prompter`] only returns what the user typed. Parsing and validation
//! happen here so that the retry rules are identical for the terminal,
//! for `--yes` mode and for scripted tests.

mod scripted;

pub use scripted::{DefaultsPrompter, ScriptedPrompter};

use crate::error::ScaffoldError;
use std::io;
use thiserror::Error;

/// What kind of answer a prompt expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind<'a> {
    /// Pick one of `options`; answered with a 1-based number
    Choice {
        options: &'a [&'a str],
        default: usize,
    },
    /// Free text, empty means `default`
    Text { default: &'a str },
    /// Yes/no question
    Confirm { default: bool },
    /// Masked free text
    Secret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    pub text: &'a str,
    pub kind: PromptKind<'a>,
}

impl<'a> Prompt<'a> {
    pub fn choice(text: &'a str, options: &'a [&'a str], default: usize) -> Self {
        Self {
            text,
            kind: PromptKind::Choice { options, default },
        }
    }

    pub fn text(text: &'a str, default: &'a str) -> Self {
        Self {
            text,
            kind: PromptKind::Text { default },
        }
    }

    pub fn confirm(text: &'a str, default: bool) -> Self {
        Self {
            text,
            kind: PromptKind::Confirm { default },
        }
    }

    pub fn secret(text: &'a str) -> Self {
        Self {
            text,
            kind: PromptKind::Secret,
        }
    }
}

/// Failure to obtain an answer at all
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            PromptError::Interrupted
        } else {
            PromptError::Io(err)
        }
    }
}

impl From<PromptError> for ScaffoldError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => ScaffoldError::Cancelled,
            PromptError::Io(e) => ScaffoldError::Terminal(e),
        }
    }
}

/// A malformed answer. Recovered locally by asking again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please enter a valid number")]
    NotANumber,

    #[error("please choose between 1 and {max}")]
    OutOfRange { max: usize },

    #[error("please answer yes or no")]
    NotYesNo,

    #[error("a value is required")]
    Empty,

    #[error("a project name cannot contain path separators or '..'")]
    InvalidName,
}

/// Source of raw answers
pub trait Prompter {
    /// Ask a question and return the raw answer (empty means "use default")
    fn read(&mut self, prompt: &Prompt<'_>) -> Result<String, PromptError>;

    /// Tell the user why their last answer was rejected
    fn reject(&mut self, prompt: &Prompt<'_>, error: &InputError) -> Result<(), PromptError>;

    fn info(&mut self, message: &str) -> Result<(), PromptError>;

    fn warn(&mut self, message: &str) -> Result<(), PromptError>;
}

/// Parse a 1-based choice into a zero-based index
pub fn parse_choice(raw: &str, option_count: usize, default: usize) -> Result<usize, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    let n: usize = raw.parse().map_err(|_| InputError::NotANumber)?;
    if n == 0 || n > option_count {
        return Err(InputError::OutOfRange { max: option_count });
    }
    Ok(n - 1)
}

pub fn parse_confirm(raw: &str, default: bool) -> Result<bool, InputError> {
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" | "o" | "oui" => Ok(true),
        "n" | "no" | "non" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

/// Keep asking until `parse` accepts the answer
fn ask_until<P, T>(
    prompter: &mut P,
    prompt: &Prompt<'_>,
    parse: impl Fn(&str) -> Result<T, InputError>,
) -> Result<T, PromptError>
where
    P: Prompter + ?Sized,
{
    loop {
        let raw = prompter.read(prompt)?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::debug!(prompt = prompt.text, "rejected answer: {}", e);
                prompter.reject(prompt, &e)?;
            }
        }
    }
}

pub fn ask_choice<P: Prompter + ?Sized>(
    prompter: &mut P,
    text: &str,
    options: &[&str],
    default: usize,
) -> Result<usize, PromptError> {
    let prompt = Prompt::choice(text, options, default);
    ask_until(prompter, &prompt, |raw| parse_choice(raw, options.len(), default))
}

pub fn ask_text<P: Prompter + ?Sized>(
    prompter: &mut P,
    text: &str,
    default: &str,
) -> Result<String, PromptError> {
    ask_text_checked(prompter, text, default, |_| Ok(()))
}

/// Like [`ask_text`], but `check` can reject the answer and ask again
pub fn ask_text_checked<P: Prompter + ?Sized>(
    prompter: &mut P,
    text: &str,
    default: &str,
    check: impl Fn(&str) -> Result<(), InputError>,
) -> Result<String, PromptError> {
    let prompt = Prompt::text(text, default);
    ask_until(prompter, &prompt, |raw| {
        let raw = raw.trim();
        let answer = if !raw.is_empty() {
            raw
        } else if !default.is_empty() {
            default
        } else {
            return Err(InputError::Empty);
        };
        check(answer)?;
        Ok(answer.to_string())
    })
}

/// Free text that may legitimately be left empty
pub fn ask_optional_text<P: Prompter + ?Sized>(
    prompter: &mut P,
    text: &str,
) -> Result<Option<String>, PromptError> {
    let raw = prompter.read(&Prompt::text(text, ""))?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| raw.to_string()))
}

pub fn ask_confirm<P: Prompter + ?Sized>(
    prompter: &mut P,
    text: &str,
    default: bool,
) -> Result<bool, PromptError> {
    let prompt = Prompt::confirm(text, default);
    ask_until(prompter, &prompt, |raw| parse_confirm(raw, default))
}

pub fn ask_secret<P: Prompter + ?Sized>(prompter: &mut P, text: &str) -> Result<String, PromptError> {
    let prompt = Prompt::secret(text);
    ask_until(prompter, &prompt, |raw| {
        if raw.is_empty() {
            Err(InputError::Empty)
        } else {
            Ok(raw.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("", 3, 1), Ok(1));
        assert_eq!(parse_choice(" 3 ", 3, 0), Ok(2));
        assert_eq!(parse_choice("0", 3, 0), Err(InputError::OutOfRange { max: 3 }));
        assert_eq!(parse_choice("4", 3, 0), Err(InputError::OutOfRange { max: 3 }));
        assert_eq!(parse_choice("two", 3, 0), Err(InputError::NotANumber));
        assert_eq!(parse_choice("-1", 3, 0), Err(InputError::NotANumber));
    }

    #[test]
    fn test_parse_confirm() {
        assert_eq!(parse_confirm("", true), Ok(true));
        assert_eq!(parse_confirm("", false), Ok(false));
        assert_eq!(parse_confirm("Oui", false), Ok(true));
        assert_eq!(parse_confirm("YES", false), Ok(true));
        assert_eq!(parse_confirm("n", true), Ok(false));
        assert_eq!(parse_confirm("maybe", true), Err(InputError::NotYesNo));
    }

    #[test]
    fn test_ask_choice_reprompts_on_invalid_input() {
        let mut prompter = ScriptedPrompter::new(["abc", "9", "2"]);
        let idx = ask_choice(&mut prompter, "Pick", &["a", "b", "c"], 0).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(prompter.asked().len(), 3);
        assert_eq!(
            prompter.rejections(),
            &[InputError::NotANumber, InputError::OutOfRange { max: 3 }]
        );
    }

    #[test]
    fn test_ask_text_falls_back_to_default() {
        let mut prompter = ScriptedPrompter::new(["   "]);
        let name = ask_text(&mut prompter, "Name", "my-project").unwrap();
        assert_eq!(name, "my-project");
    }

    #[test]
    fn test_ask_text_checked_reprompts_on_rejected_answer() {
        let mut prompter = ScriptedPrompter::new(["bad", "good"]);
        let answer = ask_text_checked(&mut prompter, "Name", "", |raw| {
            if raw == "bad" {
                Err(InputError::InvalidName)
            } else {
                Ok(())
            }
        })
        .unwrap();
        assert_eq!(answer, "good");
        assert_eq!(prompter.rejections(), &[InputError::InvalidName]);
    }

    #[test]
    fn test_ask_optional_text() {
        let mut prompter = ScriptedPrompter::new(["", "add users table"]);
        assert_eq!(ask_optional_text(&mut prompter, "Message").unwrap(), None);
        assert_eq!(
            ask_optional_text(&mut prompter, "Message").unwrap().as_deref(),
            Some("add users table")
        );
    }

    #[test]
    fn test_interruption_maps_to_cancelled() {
        let mut prompter = ScriptedPrompter::new(Vec::<&str>::new());
        let err = ask_confirm(&mut prompter, "Continue?", true).unwrap_err();
        assert!(matches!(err, PromptError::Interrupted));
        assert!(ScaffoldError::from(err).is_cancelled());
    }
}
