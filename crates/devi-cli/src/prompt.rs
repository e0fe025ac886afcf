//! Terminal implementations of the [`Prompt`] port.
//!
//! [`select_prompt`] picks one per invocation: `--yes` never asks, an
//! interactive terminal gets `dialoguer`, and anything else (pipes, CI)
//! reads plain lines from stdin.

use std::io::{self, BufRead, Write};

use devi_core::{
    application::{ApplicationError, Prompt},
    error::DeviResult,
};
use tracing::debug;

/// Answers every question with its default.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptDefaults;

impl Prompt for AcceptDefaults {
    fn ask(&self, message: &str, default: &str) -> DeviResult<String> {
        debug!(message, default, "Accepting default answer");
        Ok(default.to_owned())
    }
}

/// Line-based prompt on stderr/stdin.
///
/// End of input and blank lines both yield the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, message: &str, default: &str) -> DeviResult<String> {
        let failed = |e: io::Error| ApplicationError::PromptFailed {
            reason: e.to_string(),
        };

        let mut stderr = io::stderr().lock();
        if default.is_empty() {
            write!(stderr, "{message}: ").map_err(failed)?;
        } else {
            write!(stderr, "{message} [{default}]: ").map_err(failed)?;
        }
        stderr.flush().map_err(failed)?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).map_err(failed)?;
        let answer = line.trim_end_matches(['\r', '\n']);

        if read == 0 || answer.is_empty() {
            Ok(default.to_owned())
        } else {
            Ok(answer.to_owned())
        }
    }
}

/// Interactive prompt with line editing.
#[cfg(feature = "interactive")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompt;

#[cfg(feature = "interactive")]
impl Prompt for DialoguerPrompt {
    fn ask(&self, message: &str, default: &str) -> DeviResult<String> {
        use dialoguer::{Input, theme::ColorfulTheme};

        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(message)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_owned());
        }

        input
            .interact_text()
            .map_err(|e| {
                ApplicationError::PromptFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

/// Choose the prompt for this invocation.
pub fn select_prompt(accept_defaults: bool) -> Box<dyn Prompt> {
    if accept_defaults {
        return Box::new(AcceptDefaults);
    }

    #[cfg(feature = "interactive")]
    {
        use std::io::IsTerminal;
        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            return Box::new(DialoguerPrompt);
        }
    }

    Box::new(StdinPrompt)
}
