//! Per-file write/skip decision for targets that may already exist.

use super::RelativePath;

/// The only answer that confirms an overwrite.
pub const AFFIRMATIVE: &str = "y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Write,
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConflictPolicy {
    override_all: bool,
}

impl ConflictPolicy {
    pub fn new(override_all: bool) -> Self {
        Self { override_all }
    }

    pub fn override_all(&self) -> bool {
        self.override_all
    }

    /// Decide for one target.
    ///
    /// With `override_all` the existence check is never run. Otherwise a
    /// missing target is written and an existing one goes to `ask`, called as
    /// `ask(message, default)`.
    pub fn decide<E>(
        &self,
        target: &RelativePath,
        exists: impl FnOnce() -> bool,
        ask: impl FnOnce(&str, &str) -> Result<String, E>,
    ) -> Result<Decision, E> {
        if self.override_all || !exists() {
            return Ok(Decision::Write);
        }
        let answer = ask(&Self::message(target), AFFIRMATIVE)?;
        Ok(Self::interpret(&answer))
    }

    pub fn message(target: &RelativePath) -> String {
        format!("File '{target}' already exists. Override?")
    }

    /// Empty answers take the default; anything but [`AFFIRMATIVE`] declines.
    pub fn interpret(answer: &str) -> Decision {
        let answer = answer.trim();
        if answer.is_empty() || answer == AFFIRMATIVE {
            Decision::Write
        } else {
            Decision::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::convert::Infallible;

    use super::*;

    fn target() -> RelativePath {
        RelativePath::try_new("greeting.txt").unwrap()
    }

    fn answer(value: &'static str) -> impl FnOnce(&str, &str) -> Result<String, Infallible> {
        move |_, _| Ok(value.to_owned())
    }

    #[test]
    fn override_all_skips_existence_check() {
        let checked = Cell::new(false);
        let decision = ConflictPolicy::new(true)
            .decide(
                &target(),
                || {
                    checked.set(true);
                    true
                },
                answer("n"),
            )
            .unwrap();
        assert_eq!(decision, Decision::Write);
        assert!(!checked.get());
    }

    #[test]
    fn missing_target_is_written_without_asking() {
        let decision = ConflictPolicy::default()
            .decide(&target(), || false, |_, _| -> Result<String, Infallible> {
                panic!("must not ask")
            })
            .unwrap();
        assert_eq!(decision, Decision::Write);
    }

    #[test]
    fn existing_target_follows_answer() {
        let policy = ConflictPolicy::default();
        assert_eq!(policy.decide(&target(), || true, answer("y")).unwrap(), Decision::Write);
        assert_eq!(policy.decide(&target(), || true, answer("")).unwrap(), Decision::Write);
        assert_eq!(policy.decide(&target(), || true, answer("  \n")).unwrap(), Decision::Write);
        assert_eq!(policy.decide(&target(), || true, answer("n")).unwrap(), Decision::Skip);
        assert_eq!(policy.decide(&target(), || true, answer("yes")).unwrap(), Decision::Skip);
    }

    #[test]
    fn prompt_names_the_target_and_defaults_to_yes() {
        ConflictPolicy::default()
            .decide(&target(), || true, |message, default| -> Result<String, Infallible> {
                assert_eq!(message, "File 'greeting.txt' already exists. Override?");
                assert_eq!(default, AFFIRMATIVE);
                Ok(String::new())
            })
            .unwrap();
    }

    #[test]
    fn prompt_errors_propagate() {
        let result = ConflictPolicy::default().decide(&target(), || true, |_, _| Err("closed"));
        assert_eq!(result, Err("closed"));
    }
}
