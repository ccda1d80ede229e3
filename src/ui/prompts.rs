use anyhow::{Context, Result};
use log::debug;
use std::fmt::Display;
use std::sync::Arc;

use crate::console::Console;
use crate::error::MenuError;

/// Validated input acquisition on top of a [`Console`].
///
/// Prompt messages are only written when they contain something other than
/// whitespace; a blank prompt produces no output at all.
pub struct Prompter {
    console: Arc<dyn Console>,
}

impl Prompter {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }

    /// Read up to `attempts` lines, returning the first one that parses as an integer.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - the first number entered
    /// * `Ok(None)` - every attempt was used without getting a number
    pub fn get_number(&self, prompt: &str, attempts: u32) -> Result<Option<i32>> {
        for _ in 0..attempts {
            self.show_prompt(prompt)?;

            let input = self.read_line()?;
            if let Some(number) = parse_number(input.as_deref()) {
                return Ok(Some(number));
            }
        }

        debug!("No number entered after {} attempts", attempts);
        Ok(None)
    }

    /// Keep asking until a number in `min..=max` is entered, or the user types
    /// `exit_text` exactly, in which case `exit_value` is returned.
    pub fn get_number_in_range(
        &self,
        prompt: &str,
        min: i32,
        max: i32,
        exit_text: &str,
        exit_value: i32,
    ) -> Result<i32> {
        if min > max {
            return Err(MenuError::invalid_argument(format!(
                "minimum {} is greater than maximum {}",
                min, max
            ))
            .into());
        }

        loop {
            self.show_prompt(prompt)?;

            let input = self.read_line()?;
            if input.as_deref() == Some(exit_text) {
                return Ok(exit_value);
            }

            let message = match parse_number(input.as_deref()) {
                Some(number) if (min..=max).contains(&number) => return Ok(number),
                Some(_) => format!(
                    "*******Please enter a valid number between {} and {} -OR- type {} to leave *******",
                    min, max, exit_text
                ),
                None => format!(
                    "*******Please enter a number -OR- type {} to leave *******",
                    exit_text
                ),
            };

            self.write_line("  ")?;
            self.write_line(&message)?;
        }
    }

    /// Keep asking until the trimmed input matches one of `valid_answers`.
    /// The trimmed input is returned as typed, not as listed.
    pub fn get_text_from(
        &self,
        prompt: &str,
        ignore_case: bool,
        valid_answers: &[&str],
    ) -> Result<String> {
        if valid_answers.is_empty() {
            return Err(MenuError::configuration("Please specify a valid answer array!").into());
        }

        let hint = build_answer_string(valid_answers);

        loop {
            self.show_prompt(prompt)?;
            self.write_line(&hint)?;

            let Some(input) = self.read_line()? else {
                continue;
            };
            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            let matched = valid_answers.iter().any(|answer| {
                if ignore_case {
                    answer.to_lowercase() == input.to_lowercase()
                } else {
                    *answer == input
                }
            });

            if matched {
                return Ok(input.to_string());
            }
        }
    }

    /// Read free text.
    ///
    /// With `accept_blank` the first read is returned whatever it holds
    /// (including `None`); otherwise reading repeats until a non-blank line arrives.
    pub fn get_text(
        &self,
        prompt: &str,
        accept_blank: bool,
        trim_result: bool,
    ) -> Result<Option<String>> {
        let input = loop {
            self.show_prompt(prompt)?;

            let input = self.read_line()?;
            if accept_blank {
                break input;
            }

            if input.as_deref().is_some_and(|text| !text.trim().is_empty()) {
                break input;
            }
        };

        Ok(match input {
            Some(text) if trim_result => Some(text.trim().to_string()),
            other => other,
        })
    }

    /// Keep reading single keystrokes until one matches `valid_answers`.
    pub fn get_character(
        &self,
        prompt: &str,
        ignore_case: bool,
        valid_answers: &[char],
    ) -> Result<char> {
        if valid_answers.is_empty() {
            return Err(MenuError::configuration("Please specify a valid answer array!").into());
        }

        let hint = build_answer_string(valid_answers);

        loop {
            self.show_prompt(prompt)?;
            self.write_line(&hint)?;

            let key = self
                .console
                .read_key()
                .context("Failed to read a key from the console")?;

            let Some(typed) = key.key_char else {
                continue;
            };

            let matched = valid_answers.iter().any(|answer| {
                if ignore_case {
                    answer.to_lowercase().eq(typed.to_lowercase())
                } else {
                    *answer == typed
                }
            });

            if matched {
                return Ok(typed);
            }
        }
    }

    /// Ask a yes/no question answered with a single `y` or `n` keystroke (any case).
    pub fn get_y_or_n(&self, prompt: &str) -> Result<bool> {
        let answer = self.get_character(prompt, true, &['y', 'n'])?;
        Ok(answer == 'y' || answer == 'Y')
    }

    fn show_prompt(&self, prompt: &str) -> Result<()> {
        if !prompt.trim().is_empty() {
            self.write_line(prompt)?;
        }
        Ok(())
    }

    fn write_line(&self, text: &str) -> Result<()> {
        self.console
            .write_line(text)
            .context("Failed to write to the console")
    }

    fn read_line(&self) -> Result<Option<String>> {
        self.console
            .read_line()
            .context("Failed to read a line from the console")
    }
}

/// Parse an integer the way a user types it: surrounding whitespace and a
/// leading sign are allowed.
fn parse_number(input: Option<&str>) -> Option<i32> {
    input?.trim().parse().ok()
}

/// Builds the answer hint, e.g. `(Enter a, b or c and hit enter)`.
pub(crate) fn build_answer_string<T: Display>(valid_answers: &[T]) -> String {
    let mut hint = String::from("(Enter ");
    let last = valid_answers.len().saturating_sub(1);

    for (index, answer) in valid_answers.iter().enumerate() {
        if index == 0 {
            hint.push_str(&answer.to_string());
        } else if index == last {
            hint.push_str(&format!(" or {}", answer));
        } else {
            hint.push_str(&format!(", {}", answer));
        }
    }

    hint.push_str(" and hit enter)");
    hint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_string_for_one_two_and_many() {
        assert_eq!(build_answer_string(&["a"]), "(Enter a and hit enter)");
        assert_eq!(build_answer_string(&['y', 'n']), "(Enter y or n and hit enter)");
        assert_eq!(
            build_answer_string(&["a", "b", "c"]),
            "(Enter a, b or c and hit enter)"
        );
        assert_eq!(
            build_answer_string(&["a", "b", "c", "d"]),
            "(Enter a, b, c or d and hit enter)"
        );
    }

    #[test]
    fn test_parse_number_is_lenient_about_whitespace_and_sign() {
        assert_eq!(parse_number(Some(" 12 ")), Some(12));
        assert_eq!(parse_number(Some("-20")), Some(-20));
        assert_eq!(parse_number(Some("+3")), Some(3));
        assert_eq!(parse_number(Some("1.5")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(None), None);
    }
}
