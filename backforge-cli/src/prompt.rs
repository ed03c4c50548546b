//! Interactive prompts
//!
//! Every prompt can come back empty: an escaped menu, a blank name or a
//! declined confirmation all mean "do nothing".

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::collections::VecDeque;

/// Source of answers to interactive questions
pub trait Prompter {
    /// Single choice from `items`; `None` when cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>>;

    /// Free text; `None` when the answer is blank
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn input(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Yes/no question that defaults to no
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal prompts backed by `dialoguer`
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    /// Create a prompter using the colorful theme
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .context("Failed to read selection")
    }

    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        Ok(non_blank(answer))
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact_opt()
            .context("Failed to read confirmation")?;

        Ok(answer.unwrap_or(false))
    }
}

/// A pre-recorded answer for [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index picked from a menu
    Choice(usize),
    /// Text typed into an input
    Text(String),
    /// Response to a confirmation
    Confirm(bool),
    /// Escape or Ctrl-C on any prompt
    Cancel,
}

/// Replays answers in order, for non-interactive runs and tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that replays `answers`
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts asked so far, in order
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .with_context(|| format!("No scripted answer for prompt: {prompt}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>> {
        match self.next(prompt)? {
            Answer::Choice(index) if index < items.len() => Ok(Some(index)),
            Answer::Cancel => Ok(None),
            other => anyhow::bail!("Unexpected answer {other:?} for selection: {prompt}"),
        }
    }

    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(non_blank(text)),
            Answer::Cancel => Ok(None),
            other => anyhow::bail!("Unexpected answer {other:?} for input: {prompt}"),
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(yes),
            Answer::Cancel => Ok(false),
            other => anyhow::bail!("Unexpected answer {other:?} for confirmation: {prompt}"),
        }
    }
}

fn non_blank(answer: String) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == answer.len() {
        Some(answer)
    } else {
        Some(trimmed.to_string())
    }
}
