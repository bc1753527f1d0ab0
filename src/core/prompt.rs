// src/core/prompt.rs

//! The interactive-input boundary. Stack activation hands a batch of
//! `Question`s to a `Prompter` and gets back one answer per question.

use crate::core::validation::Validator;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Operation cancelled by user.")]
    Cancelled,
    #[error("User Interface Error: {0}")]
    Interaction(#[from] dialoguer::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    /// Masked input; the answer is never echoed.
    Password,
    /// Pick one of the listed values.
    Choice(Vec<String>),
}

/// One value to collect from the user.
#[derive(Debug, Clone)]
pub struct Question {
    /// The parameter name the answer is stored under.
    pub name: String,
    pub message: String,
    pub default: String,
    pub kind: QuestionKind,
    pub validator: Option<Validator>,
}

impl Question {
    pub fn text(name: impl Into<String>, message: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            default: default.into(),
            kind: QuestionKind::Text,
            validator: None,
        }
    }
}

/// Collects answers for a batch of questions, keyed by question name.
pub trait Prompter {
    fn prompt(&mut self, questions: &[Question]) -> Result<IndexMap<String, String>, PromptError>;
}

/// Asks questions on the terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

/// Password input hides the stored value, so the prompt says how to keep it.
fn password_prompt(message: &str) -> String {
    format!(t!("prompt.password.keep_default"), message = message)
}

impl DialoguerPrompter {
    fn ask(&self, question: &Question) -> Result<String, PromptError> {
        let theme = ColorfulTheme::default();
        match &question.kind {
            QuestionKind::Text => {
                let mut input = Input::<String>::with_theme(&theme)
                    .with_prompt(&question.message)
                    .default(question.default.clone());
                if let Some(validator) = question.validator.clone() {
                    input = input.validate_with(move |value: &String| validator.validate(value));
                }
                Ok(input.interact_text()?)
            }
            QuestionKind::Password => {
                let mut password = Password::with_theme(&theme)
                    .with_prompt(password_prompt(&question.message))
                    .allow_empty_password(true);
                if let Some(validator) = question.validator.clone() {
                    let fallback = question.default.clone();
                    password = password.validate_with(move |value: &String| {
                        let effective = if value.is_empty() { &fallback } else { value };
                        validator.validate(effective)
                    });
                }
                let answer = password.interact()?;
                Ok(if answer.is_empty() {
                    question.default.clone()
                } else {
                    answer
                })
            }
            QuestionKind::Choice(choices) => {
                let default_index = choices
                    .iter()
                    .position(|c| *c == question.default)
                    .unwrap_or(0);
                let selection = Select::with_theme(&theme)
                    .with_prompt(&question.message)
                    .items(choices.as_slice())
                    .default(default_index)
                    .interact_opt()?
                    .ok_or(PromptError::Cancelled)?;
                choices
                    .get(selection)
                    .cloned()
                    .ok_or(PromptError::Cancelled)
            }
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn prompt(&mut self, questions: &[Question]) -> Result<IndexMap<String, String>, PromptError> {
        let mut answers = IndexMap::with_capacity(questions.len());
        for question in questions {
            log::debug!("Prompting for '{}'", question.name);
            let answer = self.ask(question)?;
            answers.insert(question.name.clone(), answer);
        }
        Ok(answers)
    }
}

/// A scripted prompter for tests: answers from a fixed map and records every batch.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompter {
    pub answers: IndexMap<String, String>,
    pub batches: Vec<Vec<Question>>,
    pub reject: bool,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn answering(pairs: &[(&str, &str)]) -> Self {
        Self {
            answers: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    /// Names asked across all batches, in order.
    pub fn asked_names(&self) -> Vec<String> {
        self.batches
            .iter()
            .flatten()
            .map(|q| q.name.clone())
            .collect()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, questions: &[Question]) -> Result<IndexMap<String, String>, PromptError> {
        self.batches.push(questions.to_vec());
        if self.reject {
            return Err(PromptError::Cancelled);
        }
        Ok(questions
            .iter()
            .map(|q| {
                let answer = self
                    .answers
                    .get(&q.name)
                    .cloned()
                    .unwrap_or_else(|| q.default.clone());
                (q.name.clone(), answer)
            })
            .collect())
    }
}
