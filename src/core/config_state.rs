// src/core/config_state.rs

//! Pure transitions over the configuration state. Nothing here touches the disk.

use crate::{
    constants::GENERATED_DEFAULT_VALUE,
    models::{ConfigState, ParamInput, Parameter, Stack, StackParams},
};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("A parameter name is required.")]
    MissingParamName,
}

// --- Casing ---

/// Splits text into words on separators, camelCase humps and letter/digit
/// boundaries: `"appKey-Test-fooBar"` -> `["app", "Key", "Test", "foo", "Bar"]`.
pub fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let hump = prev.is_lowercase() && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(char::is_lowercase);
            let digit_edge = prev.is_ascii_digit() != c.is_ascii_digit();
            if hump || acronym_end || digit_edge {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `"Your-appPwd"` -> `"YOUR_APP_PWD"`.
pub fn key_case(text: &str) -> String {
    split_words(text).join("_").to_uppercase()
}

/// `"Your-appPwd"` -> `"your app pwd"`.
pub fn desc_case(text: &str) -> String {
    split_words(text).join(" ").to_lowercase()
}

// --- Files ---

/// Set union preserving first-seen order.
pub fn add_files(current: &[String], to_add: &[String]) -> Vec<String> {
    let mut files: Vec<String> = Vec::with_capacity(current.len() + to_add.len());
    for file in current.iter().chain(to_add) {
        if !files.contains(file) {
            files.push(file.clone());
        }
    }
    files
}

pub fn remove_files(current: &[String], to_remove: &[String]) -> Vec<String> {
    current
        .iter()
        .filter(|f| !to_remove.contains(f))
        .cloned()
        .collect()
}

// --- Params ---

/// Declares a parameter, or updates the one with the same name in place.
///
/// On update only the fields present in `input` are overwritten. Missing
/// description and default value of a new parameter are derived from its
/// name. The boolean flags are stored only when they end up `true`.
pub fn add_param(current: &[Parameter], input: &ParamInput) -> Result<Vec<Parameter>, ConfigError> {
    if input.name.trim().is_empty() {
        return Err(ConfigError::MissingParamName);
    }

    if let Some(existing) = current.iter().find(|p| p.name == input.name) {
        let mut updated = existing.clone();
        if let Some(description) = &input.description {
            updated.description = description.clone();
        }
        if let Some(default_value) = &input.default_value {
            updated.default_value = default_value.clone();
        }
        if let Some(no_save) = input.no_save {
            updated.no_save = no_save;
        }
        if let Some(password) = input.password {
            updated.password = password;
        }
        if let Some(generated) = input.generated {
            updated.generated = generated;
        }
        return Ok(current
            .iter()
            .map(|p| if p.name == input.name { updated.clone() } else { p.clone() })
            .collect());
    }

    let generated = input.generated == Some(true);
    let seed = format!("Your-{}", input.name);
    let param = Parameter {
        name: input.name.clone(),
        description: input
            .description
            .clone()
            .unwrap_or_else(|| desc_case(&seed)),
        default_value: input.default_value.clone().unwrap_or_else(|| {
            if generated {
                GENERATED_DEFAULT_VALUE.to_string()
            } else {
                key_case(&seed)
            }
        }),
        generated,
        password: input.password == Some(true),
        no_save: input.no_save == Some(true),
        choices: None,
        regex: None,
    };

    let mut params = current.to_vec();
    params.push(param);
    Ok(params)
}

pub fn remove_param(current: &[Parameter], name: &str) -> Vec<Parameter> {
    current.iter().filter(|p| p.name != name).cloned().collect()
}

// --- Stacks ---

pub fn add_stack(
    current: &IndexMap<String, Stack>,
    name: &str,
    params: StackParams,
    file: Option<PathBuf>,
) -> IndexMap<String, Stack> {
    let mut stacks = current.clone();
    let file = file.filter(|f| !f.as_os_str().is_empty());
    stacks.insert(name.to_string(), Stack::new(params, file));
    stacks
}

pub fn remove_stack(current: &IndexMap<String, Stack>, name: &str) -> IndexMap<String, Stack> {
    let mut stacks = current.clone();
    stacks.shift_remove(name);
    stacks
}

// --- Listings ---

/// One row of `list-params`. Only `name` is filled unless verbose.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParamSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
}

pub fn list_params(params: &[Parameter], verbose: bool) -> Vec<ParamSummary> {
    params
        .iter()
        .map(|p| ParamSummary {
            name: p.name.clone(),
            description: verbose.then(|| p.description.clone()),
            default_value: verbose.then(|| p.default_value.clone()),
            generated: verbose && p.generated,
        })
        .collect()
}

/// One row of `list-stacks`. The stack record is attached when verbose.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StackSummary {
    pub name: String,
    #[serde(flatten)]
    pub stack: Option<Stack>,
}

pub fn list_stacks(stacks: &IndexMap<String, Stack>, verbose: bool) -> Vec<StackSummary> {
    stacks
        .iter()
        .map(|(name, stack)| StackSummary {
            name: name.clone(),
            stack: verbose.then(|| stack.clone()),
        })
        .collect()
}

// --- State facade ---

impl ConfigState {
    pub fn add_files(&mut self, files: &[String]) {
        self.files = add_files(&self.files, files);
    }

    pub fn remove_files(&mut self, files: &[String]) {
        self.files = remove_files(&self.files, files);
    }

    /// Registered files, skipping blank entries.
    pub fn list_files(&self) -> Vec<String> {
        self.files.iter().filter(|f| !f.is_empty()).cloned().collect()
    }

    pub fn add_param(&mut self, input: &ParamInput) -> Result<(), ConfigError> {
        self.params = add_param(&self.params, input)?;
        Ok(())
    }

    pub fn remove_param(&mut self, name: &str) {
        self.params = remove_param(&self.params, name);
    }

    pub fn find_param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn add_stack(&mut self, name: &str, params: StackParams, file: Option<PathBuf>) {
        self.stacks = add_stack(&self.stacks, name, params, file);
    }

    pub fn remove_stack(&mut self, name: &str) {
        self.stacks = remove_stack(&self.stacks, name);
    }

    pub fn list_params(&self, verbose: bool) -> Vec<ParamSummary> {
        list_params(&self.params, verbose)
    }

    pub fn list_stacks(&self, verbose: bool) -> Vec<StackSummary> {
        list_stacks(&self.stacks, verbose)
    }
}
