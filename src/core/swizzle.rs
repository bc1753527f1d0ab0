// src/core/swizzle.rs

//! # Swizzle Session
//!
//! Owns the loaded `ConfigState` for the duration of one command and drives
//! every mutating operation: each one updates the state, persists it through
//! the config store and, for stack activations, rewrites the registered
//! source files.
//!
//! Stack activation runs in four steps:
//!
//! 1. **Resolve** the stack (existing or new) and its target file.
//! 2. **Prompt** for the parameters that still need a value, if any.
//! 3. **Persist** the merged stack and the selected stack name.
//! 4. **Substitute** the stack values into the registered files.
//!
//! A rejected prompt aborts before step 3, so the files on disk are untouched.

use crate::{
    constants::DEFAULT_STACK_NAME,
    core::{
        config_state::ConfigError,
        config_store,
        prompt::{PromptError, Prompter, Question, QuestionKind},
        substitution::{self, SubstitutionError},
        validation::{RuleError, Validator},
    },
    models::{ConfigState, ParamInput, Parameter, Stack, StackParams},
    system::{json_file::FileError, paths},
};
use colored::Colorize;
use std::path::PathBuf;
use thiserror::Error;

const STACK_NAME_QUESTION: &str = "stackName";

#[derive(Error, Debug)]
pub enum SwizzleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    File(#[from] FileError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
    #[error("Could not resolve the current working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

impl SwizzleError {
    /// Whether the user backed out of a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Prompt(PromptError::Cancelled))
    }
}

/// How a stack activation picks its questions and its storage file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackOptions {
    /// Ask for every parameter again, generated ones included.
    pub edit_first: bool,
    /// Store the stack values in the rc file.
    pub use_rc: bool,
    /// Store the stack values in this file. Wins over `use_rc`.
    pub file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Swizzle<P: Prompter> {
    state: ConfigState,
    prompter: P,
}

impl<P: Prompter> Swizzle<P> {
    /// Loads the rc file(s) and `./swizzle.json` from the working directory.
    pub fn initialize(prompter: P) -> Result<Self, SwizzleError> {
        let rc = config_store::load_rc(&paths::get_rc_file_paths_if_exist())?;
        let primary = paths::get_swizzle_json_path().map_err(SwizzleError::WorkingDir)?;
        log::debug!("Using config file: {}", primary.display());
        let state = config_store::load_config(&primary, &rc)?;
        Ok(Self::with_state(state, prompter))
    }

    pub fn with_state(state: ConfigState, prompter: P) -> Self {
        Self { state, prompter }
    }

    pub fn state(&self) -> &ConfigState {
        &self.state
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    fn save(&self) -> Result<(), SwizzleError> {
        config_store::save_config(&self.state, &self.state.file_path)?;
        Ok(())
    }

    // --- Parameters and files ---

    pub fn add_param(&mut self, input: &ParamInput) -> Result<(), SwizzleError> {
        self.state.add_param(input)?;
        self.save()
    }

    /// Removes a declared parameter. Returns `false`, without saving, when no
    /// parameter has that name.
    pub fn remove_param(&mut self, name: &str) -> Result<bool, SwizzleError> {
        if self.state.find_param(name).is_none() {
            log::info!(
                "Parameter '{}' is not declared in {}.",
                name,
                self.state.file_path.display()
            );
            return Ok(false);
        }
        self.state.remove_param(name);
        self.save()?;
        Ok(true)
    }

    pub fn add_files(&mut self, files: &[String]) -> Result<(), SwizzleError> {
        self.state.add_files(files);
        self.save()
    }

    pub fn remove_files(&mut self, files: &[String]) -> Result<(), SwizzleError> {
        self.state.remove_files(files);
        self.save()
    }

    /// Deletes a stack. Returns `false` when it does not exist. Removing the
    /// selected stack also clears the selection.
    pub fn remove_stack(&mut self, name: &str) -> Result<bool, SwizzleError> {
        if !self.state.stacks.contains_key(name) {
            log::info!("Stack '{}' does not exist.", name);
            return Ok(false);
        }
        self.state.remove_stack(name);
        if self.state.stack_name.as_deref() == Some(name) {
            self.state.stack_name = None;
        }
        self.save()?;
        Ok(true)
    }

    // --- Stacks ---

    /// Builds the questions for every parameter of `stack` that needs input.
    fn questions_for(&self, stack: &Stack, edit_first: bool) -> Result<Vec<Question>, RuleError> {
        self.state
            .params
            .iter()
            .filter(|param| needs_input(param, stack, edit_first))
            .map(|param| question_for(param, stack))
            .collect()
    }

    /// Activates the stack `name`: asks for missing values, saves the stack as
    /// the current one and swizzles its values into the registered files.
    ///
    /// Returns the stack values that were applied.
    pub fn activate_stack(
        &mut self,
        name: &str,
        options: &StackOptions,
    ) -> Result<StackParams, SwizzleError> {
        log::info!("Activating stack '{}'", name);

        let mut stack = self.state.stacks.get(name).cloned().unwrap_or_else(|| {
            Stack::new(StackParams::new(), Some(self.state.file_path.clone()))
        });
        if options.use_rc {
            stack.file = Some(paths::rc_path_for(&self.state.file_path));
        }
        if let Some(file) = &options.file {
            stack.file = Some(file.clone());
        }

        let questions = self.questions_for(&stack, options.edit_first)?;
        if questions.is_empty() {
            log::debug!("Stack '{}' needs no input.", name);
        } else {
            let answers = self.prompter.prompt(&questions)?;
            stack.params.extend(answers);
        }

        let params = stack.params.clone();
        self.state.add_stack(name, stack.params, stack.file);
        self.state.stack_name = Some(name.to_string());
        self.save()?;

        let files = self.state.list_files();
        if files.is_empty() {
            log::info!("No files registered; skipping substitution.");
            println!("{}", t!("swizzle.info.nothing_to_swizzle").yellow());
            return Ok(params);
        }
        substitution::apply_substitutions(&params, &files)?;
        Ok(params)
    }

    /// Asks for a stack name, offering the current one (or `dev`), and activates it.
    pub fn stack_init(&mut self, options: &StackOptions) -> Result<StackParams, SwizzleError> {
        let default = self
            .state
            .stack_name
            .clone()
            .unwrap_or_else(|| DEFAULT_STACK_NAME.to_string());
        let name = self.ask_stack_name(default)?;
        self.activate_stack(&name, options)
    }

    /// Activates the current stack, asking for a name only when none is selected.
    pub fn stack_config(&mut self, options: &StackOptions) -> Result<StackParams, SwizzleError> {
        let name = match self.state.stack_name.clone() {
            Some(name) => name,
            None => self.ask_stack_name(DEFAULT_STACK_NAME.to_string())?,
        };
        self.activate_stack(&name, options)
    }

    fn ask_stack_name(&mut self, default: String) -> Result<String, SwizzleError> {
        let question = Question::text(
            STACK_NAME_QUESTION,
            t!("stack.prompt.stack_name"),
            default.clone(),
        );
        let answers = self.prompter.prompt(std::slice::from_ref(&question))?;
        Ok(answers
            .get(STACK_NAME_QUESTION)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or(default))
    }

    /// Records values computed by build scripts.
    ///
    /// Unknown names are declared as generated parameters. When a stack is
    /// selected the values are merged over it and the stack is activated
    /// again. Returns the applied values, or `None` when there was no stack
    /// to update.
    pub fn update_generated_params(
        &mut self,
        values: &StackParams,
    ) -> Result<Option<StackParams>, SwizzleError> {
        if values.is_empty() {
            return Ok(None);
        }

        let mut declared = false;
        for name in values.keys() {
            if self.state.find_param(name).is_none() {
                self.state.add_param(&ParamInput {
                    generated: Some(true),
                    ..ParamInput::named(name.clone())
                })?;
                declared = true;
            }
        }
        if declared {
            self.save()?;
        }

        let Some(name) = self.state.stack_name.clone() else {
            log::debug!("No stack selected; generated values are not applied.");
            return Ok(None);
        };
        let Some(stack) = self.state.stacks.get(&name).cloned() else {
            log::debug!("Selected stack '{}' does not exist yet.", name);
            return Ok(None);
        };

        let mut params = stack.params;
        params.extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.state.add_stack(&name, params, stack.file);

        self.activate_stack(&name, &StackOptions::default()).map(Some)
    }

    /// Swizzles every parameter's default value back into the files, then
    /// drops all stacks and the selected stack name.
    ///
    /// Returns the values that were written.
    pub fn clean(&mut self) -> Result<StackParams, SwizzleError> {
        let defaults: StackParams = self
            .state
            .params
            .iter()
            .map(|p| (p.name.clone(), p.default_value.clone()))
            .collect();

        substitution::apply_substitutions(&defaults, &self.state.list_files())?;

        self.state.stacks.clear();
        self.state.stack_name = None;
        self.save()?;
        Ok(defaults)
    }

    /// Values of the selected stack; empty when none is selected.
    pub fn current_stack_params(&self) -> StackParams {
        let Some(name) = self.state.stack_name.as_deref() else {
            log::warn!("No stack selected.");
            println!("{}", t!("stack.warning.no_stack_selected").yellow());
            return StackParams::new();
        };
        self.state
            .stacks
            .get(name)
            .map(|stack| stack.params.clone())
            .unwrap_or_default()
    }
}

/// Whether activation must ask the user for `param`.
fn needs_input(param: &Parameter, stack: &Stack, edit_first: bool) -> bool {
    let has_value = stack.has_value(&param.name);
    edit_first || (param.no_save && !has_value) || !(has_value || param.generated)
}

fn question_for(param: &Parameter, stack: &Stack) -> Result<Question, RuleError> {
    let suffix = if param.generated { " <generated>" } else { "" };
    let message = format!(
        t!("stack.prompt.enter_param"),
        description = param.description,
        suffix = suffix
    );

    let default = if param.no_save {
        param.default_value.clone()
    } else {
        stack
            .params
            .get(&param.name)
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| param.default_value.clone())
    };

    let kind = if param.password {
        QuestionKind::Password
    } else {
        match &param.choices {
            Some(choices) if !choices.is_empty() => QuestionKind::Choice(choices.clone()),
            _ => QuestionKind::Text,
        }
    };

    let validator = param.regex.as_ref().map(Validator::new).transpose()?;

    Ok(Question {
        name: param.name.clone(),
        message,
        default,
        kind,
        validator,
    })
}
