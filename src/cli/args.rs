// src/cli/args.rs

use crate::core::swizzle::StackOptions;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Declares a parameter in swizzle.json, or updates it.")]
pub struct AddParamArgs {
    /// Name of the parameter.
    #[arg(long, short)]
    pub name: Option<String>,

    /// Description shown when asking for the value.
    #[arg(long, short)]
    pub desc: Option<String>,

    /// Value written to the code files when no stack value exists.
    #[arg(long, short = 'v')]
    pub default_value: Option<String>,

    /// The value comes from a build script, so the user is not asked for it.
    #[arg(long, short)]
    pub generated: bool,

    /// Hide the value while it is typed.
    #[arg(long, short)]
    pub password: bool,

    /// Never save the value; ask for it on every activation.
    #[arg(long, short)]
    pub mask: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Removes a parameter from swizzle.json.")]
pub struct RemoveParamArgs {
    /// Name of the parameter.
    #[arg(long, short)]
    pub name: String,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct FilesArgs {
    /// Code file paths, relative to the project directory.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<String>,
}

/// Flags shared by `stack`, `init` and `config`.
#[derive(Args, Debug, Default, Clone)]
pub struct StackFlags {
    /// Review and edit every parameter value before swizzling.
    #[arg(long, short)]
    pub edit_first: bool,

    /// Save the stack values in the .swizzlerc file.
    #[arg(long, short = 's')]
    pub use_rc: bool,

    /// Save the stack values in the given file.
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

impl From<StackFlags> for StackOptions {
    fn from(flags: StackFlags) -> Self {
        Self {
            edit_first: flags.edit_first,
            use_rc: flags.use_rc,
            file: flags.file,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Uses the given stack, asks for missing values and swizzles the code files."
)]
pub struct StackArgs {
    /// Name of the stack.
    pub name: String,

    #[command(flatten)]
    pub flags: StackFlags,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct StackSessionArgs {
    #[command(flatten)]
    pub flags: StackFlags,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct ListArgs {
    /// Show every field.
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Deletes a stack.")]
pub struct RemoveStackArgs {
    /// Name of the stack.
    pub name: String,
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Records generated values (KEY=VALUE) and swizzles them into the current stack."
)]
pub struct GeneratedArgs {
    /// Values as KEY=VALUE pairs.
    #[arg(required = true, num_args = 1..)]
    pub values: Vec<String>,
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Swizzles default values back into the code files and removes all stacks."
)]
pub struct CleanArgs {
    /// Print the values that were written.
    #[arg(long, short)]
    pub verbose: bool,
}
