// src/cli/handlers/remove_stack.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::cli::args::RemoveStackArgs;

/// The handler for `remove-stack`.
pub fn handle(args: Vec<String>) -> Result<()> {
    let remove_args = RemoveStackArgs::try_parse_from(&args)?;

    let mut swizzle = commons::open_session()?;
    if swizzle.remove_stack(&remove_args.name)? {
        println!(
            "\n{}",
            format!(t!("remove_stack.success"), name = remove_args.name.cyan()).green()
        );
    } else {
        println!(
            "\n{}",
            format!(t!("remove_stack.info.not_found"), name = remove_args.name).yellow()
        );
    }
    Ok(())
}
