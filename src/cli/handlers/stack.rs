// src/cli/handlers/stack.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{
    cli::args::{StackArgs, StackSessionArgs},
    core::swizzle::StackOptions,
    models::StackParams,
};

/// The handler for `stack <name>`.
pub fn handle(args: Vec<String>) -> Result<()> {
    let stack_args = StackArgs::try_parse_from(&args)?;
    let mut swizzle = commons::open_session()?;
    let applied = swizzle.activate_stack(&stack_args.name, &StackOptions::from(stack_args.flags))?;
    print_applied(&stack_args.name, &applied);
    Ok(())
}

/// The handler for `init`: asks for the stack name first.
pub fn handle_init(args: Vec<String>) -> Result<()> {
    let session_args = StackSessionArgs::try_parse_from(&args)?;
    let mut swizzle = commons::open_session()?;
    let applied = swizzle.stack_init(&StackOptions::from(session_args.flags))?;
    print_applied(swizzle.state().stack_name.as_deref().unwrap_or_default(), &applied);
    Ok(())
}

/// The handler for `config`: continues with the current stack.
pub fn handle_config(args: Vec<String>) -> Result<()> {
    let session_args = StackSessionArgs::try_parse_from(&args)?;
    let mut swizzle = commons::open_session()?;
    let applied = swizzle.stack_config(&StackOptions::from(session_args.flags))?;
    print_applied(swizzle.state().stack_name.as_deref().unwrap_or_default(), &applied);
    Ok(())
}

fn print_applied(name: &str, applied: &StackParams) {
    println!(
        "\n{}",
        format!(t!("stack.success"), name = name.cyan(), count = applied.len()).green()
    );
}
