// src/cli/handlers/list.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::cli::args::ListArgs;

/// The handler for `list-params`.
pub fn handle_params(args: Vec<String>) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let swizzle = commons::open_session()?;
    let params = swizzle.state().list_params(list_args.verbose);

    if params.is_empty() {
        println!("{}", t!("list.info.no_params").dimmed());
        return Ok(());
    }
    for param in params {
        if !list_args.verbose {
            println!("{}", param.name);
            continue;
        }
        let marker = if param.generated { " <generated>" } else { "" };
        println!("\n{}{}", param.name.cyan().bold(), marker.dimmed());
        println!(
            "  {:<15} {}",
            t!("list.label.description").blue(),
            param.description.unwrap_or_default()
        );
        println!(
            "  {:<15} {}",
            t!("list.label.default_value").blue(),
            param.default_value.unwrap_or_default()
        );
    }
    Ok(())
}

/// The handler for `list-files`.
pub fn handle_files(args: Vec<String>) -> Result<()> {
    let _list_args = ListArgs::try_parse_from(&args)?;
    let swizzle = commons::open_session()?;
    let files = swizzle.state().list_files();

    if files.is_empty() {
        println!("{}", t!("list.info.no_files").dimmed());
    }
    for file in files {
        println!("{}", file);
    }
    Ok(())
}

/// The handler for `list-stacks`. The selected stack is marked with `*`.
pub fn handle_stacks(args: Vec<String>) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let swizzle = commons::open_session()?;
    let state = swizzle.state();
    let stacks = state.list_stacks(list_args.verbose);

    if stacks.is_empty() {
        println!("{}", t!("list.info.no_stacks").dimmed());
        return Ok(());
    }
    for summary in stacks {
        let selected = state.stack_name.as_deref() == Some(summary.name.as_str());
        let marker = if selected { "*" } else { " " };
        println!("{} {}", marker.green().bold(), summary.name.cyan());

        let Some(stack) = summary.stack else {
            continue;
        };
        if let Some(file) = &stack.file {
            println!(
                "    {:<10} {}",
                t!("list.label.file").blue(),
                file.display()
            );
        }
        for (key, value) in &stack.params {
            let hidden = state.find_param(key).is_some_and(|p| p.password);
            let shown = if hidden { "********" } else { value.as_str() };
            println!("    {:<24} {}", key, shown);
        }
    }
    Ok(())
}
