// src/cli/handlers/files.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::cli::args::FilesArgs;

/// The handler for `add-files`.
pub fn handle_add(args: Vec<String>) -> Result<()> {
    let files_args = FilesArgs::try_parse_from(&args)?;

    let mut swizzle = commons::open_session()?;
    swizzle.add_files(&files_args.files)?;

    for file in &files_args.files {
        println!("  {} {}", "+".green(), file);
    }
    println!("\n{}", t!("add_files.info.add_params").bold());
    println!("{}", commons::samples(&swizzle.state().params, None));
    println!("\n{}", t!("add_files.info.next_step").dimmed());
    Ok(())
}

/// The handler for `remove-files`.
pub fn handle_remove(args: Vec<String>) -> Result<()> {
    let files_args = FilesArgs::try_parse_from(&args)?;

    let mut swizzle = commons::open_session()?;
    swizzle.remove_files(&files_args.files)?;

    for file in &files_args.files {
        println!("  {} {}", "-".red(), file);
    }
    Ok(())
}
