// src/cli/handlers/clean.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::cli::args::CleanArgs;

/// The handler for `clean`.
pub fn handle(args: Vec<String>) -> Result<()> {
    let clean_args = CleanArgs::try_parse_from(&args)?;

    let mut swizzle = commons::open_session()?;
    let defaults = swizzle.clean()?;

    println!("\n{}", t!("clean.success").green());
    if clean_args.verbose {
        println!("{}", t!("clean.info.cleaned_params"));
        for (name, value) in &defaults {
            println!("  {:<24} {}", name.blue(), value);
        }
    }
    Ok(())
}
