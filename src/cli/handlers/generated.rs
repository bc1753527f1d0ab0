// src/cli/handlers/generated.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::cli::args::GeneratedArgs;

/// The handler for `generated KEY=VALUE...`, meant for build and deploy scripts.
pub fn handle(args: Vec<String>) -> Result<()> {
    let generated_args = GeneratedArgs::try_parse_from(&args)?;
    let values = commons::parse_key_values(&generated_args.values)?;

    let mut swizzle = commons::open_session()?;
    match swizzle.update_generated_params(&values)? {
        Some(applied) => println!(
            "\n{}",
            format!(t!("generated.success"), count = values.len(), total = applied.len()).green()
        ),
        None => println!("\n{}", t!("generated.info.no_stack").yellow()),
    }
    Ok(())
}
