// src/cli/handlers/remove_param.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::cli::args::RemoveParamArgs;

/// The handler for `remove-param`.
pub fn handle(args: Vec<String>) -> Result<()> {
    let remove_args = RemoveParamArgs::try_parse_from(&args)?;
    let name = remove_args.name;

    let mut swizzle = commons::open_session()?;
    let samples = commons::samples(&swizzle.state().params, Some(&name));

    if !swizzle.remove_param(&name)? {
        println!(
            "\n{}",
            format!(
                t!("remove_param.info.not_found"),
                name = name,
                path = swizzle.state().file_path.display()
            )
            .yellow()
        );
        return Ok(());
    }

    println!(
        "\n{}",
        format!(t!("remove_param.success"), name = name.cyan()).green()
    );
    println!("{}", t!("remove_param.info.clean_code_files"));
    println!("{}", samples);
    Ok(())
}
