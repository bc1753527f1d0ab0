// src/cli/handlers/add_param.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use super::commons;
use crate::{cli::args::AddParamArgs, models::ParamInput};

/// The handler for `add-param`. Declares or updates a parameter and prints
/// the snippet the code files should contain.
pub fn handle(args: Vec<String>) -> Result<()> {
    let add_args = AddParamArgs::try_parse_from(&args)?;
    let input = to_param_input(add_args);

    let mut swizzle = commons::open_session()?;
    swizzle.add_param(&input)?;

    println!(
        "\n{}",
        format!(t!("add_param.success"), name = input.name.cyan()).green()
    );
    println!("\n{}", t!("samples.header").bold());
    println!("{}", commons::samples(&swizzle.state().params, None));
    Ok(())
}

/// Flags that were not given stay `None` so an update keeps the stored values.
fn to_param_input(args: AddParamArgs) -> ParamInput {
    ParamInput {
        name: args.name.unwrap_or_default(),
        description: args.desc,
        default_value: args.default_value,
        generated: args.generated.then_some(true),
        password: args.password.then_some(true),
        no_save: args.mask.then_some(true),
    }
}
