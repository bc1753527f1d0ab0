// src/cli/mod.rs

use clap::Parser;

pub mod args;
pub mod handlers;

/// Builds the color-aware help text from the `cli.help.template` catalogue entry.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let group = if use_colors { "\x1b[1;32m" } else { "" }; // Bold Green
    let err = if use_colors { "\x1b[91m" } else { "" }; // Bright Red
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<group>", group)
        .replace("</group>", reset)
        .replace("<err>", err)
        .replace("</err>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// swizzle: configuration parameters and stacks, swizzled into source files.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command name or alias. `config` when omitted.
    pub command: Option<String>,

    /// Everything after the command, parsed by the command's own handler.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_flags_are_left_to_handlers() {
        let cli = Cli::try_parse_from(["swizzle", "ap", "--name", "appKey", "-g"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("ap"));
        assert_eq!(cli.args, vec!["--name", "appKey", "-g"]);
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::try_parse_from(["swizzle"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.args.is_empty());
    }
}
