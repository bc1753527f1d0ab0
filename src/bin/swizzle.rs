// src/bin/swizzle.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use swizzle::t;
use swizzle::{
    cli::{Cli, handlers},
    core::{prompt::PromptError, swizzle::SwizzleError},
};

// --- Command Definition and Registry ---

/// A command, its aliases, and the handler that parses the rest of the arguments.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// Every command the binary understands. `config` runs when none is given.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "add-param",
        aliases: &["ap"],
        handler: handlers::add_param::handle,
    },
    CommandDefinition {
        name: "remove-param",
        aliases: &["rp"],
        handler: handlers::remove_param::handle,
    },
    CommandDefinition {
        name: "list-params",
        aliases: &["lp"],
        handler: handlers::list::handle_params,
    },
    CommandDefinition {
        name: "add-files",
        aliases: &["af"],
        handler: handlers::files::handle_add,
    },
    CommandDefinition {
        name: "remove-files",
        aliases: &["rf"],
        handler: handlers::files::handle_remove,
    },
    CommandDefinition {
        name: "list-files",
        aliases: &["lf"],
        handler: handlers::list::handle_files,
    },
    CommandDefinition {
        name: "stack",
        aliases: &["s"],
        handler: handlers::stack::handle,
    },
    CommandDefinition {
        name: "init",
        aliases: &["i"],
        handler: handlers::stack::handle_init,
    },
    CommandDefinition {
        name: "config",
        aliases: &["c"],
        handler: handlers::stack::handle_config,
    },
    CommandDefinition {
        name: "list-stacks",
        aliases: &["ls"],
        handler: handlers::list::handle_stacks,
    },
    CommandDefinition {
        name: "remove-stack",
        aliases: &["rs"],
        handler: handlers::remove_stack::handle,
    },
    CommandDefinition {
        name: "generated",
        aliases: &["g"],
        handler: handlers::generated::handle,
    },
    CommandDefinition {
        name: "clean",
        aliases: &[],
        handler: handlers::clean::handle,
    },
];

const DEFAULT_COMMAND: &str = "config";

fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // Help and usage errors from a handler's own parser.
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }

        let cancelled = e
            .downcast_ref::<SwizzleError>()
            .is_some_and(SwizzleError::is_cancelled)
            || matches!(e.downcast_ref::<PromptError>(), Some(PromptError::Cancelled));
        if cancelled {
            eprintln!("\n{}", t!("common.info.operation_cancelled").yellow());
            std::process::exit(130);
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let name = cli.command.unwrap_or_else(|| DEFAULT_COMMAND.to_string());
    match find_command(&name) {
        Some(command) => (command.handler)(cli.args),
        None => Err(anyhow::anyhow!(t!("error.unknown_command"), name = name)),
    }
}
