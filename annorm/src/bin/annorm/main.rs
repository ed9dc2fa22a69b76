mod commands;
mod context;
mod examples;
mod output;
mod scanner;

use anyhow::Result;
use clap::{Command, CommandFactory, FromArgMatches, Parser, Subcommand};

use commands::{
    entities::{EntitiesArgs, handle_entities},
    set::{SetArgs, handle_set},
};
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};

const ENVIRONMENT_HELP: &str = "\
Environment:
  RUST_LOG   Library log filter, e.g. annorm=debug shows how each field was mapped
  NO_COLOR   Disable colored output

Configuration:
  annorm.toml at the project root sets [scan] dirs and default [aliases]";

#[derive(Parser)]
#[command(name = "annorm")]
#[command(version = "0.1.0")]
#[command(
    about = "Inspect doc-comment entity mappings and render SQL SET fragments",
    long_about = r#"Inspect doc-comment entity mappings and render SQL SET fragments.

Entities are structs deriving annorm::Entity whose doc comments carry
annotations such as @table=guestbook, @type=integer, @pkey.

Commands:
  entities  List entities and how their fields map to columns
  set       Render the SET fragment for a record given on the command line
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

fn cli_command() -> Command {
    let mut command = Cli::command().after_long_help(ENVIRONMENT_HELP);
    for example in command_examples() {
        let help = render_examples(example.groups);
        command = command.mut_subcommand(example.name, |subcommand| subcommand.after_long_help(help));
    }
    command
}

/// Plain-text example listing appended to a subcommand's `--help`.
fn render_examples(groups: &[ExampleGroup]) -> String {
    let sections: Vec<String> = groups
        .iter()
        .map(|group| {
            let commands: Vec<String> = group.commands.iter().map(|command| format!("  $ {command}")).collect();
            format!("{}:\n{}", group.title, commands.join("\n"))
        })
        .collect();
    format!("Examples:\n\n{}", sections.join("\n\n"))
}

#[derive(Subcommand)]
enum Commands {
    /// List entities and how their fields map to columns
    Entities(EntitiesArgs),

    /// Render the SET fragment for a record given on the command line
    Set(SetArgs),
}

fn main() {
    env_logger::init();

    let matches = cli_command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let no_color = cli.no_color;

    if let Err(err) = execute(cli) {
        let output = OutputManager::new(GlobalOptions {
            no_color,
            ..Default::default()
        });
        output.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let global_options = GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    if global_options.no_color {
        colored::control::set_override(false);
    }

    let output = OutputManager::new(global_options);

    match cli.command {
        Commands::Entities(args) => handle_entities(args, &output)?,
        Commands::Set(args) => handle_set(args, &output)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn examples_are_attached_to_subcommands() {
        let text = render_examples(commands::set::EXAMPLES);
        assert!(text.starts_with("Examples:\n\nRender Assignments:\n  $ annorm set GuestbookRecord"));

        let mut command = cli_command();
        let help = command
            .find_subcommand_mut("entities")
            .map(|entities| entities.render_long_help().to_string())
            .unwrap_or_default();
        assert!(help.contains("$ annorm entities GuestbookRecord"));
    }

    #[test]
    fn parses_set_invocation() {
        let cli = Cli::try_parse_from([
            "annorm", "--output", "compact", "set", "GuestbookRecord", "-V", "id=42", "--fields", "pkey", "--insert",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Compact);
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.values, vec!["id=42"]);
                assert_eq!(args.fields, "pkey");
                assert!(args.insert);
            }
            Commands::Entities(_) => panic!("expected set"),
        }
    }
}
