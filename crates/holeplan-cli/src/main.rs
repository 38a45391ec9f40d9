#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hp: plan the implementation order of typed holes",
    long_about = None
)]
struct Cli {
    /// Output format (defaults to pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Read configuration from this file instead of `.holeplan/config.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Analyze typed holes",
        long_about = "Infer dependencies, detect cycles, schedule holes and find the critical path.",
        after_help = "EXAMPLES:\n    # Summarize a holes document\n    hp analyze holes.json\n\n    # Full analysis as JSON, reading stdin\n    cat holes.json | hp analyze - --json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Print the milestone roadmap",
        long_about = "Group the implementation order into milestones and print the roadmap.",
        after_help = "EXAMPLES:\n    # Print the roadmap\n    hp roadmap holes.json\n\n    # Without implementation suggestions\n    hp roadmap holes.json --no-suggestions"
    )]
    Roadmap(cmd::roadmap::RoadmapArgs),

    #[command(
        about = "List circular dependencies",
        long_about = "List strong-edge dependency cycles and the holes they keep unscheduled.",
        after_help = "EXAMPLES:\n    # List cycles\n    hp cycles holes.json\n\n    # Emit machine-readable output\n    hp cycles holes.json --json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        about = "Print the implementation order",
        long_about = "Print holes in dependency order with their priority/complexity ratio.",
        after_help = "EXAMPLES:\n    # Print the order\n    hp order holes.json\n\n    # Match hole names as whole words only\n    hp order holes.json --whole-word"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    hp completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HOLEPLAN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "holeplan=debug,info"
        } else {
            "holeplan=info,warn"
        })
    });

    let format = env::var("HOLEPLAN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let project_root = env::current_dir().context("failed to resolve the working directory")?;
    let output = cli.output_mode();
    let config = cli.config.as_deref();
    debug!(?output, root = %project_root.display(), "starting");

    match cli.command {
        Commands::Analyze(ref args) => {
            cmd::analyze::run_analyze(args, config, output, &project_root)
        }
        Commands::Roadmap(ref args) => {
            cmd::roadmap::run_roadmap(args, config, output, &project_root)
        }
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, config, output, &project_root),
        Commands::Order(ref args) => cmd::order::run_order(args, config, output, &project_root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["hp", "--json", "analyze", "holes.json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn json_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["hp", "order", "holes.json", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["hp", "cycles", "--format", "text"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn input_defaults_to_stdin() {
        let cli = Cli::parse_from(["hp", "analyze"]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input.input, PathBuf::from("-"));
        assert!(!args.input.whole_word);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["hp", "roadmap", "x.json", "--config", "cfg.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));
        let Commands::Roadmap(args) = cli.command else {
            panic!("expected roadmap");
        };
        assert!(!args.no_suggestions);
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["hp", "analyze", "x.json"],
            vec!["hp", "roadmap", "x.json", "--no-suggestions"],
            vec!["hp", "cycles", "x.json"],
            vec!["hp", "order", "x.json", "--whole-word"],
            vec!["hp", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "failed to parse {args:?}: {:?}", result.err());
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
