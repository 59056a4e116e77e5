//! Vermouth CLI - API compatibility checks for Go packages
//!
//! Compares the structs and interfaces of two versions of a package and
//! reports whether the new version is backward compatible.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{diff, inspect, ExtractArgs};
use config::VermouthConfig;
use output::OutputFormat;

/// Backward compatibility checks for Go package APIs.
#[derive(Parser)]
#[command(name = "vermouth")]
#[command(author, version)]
#[command(about = "Backward compatibility checks for Go package APIs")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  vermouth diff ./api/v1 ./api/v2             Print the compatibility report
  vermouth diff example.com/api/v1 example.com/api/v2 --check
                                              Exit with status 2 on breaking changes
  vermouth inspect ./api/v2 --format json     Dump the extracted declarations")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two versions of a package
    Diff {
        /// Previous version: directory, .go file, .json symbol table or GOPATH import path
        prev: String,

        /// New version, in the same forms as PREV
        new: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with status 2 when the new version is not backward compatible
        #[arg(long)]
        check: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show the declarations extracted from one package
    Inspect {
        /// Package directory, .go file, .json symbol table or GOPATH import path
        package: String,

        #[command(flatten)]
        extract: ExtractArgs,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .vermouth.toml
    let config = VermouthConfig::load(Path::new("."));

    // Resolve output format: CLI flag > config default > Text
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    });

    match config.use_color() {
        Some(use_color) => colored::control::set_override(use_color),
        None if !std::io::stdout().is_terminal() => colored::control::set_override(false),
        None => {}
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Print help if no command provided
            let _ = Cli::command().print_help();
            println!();
            return Ok(ExitCode::SUCCESS);
        }
    };

    match command {
        Commands::Diff {
            prev,
            new,
            output,
            check,
            extract,
        } => diff::run(
            diff::DiffArgs {
                prev: &prev,
                new: &new,
                output: output.as_deref(),
                check,
                quiet: cli.quiet,
            },
            &extract.options(&config),
            format,
        ),
        Commands::Inspect { package, extract } => {
            inspect::run(&package, &extract.options(&config), format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_diff_args() {
        let cli = Cli::try_parse_from([
            "vermouth",
            "diff",
            "v1",
            "v2",
            "-o",
            "report.txt",
            "--check",
            "--format",
            "json",
            "--ignore",
            "mock_*.go",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Some(Commands::Diff {
                prev,
                new,
                output,
                check,
                extract,
            }) => {
                assert_eq!(prev, "v1");
                assert_eq!(new, "v2");
                assert_eq!(output, Some(PathBuf::from("report.txt")));
                assert!(check);
                assert_eq!(extract.ignore, vec!["mock_*.go"]);
            }
            _ => panic!("expected diff command"),
        }
    }
}
