//! Command implementations for the Vermouth CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod diff;
pub mod inspect;

use clap::Args;
use vermouth_core::ExtractOptions;

use crate::config::VermouthConfig;

/// Extraction flags shared by every command.
#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Include unexported (lower-case) declarations and members
    #[arg(long)]
    pub include_unexported: bool,

    /// Parse _test.go files as well
    #[arg(long)]
    pub include_tests: bool,

    /// Glob pattern of files to skip (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// GOPATH used to resolve import paths
    #[arg(long, env = "GOPATH", value_name = "DIR")]
    pub gopath: Option<String>,

    /// Parser threads per package (default: one per CPU)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,
}

impl ExtractArgs {
    /// Merge flags over configuration defaults.
    pub fn options(&self, config: &VermouthConfig) -> ExtractOptions {
        let mut ignore_patterns = config.extract.ignore.clone();
        for pattern in &self.ignore {
            if !ignore_patterns.contains(pattern) {
                ignore_patterns.push(pattern.clone());
            }
        }

        ExtractOptions {
            include_unexported: self.include_unexported || config.extract.include_unexported,
            include_tests: self.include_tests || config.extract.include_tests,
            ignore_patterns,
            gopath: self.gopath.clone().filter(|g| !g.is_empty()),
            num_threads: self.threads.or(config.extract.threads),
        }
    }
}
