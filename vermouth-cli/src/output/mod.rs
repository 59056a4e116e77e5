//! Output formats and destinations for the CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text report (default)
    #[default]
    Text,
    /// JSON format for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Write rendered output to a file, or to stdout when no file is given.
pub fn write_output(content: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        write_output("report\n", Some(path.as_path())).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "report\n");
    }

    #[test]
    fn test_write_output_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/report.txt");
        let err = write_output("report\n", Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
