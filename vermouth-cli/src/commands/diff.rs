//! Diff command - compare two versions of a Go package
//!
//! Extracts both versions, prints the compatibility report and optionally
//! fails the process when the new version breaks existing callers.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use vermouth_core::exporter::{json, report};
use vermouth_core::{compare, ChangeSet, ExtractOptions};

use crate::output::{write_output, OutputFormat};

/// Exit status used by `--check` when the new version is not backward compatible.
pub const INCOMPATIBLE_EXIT_CODE: u8 = 2;

pub struct DiffArgs<'a> {
    pub prev: &'a str,
    pub new: &'a str,
    pub output: Option<&'a Path>,
    pub check: bool,
    pub quiet: bool,
}

pub fn run(args: DiffArgs<'_>, options: &ExtractOptions, format: OutputFormat) -> Result<ExitCode> {
    let start = Instant::now();

    let changes = compare(args.prev, args.new, options)
        .with_context(|| format!("Failed to compare {} with {}", args.prev, args.new))?;
    let compatible = changes.is_compatible();

    let content = render(&changes, format)?;
    write_output(&content, args.output)?;

    if let Some(path) = args.output {
        if !args.quiet {
            eprintln!(
                "{} {} ({}ms)",
                status_line(compatible),
                changes.summary().text().dimmed(),
                start.elapsed().as_millis()
            );
            eprintln!("Report written to {}", path.display().to_string().cyan());
        }
    }

    if args.check && !compatible {
        return Ok(ExitCode::from(INCOMPATIBLE_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

fn render(changes: &ChangeSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(changes.render()),
        OutputFormat::Json => {
            let mut content = json::export(changes, true).context("Failed to serialize report")?;
            content.push('\n');
            Ok(content)
        }
    }
}

fn status_line(compatible: bool) -> colored::ColoredString {
    let verdict = report::verdict(compatible);
    if compatible {
        verdict.green().bold()
    } else {
        verdict.red().bold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vermouth_core::{Field, Struct};

    #[test]
    fn test_render_formats() {
        let changes = ChangeSet {
            new_structs: vec![Struct::new("Entry", vec![Field::named("Id", "int")])],
            ..Default::default()
        };

        let text = render(&changes, OutputFormat::Text).unwrap();
        assert!(text.starts_with("The New API is backward compatible.\n"));
        assert!(text.contains("New: Entry\n"));

        let json = render(&changes, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["compatible"], true);
        assert!(json.ends_with("}\n"));
    }
}
