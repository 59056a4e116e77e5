//! Inspect command - show the symbol table extracted from one package

use anyhow::{Context, Result};
use colored::Colorize;
use vermouth_core::{load_package, ExtractOptions, SymbolTable};

use crate::output::{write_output, OutputFormat};

pub fn run(location: &str, options: &ExtractOptions, format: OutputFormat) -> Result<()> {
    let table = load_package(location, options)
        .with_context(|| format!("Failed to extract {}", location))?;

    let content = match format {
        OutputFormat::Text => to_text(location, &table),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&table).context("Failed to serialize symbol table")?;
            json.push('\n');
            json
        }
    };

    write_output(&content, None)
}

fn to_text(location: &str, table: &SymbolTable) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} ({} structs, {} interfaces)\n",
        "PACKAGE:".cyan().bold(),
        location,
        table.structs().len(),
        table.interfaces().len()
    ));

    for s in table.structs() {
        output.push_str(&format!("\n{} {}\n", "struct".dimmed(), s.name.bold()));
        for field in &s.fields {
            output.push_str(&format!("  {}\n", field));
        }
    }

    for i in table.interfaces() {
        output.push_str(&format!("\n{} {}\n", "interface".dimmed(), i.name.bold()));
        for method in &i.methods {
            output.push_str(&format!("  {}\n", method));
        }
    }

    output
}
