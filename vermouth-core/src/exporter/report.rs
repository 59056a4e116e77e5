//! Plain-text compatibility report.
//!
//! The layout is fixed: verdict, `Structs:` section, a `========` separator,
//! then the `Interfaces:` section. Section labels are always printed, even
//! with an empty body; member sub-lists only when they have entries.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::differ::changes::{ChangeSet, ModifiedInterface, ModifiedStruct};

pub const COMPATIBLE: &str = "The New API is backward compatible.";
pub const NOT_COMPATIBLE: &str = "The New API is NOT backward compatible.";

const SEPARATOR: &str = "========";
const SUB_INDENT: &str = "\t";
const ITEM_INDENT: &str = "\t\t";

static TRAILING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t ]+\n").unwrap());
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Render a change set with the given verdict.
pub fn render(changes: &ChangeSet, compatible: bool) -> String {
    let mut lines = Vec::new();

    lines.push(verdict(compatible).to_string());
    lines.push(String::new());

    lines.push("Structs:".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Deprecated: {}",
        join_names(changes.removed_structs.iter().map(|s| s.name.as_str()))
    ));
    lines.push(String::new());
    lines.push("Modified:".to_string());
    lines.push(String::new());
    for s in &changes.modified_structs {
        render_modified_struct(s, &mut lines);
    }
    lines.push(format!(
        "New: {}",
        join_names(changes.new_structs.iter().map(|s| s.name.as_str()))
    ));
    lines.push(String::new());

    lines.push(SEPARATOR.to_string());
    lines.push(String::new());

    lines.push("Interfaces:".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Deprecated: {}",
        join_names(changes.removed_interfaces.iter().map(|i| i.name.as_str()))
    ));
    lines.push(String::new());
    lines.push("Modified:".to_string());
    lines.push(String::new());
    for i in &changes.modified_interfaces {
        render_modified_interface(i, &mut lines);
    }
    lines.push(format!(
        "New: {}",
        join_names(changes.new_interfaces.iter().map(|i| i.name.as_str()))
    ));

    normalize(&lines.join("\n"))
}

pub fn verdict(compatible: bool) -> &'static str {
    if compatible {
        COMPATIBLE
    } else {
        NOT_COMPATIBLE
    }
}

fn render_modified_struct(s: &ModifiedStruct, lines: &mut Vec<String>) {
    lines.push(format!("{}:", s.name));
    lines.push(String::new());

    push_sub_list(
        lines,
        "Deprecated Fields",
        s.removed_fields.iter().map(|f| f.to_string()),
    );
    push_sub_list(
        lines,
        "Type Changes",
        s.modified_fields
            .iter()
            .map(|f| format!("{}: {} -> {}", f.name, f.origin_type, f.current_type)),
    );
    push_sub_list(
        lines,
        "New Fields",
        s.new_fields.iter().map(|f| f.to_string()),
    );
}

fn render_modified_interface(i: &ModifiedInterface, lines: &mut Vec<String>) {
    lines.push(format!("{}:", i.name));
    lines.push(String::new());

    push_sub_list(
        lines,
        "Deprecated Methods",
        i.removed_methods.iter().map(|m| m.to_string()),
    );
    push_sub_list(
        lines,
        "Modified Methods",
        i.modified_methods
            .iter()
            .map(|m| format!("{}\n-> {}", m.original_method, m.current_method)),
    );
    push_sub_list(
        lines,
        "New Methods",
        i.new_methods.iter().map(|m| m.to_string()),
    );
}

/// Push a labelled sub-list; nothing is pushed when it has no items.
fn push_sub_list(lines: &mut Vec<String>, label: &str, items: impl Iterator<Item = String>) {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        return;
    }

    lines.push(format!("{}{}:", SUB_INDENT, label));
    for item in &items {
        for line in item.lines() {
            lines.push(format!("{}{}", ITEM_INDENT, line));
        }
    }
    lines.push(String::new());
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(" ")
}

/// Strip trailing whitespace, collapse blank-line runs and end with a single newline.
pub fn normalize(text: &str) -> String {
    let stripped = TRAILING_WHITESPACE.replace_all(text, "\n");
    let collapsed = BLANK_RUNS.replace_all(&stripped, "\n\n");
    let mut out = collapsed.trim_end().to_string();
    out.push('\n');
    out
}
