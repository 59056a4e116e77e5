//! JSON format exporter.

use serde::Serialize;

use crate::differ::changes::{ChangeSet, DiffSummary};
use crate::error::Result;

/// Machine-readable report: verdict, counts and the full change set.
#[derive(Serialize)]
struct Report<'a> {
    compatible: bool,
    summary: DiffSummary,
    changes: &'a ChangeSet,
}

/// Export a change set to JSON.
pub fn export(changes: &ChangeSet, pretty: bool) -> Result<String> {
    let report = Report {
        compatible: changes.is_compatible(),
        summary: changes.summary(),
        changes,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}
