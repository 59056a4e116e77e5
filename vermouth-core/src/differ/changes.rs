//! Change set and summary types produced by the differ.

use serde::{Deserialize, Serialize};

use crate::types::{Field, Interface, Method, Struct, TypeDescriptor};

/// A field whose type differs between versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedField {
    pub name: String,
    pub origin_type: TypeDescriptor,
    pub current_type: TypeDescriptor,
}

/// A struct present in both versions with at least one member change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedStruct {
    pub name: String,
    pub removed_fields: Vec<Field>,
    pub modified_fields: Vec<ModifiedField>,
    pub new_fields: Vec<Field>,
}

impl ModifiedStruct {
    pub fn has_changes(&self) -> bool {
        !self.removed_fields.is_empty()
            || !self.modified_fields.is_empty()
            || !self.new_fields.is_empty()
    }

    /// Whether existing users of the struct can stop compiling.
    pub fn is_breaking(&self) -> bool {
        !self.removed_fields.is_empty() || !self.modified_fields.is_empty()
    }
}

/// A method whose signature differs between versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedMethod {
    pub original_method: Method,
    pub current_method: Method,
}

/// An interface present in both versions with at least one method change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedInterface {
    pub name: String,
    pub removed_methods: Vec<Method>,
    pub modified_methods: Vec<ModifiedMethod>,
    pub new_methods: Vec<Method>,
}

impl ModifiedInterface {
    pub fn has_changes(&self) -> bool {
        !self.removed_methods.is_empty()
            || !self.modified_methods.is_empty()
            || !self.new_methods.is_empty()
    }

    pub fn is_breaking(&self) -> bool {
        !self.removed_methods.is_empty() || !self.modified_methods.is_empty()
    }
}

/// Everything that differs between two symbol tables.
///
/// Unchanged declarations are not recorded anywhere.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub removed_structs: Vec<Struct>,
    pub modified_structs: Vec<ModifiedStruct>,
    pub new_structs: Vec<Struct>,
    pub removed_interfaces: Vec<Interface>,
    pub modified_interfaces: Vec<ModifiedInterface>,
    pub new_interfaces: Vec<Interface>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are no changes at all.
    pub fn is_empty(&self) -> bool {
        self.removed_structs.is_empty()
            && self.modified_structs.is_empty()
            && self.new_structs.is_empty()
            && self.removed_interfaces.is_empty()
            && self.modified_interfaces.is_empty()
            && self.new_interfaces.is_empty()
    }

    /// Backward compatibility verdict for this change set.
    pub fn is_compatible(&self) -> bool {
        super::compat::is_backward_compatible(self)
    }

    /// Render the plain-text report.
    pub fn render(&self) -> String {
        crate::exporter::report::render(self, self.is_compatible())
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_changes(self)
    }
}

/// Summary statistics for a change set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub structs_added: u32,
    pub structs_removed: u32,
    pub structs_modified: u32,

    pub interfaces_added: u32,
    pub interfaces_removed: u32,
    pub interfaces_modified: u32,

    pub fields_added: u32,
    pub fields_removed: u32,
    pub fields_modified: u32,

    pub methods_added: u32,
    pub methods_removed: u32,
    pub methods_modified: u32,

    pub breaking_changes: u32,
}

impl DiffSummary {
    pub fn from_changes(changes: &ChangeSet) -> Self {
        let mut summary = Self {
            structs_added: changes.new_structs.len() as u32,
            structs_removed: changes.removed_structs.len() as u32,
            structs_modified: changes.modified_structs.len() as u32,
            interfaces_added: changes.new_interfaces.len() as u32,
            interfaces_removed: changes.removed_interfaces.len() as u32,
            interfaces_modified: changes.modified_interfaces.len() as u32,
            ..Default::default()
        };

        for s in &changes.modified_structs {
            summary.fields_added += s.new_fields.len() as u32;
            summary.fields_removed += s.removed_fields.len() as u32;
            summary.fields_modified += s.modified_fields.len() as u32;
        }
        for i in &changes.modified_interfaces {
            summary.methods_added += i.new_methods.len() as u32;
            summary.methods_removed += i.removed_methods.len() as u32;
            summary.methods_modified += i.modified_methods.len() as u32;
        }

        // Removed declarations count once each; member removals and retypes count per member
        summary.breaking_changes = summary.structs_removed
            + summary.interfaces_removed
            + summary.fields_removed
            + summary.fields_modified
            + summary.methods_removed
            + summary.methods_modified;

        summary
    }

    /// Generate human-readable summary string.
    pub fn text(&self) -> String {
        let groups = [
            (
                "structs",
                self.structs_added,
                self.structs_removed,
                self.structs_modified,
            ),
            (
                "interfaces",
                self.interfaces_added,
                self.interfaces_removed,
                self.interfaces_modified,
            ),
            (
                "fields",
                self.fields_added,
                self.fields_removed,
                self.fields_modified,
            ),
            (
                "methods",
                self.methods_added,
                self.methods_removed,
                self.methods_modified,
            ),
        ];

        let mut parts = Vec::new();
        for (label, added, removed, modified) in groups {
            let mut counts = Vec::new();
            if added > 0 {
                counts.push(format!("{} added", added));
            }
            if removed > 0 {
                counts.push(format!("{} removed", removed));
            }
            if modified > 0 {
                counts.push(format!("{} modified", modified));
            }
            if !counts.is_empty() {
                parts.push(format!("{}: {}", label, counts.join(", ")));
            }
        }

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join("; ")
        }
    }
}
