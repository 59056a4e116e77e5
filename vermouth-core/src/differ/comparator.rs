//! Comparator logic for diffing symbol tables.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, info};

use crate::differ::changes::{
    ChangeSet, ModifiedField, ModifiedInterface, ModifiedMethod, ModifiedStruct,
};
use crate::error::Result;
use crate::symbols::SymbolTable;
use crate::types::Member;

/// Member-level differences of one declaration, borrowed from both tables.
struct MemberDiff<'a, M> {
    removed: Vec<&'a M>,
    modified: Vec<(&'a M, &'a M)>,
    added: Vec<&'a M>,
}

impl<M> MemberDiff<'_, M> {
    fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.modified.is_empty() && self.added.is_empty()
    }
}

/// Diff the members of one declaration present in both versions.
///
/// Removed and modified members follow the old order, added members the new order.
fn diff_members<'a, M: Member>(old: &'a [M], new: &'a [M]) -> MemberDiff<'a, M> {
    let mut new_by_name: HashMap<&str, &M> = HashMap::new();
    for member in new {
        new_by_name.entry(member.name()).or_insert(member);
    }
    let old_names: HashSet<&str> = old.iter().map(|m| m.name()).collect();

    let mut diff = MemberDiff {
        removed: Vec::new(),
        modified: Vec::new(),
        added: Vec::new(),
    };

    for member in old {
        match new_by_name.get(member.name()) {
            None => {
                debug!("Found removed: {}", member.name());
                diff.removed.push(member);
            }
            Some(current) if !member.same_as(current) => {
                debug!("Found type-changed: {}", member.name());
                diff.modified.push((member, *current));
            }
            Some(_) => {}
        }
    }

    for member in new {
        if !old_names.contains(member.name()) {
            debug!("Found new: {}", member.name());
            diff.added.push(member);
        }
    }

    diff
}

fn diff_structs(old: &SymbolTable, new: &SymbolTable, changes: &mut ChangeSet) {
    for base in old.structs() {
        let Some(head) = new.struct_by_name(&base.name) else {
            debug!("Struct removed: {}", base.name);
            changes.removed_structs.push(base.clone());
            continue;
        };

        debug!("Comparing struct {}", base.name);
        let diff = diff_members(&base.fields, &head.fields);
        if diff.is_empty() {
            continue;
        }

        changes.modified_structs.push(ModifiedStruct {
            name: base.name.clone(),
            removed_fields: diff.removed.into_iter().cloned().collect(),
            modified_fields: diff
                .modified
                .into_iter()
                .map(|(origin, current)| ModifiedField {
                    name: origin.name.clone(),
                    origin_type: origin.ty.clone(),
                    current_type: current.ty.clone(),
                })
                .collect(),
            new_fields: diff.added.into_iter().cloned().collect(),
        });
    }

    for head in new.structs() {
        if !old.contains_struct(&head.name) {
            debug!("Struct added: {}", head.name);
            changes.new_structs.push(head.clone());
        }
    }
}

fn diff_interfaces(old: &SymbolTable, new: &SymbolTable, changes: &mut ChangeSet) {
    for base in old.interfaces() {
        let Some(head) = new.interface_by_name(&base.name) else {
            debug!("Interface removed: {}", base.name);
            changes.removed_interfaces.push(base.clone());
            continue;
        };

        debug!("Comparing interface {}", base.name);
        let diff = diff_members(&base.methods, &head.methods);
        if diff.is_empty() {
            continue;
        }

        changes.modified_interfaces.push(ModifiedInterface {
            name: base.name.clone(),
            removed_methods: diff.removed.into_iter().cloned().collect(),
            modified_methods: diff
                .modified
                .into_iter()
                .map(|(original, current)| ModifiedMethod {
                    original_method: original.clone(),
                    current_method: current.clone(),
                })
                .collect(),
            new_methods: diff.added.into_iter().cloned().collect(),
        });
    }

    for head in new.interfaces() {
        if !old.contains_interface(&head.name) {
            debug!("Interface added: {}", head.name);
            changes.new_interfaces.push(head.clone());
        }
    }
}

/// Compute the change set between an old and a new symbol table.
///
/// Both tables are validated first; a member whose type cannot be classified
/// fails the whole comparison with `MalformedDeclaration`.
pub fn diff(old: &SymbolTable, new: &SymbolTable) -> Result<ChangeSet> {
    let start = Instant::now();
    old.validate()?;
    new.validate()?;

    let mut changes = ChangeSet::new();
    diff_structs(old, new, &mut changes);
    diff_interfaces(old, new, &mut changes);

    info!(
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        compatible = changes.is_compatible(),
        "{}",
        changes.summary().text()
    );
    Ok(changes)
}
