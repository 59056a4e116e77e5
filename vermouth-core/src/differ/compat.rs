//! Backward compatibility verdict.

use crate::differ::changes::ChangeSet;

/// A new version is backward compatible when nothing an old caller could use
/// was removed or retyped. Additions never break compatibility.
pub fn is_backward_compatible(changes: &ChangeSet) -> bool {
    changes.removed_structs.is_empty()
        && changes.removed_interfaces.is_empty()
        && !changes.modified_structs.iter().any(|s| s.is_breaking())
        && !changes.modified_interfaces.iter().any(|i| i.is_breaking())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::changes::{ModifiedInterface, ModifiedStruct};
    use crate::types::{Field, Interface, Method, Struct};

    #[test]
    fn test_additions_are_compatible() {
        let cs = ChangeSet {
            new_structs: vec![Struct::new("EntryItem", vec![])],
            new_interfaces: vec![Interface::new("Store", vec![])],
            modified_structs: vec![ModifiedStruct {
                name: "Entry".to_string(),
                new_fields: vec![Field::named("NewField", "string")],
                ..Default::default()
            }],
            modified_interfaces: vec![ModifiedInterface {
                name: "Methods".to_string(),
                new_methods: vec![Method::new("NewApi", vec![], vec![])],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(is_backward_compatible(&cs));
    }

    #[test]
    fn test_removed_declarations_break() {
        let cs = ChangeSet {
            removed_structs: vec![Struct::new("OldEntry", vec![])],
            ..Default::default()
        };
        assert!(!is_backward_compatible(&cs));

        let cs = ChangeSet {
            removed_interfaces: vec![Interface::new("RemovedInterface", vec![])],
            ..Default::default()
        };
        assert!(!is_backward_compatible(&cs));
    }

    #[test]
    fn test_removed_method_breaks() {
        let cs = ChangeSet {
            modified_interfaces: vec![ModifiedInterface {
                name: "Methods".to_string(),
                removed_methods: vec![Method::new("TemporalSession", vec![], vec![])],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(!is_backward_compatible(&cs));
    }

    #[test]
    fn test_any_breaking_struct_breaks() {
        let cs = ChangeSet {
            modified_structs: vec![
                ModifiedStruct {
                    name: "A".to_string(),
                    new_fields: vec![Field::named("X", "int")],
                    ..Default::default()
                },
                ModifiedStruct {
                    name: "B".to_string(),
                    removed_fields: vec![Field::named("Y", "int")],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert!(!is_backward_compatible(&cs));
    }
}
