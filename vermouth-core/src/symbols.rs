//! Symbol tables: every struct and interface declared by one package version.
//!
//! Each kind keeps its declarations in first-seen order next to a name index,
//! so the differ can walk in source order and look up by exact name.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{Result, VermouthError};
use crate::types::{Interface, Member, Struct};

/// Name-keyed, order-preserving collection of declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SymbolTableRepr", into = "SymbolTableRepr")]
pub struct SymbolTable {
    structs: Vec<Struct>,
    interfaces: Vec<Interface>,
    struct_index: HashMap<String, usize>,
    interface_index: HashMap<String, usize>,
}

/// On-disk shape of a symbol table.
#[derive(Serialize, Deserialize)]
struct SymbolTableRepr {
    #[serde(default)]
    structs: Vec<Struct>,
    #[serde(default)]
    interfaces: Vec<Interface>,
}

impl TryFrom<SymbolTableRepr> for SymbolTable {
    type Error = VermouthError;

    fn try_from(repr: SymbolTableRepr) -> Result<Self> {
        SymbolTable::from_parts(repr.structs, repr.interfaces)
    }
}

impl From<SymbolTable> for SymbolTableRepr {
    fn from(table: SymbolTable) -> Self {
        SymbolTableRepr {
            structs: table.structs,
            interfaces: table.interfaces,
        }
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from declarations in source order.
    pub fn from_parts(structs: Vec<Struct>, interfaces: Vec<Interface>) -> Result<Self> {
        let mut table = Self::new();
        for s in structs {
            table.insert_struct(s)?;
        }
        for i in interfaces {
            table.insert_interface(i)?;
        }
        Ok(table)
    }

    /// Parse a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert_struct(&mut self, s: Struct) -> Result<()> {
        if self.struct_index.contains_key(&s.name) {
            return Err(VermouthError::DuplicateDeclaration {
                kind: "struct",
                name: s.name,
            });
        }
        self.struct_index.insert(s.name.clone(), self.structs.len());
        self.structs.push(s);
        Ok(())
    }

    pub fn insert_interface(&mut self, i: Interface) -> Result<()> {
        if self.interface_index.contains_key(&i.name) {
            return Err(VermouthError::DuplicateDeclaration {
                kind: "interface",
                name: i.name,
            });
        }
        self.interface_index
            .insert(i.name.clone(), self.interfaces.len());
        self.interfaces.push(i);
        Ok(())
    }

    /// Append every declaration of `other`, keeping its order.
    pub fn merge(&mut self, other: SymbolTable) -> Result<()> {
        for s in other.structs {
            self.insert_struct(s)?;
        }
        for i in other.interfaces {
            self.insert_interface(i)?;
        }
        Ok(())
    }

    pub fn structs(&self) -> &[Struct] {
        &self.structs
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn struct_by_name(&self, name: &str) -> Option<&Struct> {
        self.struct_index.get(name).map(|&i| &self.structs[i])
    }

    pub fn interface_by_name(&self, name: &str) -> Option<&Interface> {
        self.interface_index.get(name).map(|&i| &self.interfaces[i])
    }

    pub fn contains_struct(&self, name: &str) -> bool {
        self.struct_index.contains_key(name)
    }

    pub fn contains_interface(&self, name: &str) -> bool {
        self.interface_index.contains_key(name)
    }

    /// Total number of declarations.
    pub fn len(&self) -> usize {
        self.structs.len() + self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check every member type, failing on the first one that cannot be classified.
    pub fn validate(&self) -> Result<()> {
        for s in &self.structs {
            validate_members(&s.name, &s.fields)?;
        }
        for i in &self.interfaces {
            validate_members(&i.name, &i.methods)?;
        }
        Ok(())
    }
}

fn validate_members<M: Member>(declaration: &str, members: &[M]) -> Result<()> {
    let mut seen = HashSet::new();
    for member in members {
        if !seen.insert(member.name()) {
            return Err(VermouthError::MalformedDeclaration {
                declaration: declaration.to_string(),
                member: member.name().to_string(),
                reason: "duplicate member name".to_string(),
            });
        }
        member
            .validate()
            .map_err(|reason| VermouthError::MalformedDeclaration {
                declaration: declaration.to_string(),
                member: member.name().to_string(),
                reason,
            })?;
    }
    Ok(())
}
