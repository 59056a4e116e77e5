//! Declaration model for one version of a package's public surface.
//!
//! These types are produced by the extraction adapter and consumed by the
//! differ. They carry no source positions: two declarations are compared
//! purely by name and by the shape of their members.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type as seen by the differ: either a plain identifier or a function
/// signature whose slots may themselves hold signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A named type such as `int`, `*Client` or `map[string]int`.
    Named(String),
    /// A function type `func(params) (results)`.
    Signature {
        params: Vec<Field>,
        results: Vec<Field>,
    },
}

impl TypeDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    pub fn signature(params: Vec<Field>, results: Vec<Field>) -> Self {
        TypeDescriptor::Signature { params, results }
    }

    pub fn is_signature(&self) -> bool {
        matches!(self, TypeDescriptor::Signature { .. })
    }

    /// Check that every named type in this descriptor has an identifier.
    ///
    /// Returns a short reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            TypeDescriptor::Named(name) if name.trim().is_empty() => {
                Err("type has no identifier".to_string())
            }
            TypeDescriptor::Named(_) => Ok(()),
            TypeDescriptor::Signature { params, results } => {
                params.iter().chain(results).try_for_each(|f| f.ty.validate())
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Named(name) => f.write_str(name),
            TypeDescriptor::Signature { params, results } => write!(
                f,
                "func({}) ({})",
                join_fields(params),
                join_fields(results)
            ),
        }
    }
}

/// A struct field or one parameter/result slot of a signature.
///
/// Parameter slots declared as `a, b int` keep their joined name list
/// (`"a, b"`) as a single name; unnamed slots have an empty name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Shorthand for a field whose type is a plain identifier.
    pub fn named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, TypeDescriptor::named(type_name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.name, self.ty)
        }
    }
}

/// Join parameter or result slots the way they are written in a signature.
pub fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A method of an interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

impl Method {
    pub fn new(name: impl Into<String>, params: Vec<Field>, results: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            params,
            results,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) ({})",
            self.name,
            join_fields(&self.params),
            join_fields(&self.results)
        )
    }
}

/// A named record type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// A named method set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn new(name: impl Into<String>, methods: Vec<Method>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }
}

/// A struct field or interface method, as seen by the member differ.
pub trait Member {
    fn name(&self) -> &str;

    /// Whether `other` has the same type (fields) or signature (methods).
    fn same_as(&self, other: &Self) -> bool;

    /// Reject members whose types cannot be classified.
    fn validate(&self) -> Result<(), String>;
}
