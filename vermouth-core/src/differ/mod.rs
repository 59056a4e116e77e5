//! Declaration diff engine.
//!
//! Compares two symbol tables and classifies every struct and interface as
//! removed, modified or new. Modified declarations carry their own member
//! buckets, so a caller can see exactly which fields or methods moved.
//!
//! # Features
//!
//! - **Exact name matching**: declarations and members are paired by name only
//! - **Structural signatures**: parameter and result slots compare by name and type
//! - **Compatibility verdict**: removals and retypes break, additions do not
//!
//! # Example
//!
//! ```
//! use vermouth_core::differ;
//! use vermouth_core::{Field, Struct, SymbolTable};
//!
//! let old = SymbolTable::from_parts(
//!     vec![Struct::new("Entry", vec![Field::named("Id", "string")])],
//!     vec![],
//! )?;
//! let new = SymbolTable::from_parts(
//!     vec![Struct::new("Entry", vec![Field::named("Id", "int")])],
//!     vec![],
//! )?;
//!
//! let changes = differ::diff(&old, &new)?;
//! assert!(!changes.is_compatible());
//! # Ok::<(), vermouth_core::VermouthError>(())
//! ```

pub mod changes;
pub mod comparator;
pub mod compat;
pub mod equality;

pub use changes::{
    ChangeSet, DiffSummary, ModifiedField, ModifiedInterface, ModifiedMethod, ModifiedStruct,
};
pub use comparator::diff;
pub use compat::is_backward_compatible;
pub use equality::{same_signature, same_type};
