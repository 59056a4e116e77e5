//! Structural type equality.
//!
//! Named types compare by identifier. Signatures compare slot by slot, and a
//! slot matches only when both its bound names and its type match, so renaming
//! a parameter counts as a signature change.

use crate::types::{Field, Member, Method, TypeDescriptor};

/// Whether two type descriptors are equal.
pub fn same_type(a: &TypeDescriptor, b: &TypeDescriptor) -> bool {
    match (a, b) {
        (TypeDescriptor::Named(x), TypeDescriptor::Named(y)) => x == y,
        (
            TypeDescriptor::Signature {
                params: pa,
                results: ra,
            },
            TypeDescriptor::Signature {
                params: pb,
                results: rb,
            },
        ) => same_slots(pa, pb) && same_slots(ra, rb),
        _ => false,
    }
}

/// Positional comparison of parameter or result slots.
pub fn same_slots(a: &[Field], b: &[Field]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.name == y.name && same_type(&x.ty, &y.ty))
}

/// Whether two methods have equal signatures. Method names are not compared.
pub fn same_signature(a: &Method, b: &Method) -> bool {
    same_slots(&a.params, &b.params) && same_slots(&a.results, &b.results)
}

impl Member for Field {
    fn name(&self) -> &str {
        &self.name
    }

    fn same_as(&self, other: &Self) -> bool {
        same_type(&self.ty, &other.ty)
    }

    fn validate(&self) -> Result<(), String> {
        self.ty.validate()
    }
}

impl Member for Method {
    fn name(&self) -> &str {
        &self.name
    }

    fn same_as(&self, other: &Self) -> bool {
        same_signature(self, other)
    }

    fn validate(&self) -> Result<(), String> {
        self.params
            .iter()
            .chain(&self.results)
            .try_for_each(|slot| slot.ty.validate())
    }
}
