//! Vermouth core - API compatibility diff engine for Go packages.
//!
//! Two versions of a package are extracted into symbol tables of structs and
//! interfaces, diffed by exact name, and rendered as a report that ends in a
//! backward compatibility verdict.
//!
//! # Features
//!
//! - **Go extraction**: tree-sitter parsing of package directories, files or GOPATH import paths
//! - **Parallel parsing**: both versions and the files of each version are parsed with Rayon
//! - **Structural signatures**: method and `func` types compare slot by slot
//! - **Multiple export formats**: plain-text report, JSON
//!
//! # Example
//!
//! ```no_run
//! use vermouth_core::{compare, ExtractOptions};
//!
//! let changes = compare("api/v1", "api/v2", &ExtractOptions::default())?;
//! print!("{}", changes.render());
//! if !changes.is_compatible() {
//!     std::process::exit(2);
//! }
//! # Ok::<(), vermouth_core::VermouthError>(())
//! ```

pub mod differ;
pub mod error;
pub mod exporter;
pub mod extract;
pub mod parser;
pub mod scanner;
pub mod symbols;
pub mod types;

pub use differ::{ChangeSet, DiffSummary};
pub use error::{Result, VermouthError};
pub use extract::{load_package, ExtractOptions};
pub use symbols::SymbolTable;
pub use types::{Field, Interface, Member, Method, Struct, TypeDescriptor};

/// Extract both package versions and diff them.
///
/// The two extractions run in parallel; an extraction failure of either side
/// fails the comparison. The old side's error wins when both fail.
pub fn compare(
    old_location: &str,
    new_location: &str,
    options: &ExtractOptions,
) -> Result<ChangeSet> {
    let (old, new) = rayon::join(
        || load_package(old_location, options),
        || load_package(new_location, options),
    );
    differ::diff(&old?, &new?)
}
