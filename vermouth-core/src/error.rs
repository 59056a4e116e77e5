//! Error types for vermouth-core.

use thiserror::Error;

/// Result type alias for vermouth-core operations.
pub type Result<T> = std::result::Result<T, VermouthError>;

/// Errors that can occur while extracting or comparing package versions.
#[derive(Error, Debug)]
pub enum VermouthError {
    /// A package version could not be read or parsed.
    #[error("Failed to extract {location}: {message}")]
    Extraction {
        /// Package location, or the file inside it, that failed.
        location: String,
        /// Description of the failure.
        message: String,
    },

    /// The location does not resolve to a directory, Go file or symbol table.
    #[error("Package not found: {location}")]
    PackageNotFound {
        /// Location as given by the caller.
        location: String,
    },

    /// A directory holds files from more than one package.
    #[error("Multiple packages in {location}: {packages}")]
    MultiplePackages {
        location: String,
        /// Comma separated package names.
        packages: String,
    },

    /// The same declaration name was produced twice for one kind.
    #[error("Duplicate {kind} declaration: {name}")]
    DuplicateDeclaration {
        /// Either `struct` or `interface`.
        kind: &'static str,
        name: String,
    },

    /// A member type could not be classified as a named type or a signature.
    #[error("Malformed declaration {declaration}.{member}: {reason}")]
    MalformedDeclaration {
        declaration: String,
        member: String,
        reason: String,
    },

    /// IO error reading source files.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error for symbol tables and reports.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl VermouthError {
    pub fn extraction(location: impl Into<String>, message: impl Into<String>) -> Self {
        VermouthError::Extraction {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Whether the error was raised while turning a location into a symbol table.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            VermouthError::Extraction { .. }
                | VermouthError::PackageNotFound { .. }
                | VermouthError::MultiplePackages { .. }
                | VermouthError::DuplicateDeclaration { .. }
                | VermouthError::IoError(_)
        )
    }

    /// Name the failing location on declaration errors, which carry none.
    pub fn at_location(self, location: impl Into<String>) -> Self {
        match self {
            VermouthError::DuplicateDeclaration { .. }
            | VermouthError::MalformedDeclaration { .. } => {
                VermouthError::extraction(location, self.to_string())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VermouthError::extraction("pkg/v1", "syntax error at line 3");
        assert_eq!(
            err.to_string(),
            "Failed to extract pkg/v1: syntax error at line 3"
        );

        let err = VermouthError::MalformedDeclaration {
            declaration: "Entry".to_string(),
            member: "Id".to_string(),
            reason: "type has no identifier".to_string(),
        };
        assert!(err.to_string().contains("Entry.Id"));
        assert!(!err.is_extraction());
    }

    #[test]
    fn test_duplicate_display() {
        let err = VermouthError::DuplicateDeclaration {
            kind: "struct",
            name: "Entry".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate struct declaration: Entry");
        assert!(err.is_extraction());
    }

    #[test]
    fn test_json_error_is_not_extraction() {
        let err: VermouthError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(!err.is_extraction());
    }

    #[test]
    fn test_at_location_wraps_declaration_errors() {
        let err = VermouthError::DuplicateDeclaration {
            kind: "struct",
            name: "A".to_string(),
        }
        .at_location("api/v2");
        assert!(matches!(err, VermouthError::Extraction { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to extract api/v2: Duplicate struct declaration: A"
        );

        let err = VermouthError::PackageNotFound {
            location: "api/v9".to_string(),
        }
        .at_location("elsewhere");
        assert_eq!(err.to_string(), "Package not found: api/v9");
    }
}
