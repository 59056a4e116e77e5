//! Package file discovery using the `ignore` crate.
//!
//! A Go package is one directory, so the walk never descends into
//! subdirectories. `.gitignore` (with or without a git repository) and a
//! custom `.vermouthignore` are honored.

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::{Result, VermouthError};

/// Custom ignore file read from the package directory.
pub const IGNORE_FILENAME: &str = ".vermouthignore";

/// Options for scanning a package directory.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Keep `_test.go` files.
    pub include_tests: bool,
    /// Additional glob patterns to ignore (beyond .gitignore).
    pub ignore_patterns: Vec<String>,
}

/// Result of scanning a package directory.
#[derive(Clone, Debug, Default)]
pub struct ScanResult {
    /// Go source files, sorted by path.
    pub files: Vec<PathBuf>,

    /// Number of regular files that were not kept.
    pub skipped_count: usize,

    /// Time taken for the scan in milliseconds.
    pub duration_ms: f64,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_go_source(path: &Path, include_tests: bool) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // The go tool ignores files starting with `_` or `.`
    if name.starts_with('_') || name.starts_with('.') {
        return false;
    }
    name.ends_with(".go") && (include_tests || !name.ends_with("_test.go"))
}

/// Scan a package directory for Go source files.
pub fn scan_package(root: &Path, options: &ScanOptions) -> Result<ScanResult> {
    let start = Instant::now();

    if !root.exists() {
        return Err(VermouthError::PackageNotFound {
            location: root.display().to_string(),
        });
    }
    if !root.is_dir() {
        return Err(VermouthError::extraction(
            root.display().to_string(),
            "not a directory",
        ));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .max_depth(Some(1))
        .hidden(false) // Include hidden files, let gitignore handle it
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILENAME);

    if !options.ignore_patterns.is_empty() {
        let mut override_builder = OverrideBuilder::new(root);
        for pattern in &options.ignore_patterns {
            // The ! prefix turns an override glob into an ignore rule
            if let Err(e) = override_builder.add(&format!("!{}", pattern)) {
                warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => warn!("Ignoring ignore patterns: {}", e),
        }
    }

    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.into_path();
        if is_go_source(&path, options.include_tests) {
            debug!("Found source file {}", path.display());
            files.push(path);
        } else {
            skipped += 1;
        }
    }
    files.sort();

    Ok(ScanResult {
        files,
        skipped_count: skipped,
        duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_package() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("b.go"), "package p\n").unwrap();
        fs::write(root.join("a.go"), "package p\n").unwrap();
        fs::write(root.join("a_test.go"), "package p\n").unwrap();
        fs::write(root.join("README.md"), "# p\n").unwrap();
        fs::write(root.join("gen.go"), "package p\n").unwrap();
        fs::write(root.join("skip.go"), "package p\n").unwrap();
        fs::write(root.join(".gitignore"), "gen.go\n").unwrap();
        fs::write(root.join(IGNORE_FILENAME), "skip.go\n").unwrap();

        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/nested.go"), "package sub\n").unwrap();

        dir
    }

    fn names(result: &ScanResult) -> Vec<String> {
        result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_scan_package_basic() {
        let dir = create_package();
        let result = scan_package(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(names(&result), vec!["a.go", "b.go"]);
        assert!(result.skipped_count >= 2);
    }

    #[test]
    fn test_scan_package_include_tests() {
        let dir = create_package();
        let options = ScanOptions {
            include_tests: true,
            ..Default::default()
        };
        let result = scan_package(dir.path(), &options).unwrap();
        assert_eq!(names(&result), vec!["a.go", "a_test.go", "b.go"]);
    }

    #[test]
    fn test_scan_package_ignore_patterns() {
        let dir = create_package();
        let options = ScanOptions {
            ignore_patterns: vec!["b.*".to_string()],
            ..Default::default()
        };
        let result = scan_package(dir.path(), &options).unwrap();
        assert_eq!(names(&result), vec!["a.go"]);
    }

    #[test]
    fn test_scan_skips_underscore_and_dot_files() {
        let dir = create_package();
        fs::write(dir.path().join("_old.go"), "package p\n").unwrap();
        fs::write(dir.path().join(".scratch.go"), "package p\n").unwrap();

        let result = scan_package(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(names(&result), vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = scan_package(&dir.path().join("nope"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, VermouthError::PackageNotFound { .. }));
    }

    #[test]
    fn test_scan_file_is_error() {
        let dir = create_package();
        let err = scan_package(&dir.path().join("a.go"), &ScanOptions::default()).unwrap_err();
        assert!(err.is_extraction());
    }
}
