//! Extraction adapter: turns a package location into a symbol table.
//!
//! A location is one of
//! - a directory holding a single Go package,
//! - a single `.go` file,
//! - a `.json` file holding a serialized symbol table,
//! - an import path resolved under `$GOPATH/src`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{Result, VermouthError};
use crate::parser::{self, GoFile, SourceFile};
use crate::scanner::{self, ScanOptions};
use crate::symbols::SymbolTable;

/// Options for extracting one package version.
#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    /// Keep declarations and members with a lower-case name.
    pub include_unexported: bool,
    /// Parse `_test.go` files as well.
    pub include_tests: bool,
    /// Extra glob patterns of files to skip.
    pub ignore_patterns: Vec<String>,
    /// GOPATH used to resolve import paths; may hold several entries.
    pub gopath: Option<String>,
    /// Parser thread count; `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl ExtractOptions {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            include_tests: self.include_tests,
            ignore_patterns: self.ignore_patterns.clone(),
        }
    }
}

/// Resolve a location to an existing path.
///
/// Paths that exist are used as given. Otherwise each GOPATH entry is tried
/// as `<entry>/src/<location>`, in order.
pub fn resolve_location(location: &str, gopath: Option<&str>) -> Result<PathBuf> {
    let direct = Path::new(location);
    if direct.exists() {
        return Ok(direct.to_path_buf());
    }

    if let Some(gopath) = gopath {
        for entry in std::env::split_paths(gopath) {
            if entry.as_os_str().is_empty() {
                continue;
            }
            let candidate = entry.join("src").join(location);
            if candidate.exists() {
                debug!("Resolved {} to {}", location, candidate.display());
                return Ok(candidate);
            }
        }
    }

    Err(VermouthError::PackageNotFound {
        location: location.to_string(),
    })
}

/// Load the symbol table for one package version.
pub fn load_package(location: &str, options: &ExtractOptions) -> Result<SymbolTable> {
    let start = Instant::now();
    let path = resolve_location(location, options.gopath.as_deref())?;

    let table = if path.is_dir() {
        load_directory(&path, options)?
    } else {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => load_json(&path)?,
            Some("go") => {
                let file = read_source(&path)?;
                let parsed = parser::go::parse(&file.source, &file.path, options.include_unexported)?;
                build_table(&path, vec![parsed])?
            }
            _ => {
                return Err(VermouthError::extraction(
                    path.display().to_string(),
                    "expected a package directory, a .go file or a .json symbol table",
                ))
            }
        }
    };

    table
        .validate()
        .map_err(|e| e.at_location(path.display().to_string()))?;

    info!(
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Extracted {}: {} structs, {} interfaces",
        location,
        table.structs().len(),
        table.interfaces().len()
    );
    Ok(table)
}

fn load_json(path: &Path) -> Result<SymbolTable> {
    let json = fs::read_to_string(path)
        .map_err(|e| VermouthError::extraction(path.display().to_string(), e.to_string()))?;
    SymbolTable::from_json(&json)
        .map_err(|e| VermouthError::extraction(path.display().to_string(), e.to_string()))
}

fn read_source(path: &Path) -> Result<SourceFile> {
    let source = fs::read_to_string(path)
        .map_err(|e| VermouthError::extraction(path.display().to_string(), e.to_string()))?;
    Ok(SourceFile {
        path: path.display().to_string(),
        source,
    })
}

fn load_directory(dir: &Path, options: &ExtractOptions) -> Result<SymbolTable> {
    let scan = scanner::scan_package(dir, &options.scan_options())?;
    debug!(
        "Scanned {}: {} files, {} skipped in {:.2}ms",
        dir.display(),
        scan.len(),
        scan.skipped_count,
        scan.duration_ms
    );
    if scan.is_empty() {
        return Err(VermouthError::extraction(
            dir.display().to_string(),
            "no Go source files",
        ));
    }

    let files = scan
        .files
        .iter()
        .map(|p| read_source(p))
        .collect::<Result<Vec<_>>>()?;
    let parsed =
        parser::parse_files_parallel(&files, options.include_unexported, options.num_threads)?;

    build_table(dir, parsed)
}

/// Merge parsed files into one table, rejecting mixed packages.
fn build_table(location: &Path, files: Vec<GoFile>) -> Result<SymbolTable> {
    let files: Vec<GoFile> = files
        .into_iter()
        .filter(|f| {
            let external_test = f.package.as_deref().is_some_and(|p| p.ends_with("_test"));
            if external_test {
                debug!("Skipping external test package in {}", f.path);
            }
            !external_test
        })
        .collect();

    let packages: BTreeSet<&str> = files.iter().filter_map(|f| f.package.as_deref()).collect();
    if packages.len() > 1 {
        return Err(VermouthError::MultiplePackages {
            location: location.display().to_string(),
            packages: packages.into_iter().collect::<Vec<_>>().join(", "),
        });
    }

    let mut table = SymbolTable::new();
    for file in files {
        SymbolTable::from_parts(file.structs, file.interfaces)
            .and_then(|parsed| table.merge(parsed))
            .map_err(|e| e.at_location(location.display().to_string()))?;
    }
    Ok(table)
}
