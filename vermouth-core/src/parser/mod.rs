//! Go source parsing.
//!
//! Files of one package are parsed in parallel with rayon; results come back
//! in input order so merging stays deterministic.

use rayon::prelude::*;

use crate::error::Result;

pub mod go;

mod helpers;

pub use go::GoFile;

/// A source file read from disk, ready for parsing.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: String,
    pub source: String,
}

/// Parse multiple files in parallel using rayon.
///
/// The number of threads is controlled by `num_threads`; `None` or `0` uses
/// the global pool. The first failing file, in input order, is returned.
pub fn parse_files_parallel(
    files: &[SourceFile],
    include_unexported: bool,
    num_threads: Option<usize>,
) -> Result<Vec<GoFile>> {
    // Configure thread pool if specified
    let pool = match num_threads {
        Some(n) if n > 0 => rayon::ThreadPoolBuilder::new().num_threads(n).build().ok(),
        _ => None,
    };

    let parse_fn =
        |file: &SourceFile| -> Result<GoFile> { go::parse(&file.source, &file.path, include_unexported) };

    let results: Vec<Result<GoFile>> = match pool {
        Some(pool) => pool.install(|| files.par_iter().map(parse_fn).collect()),
        None => files.par_iter().map(parse_fn).collect(),
    };

    results.into_iter().collect()
}
