//! Configuration loading from `.vermouth.toml`.
//!
//! The file is optional. Command-line flags always win over its values.
//!
//! # Example Configuration
//!
//! ```toml
//! [extract]
//! include_unexported = false
//! include_tests = false
//! ignore = ["zz_generated*.go", "mock_*.go"]
//! threads = 4
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = ".vermouth.toml";

/// Root configuration structure loaded from `.vermouth.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct VermouthConfig {
    /// Package extraction defaults.
    #[serde(default)]
    pub extract: ExtractSettings,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Extraction defaults applied to both package versions.
#[derive(Debug, Deserialize, Default)]
pub struct ExtractSettings {
    /// Keep declarations and members with lower-case names.
    #[serde(default)]
    pub include_unexported: bool,

    /// Parse `_test.go` files too.
    #[serde(default)]
    pub include_tests: bool,

    /// Glob patterns of files to skip, on top of `.gitignore` and `.vermouthignore`.
    ///
    /// # Example
    /// ```toml
    /// ignore = ["zz_generated*.go"]
    /// ```
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Parser threads per package; unset uses one per CPU.
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Output formatting preferences.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored status messages.
    ///
    /// Defaults to `true` when stdout is a TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

impl VermouthConfig {
    /// Load configuration from `.vermouth.toml` in the given directory.
    ///
    /// A missing file gives defaults. Read and parse errors are logged as
    /// warnings and also give defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILENAME);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILENAME, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILENAME, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
