//! Configuration loading
//!
//! `defaults/shorthand.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`ShorthandConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/shorthand.default.toml");

/// Marker substituted for an expression that failed to evaluate
pub const DEFAULT_ERROR_MARKER: &str = r#"<span style="color: red;">Error</span>"#;

/// Top-level configuration consumed by shorthand applications.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShorthandConfig {
    pub compile: CompileOptions,
    /// Expression values for hosts that evaluate by name lookup
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

/// Knobs of the compiler itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompileOptions {
    pub max_repeat: u32,
    pub max_block_depth: usize,
    /// Nodes one compile may render, counting every repetition and cloned child
    pub max_elements: usize,
    pub error_marker: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_repeat: 1000,
            max_block_depth: 64,
            max_elements: 100_000,
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ShorthandConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ShorthandConfig, ConfigError> {
    Loader::new().build()
}
