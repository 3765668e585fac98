//! Reader and writer options, optionally loaded from a TOML file.
//!
//! The options file is optional: a missing file yields `FeedOptions::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::content::Attribute;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in options file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Options file exceeds maximum allowed size.
    #[error("Options file too large: {0}")]
    TooLarge(String),

    /// A value is syntactically valid but unusable.
    #[error("Invalid option: {0}")]
    Invalid(String),
}

// ============================================================================
// Options
// ============================================================================

/// Options shared by readers, writers, parsers and formatters.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
///
/// ```toml
/// use_cdata = true
/// indent = true
/// indent_size = 4
/// max_depth = 32
///
/// [namespaces]
/// content = "http://purl.org/rss/1.0/modules/content/"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedOptions {
    /// Wrap scalar values in CDATA sections instead of escaping them.
    pub use_cdata: bool,

    /// Pretty-print written documents.
    pub indent: bool,

    /// Spaces per indentation level when `indent` is set.
    pub indent_size: usize,

    /// Maximum element nesting materialized into a content tree.
    pub max_depth: usize,

    /// Known namespaces, prefix → URI, declared on the feed root by writers.
    pub namespaces: BTreeMap<String, String>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            use_cdata: false,
            indent: false,
            indent_size: 2,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            namespaces: BTreeMap::new(),
        }
    }
}

impl FeedOptions {
    /// Maximum options file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Default nesting limit, deep enough for XHTML content.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    const KNOWN_KEYS: [&'static str; 5] =
        ["use_cdata", "indent", "indent_size", "max_depth", "namespaces"];

    /// Load options from a TOML file.
    ///
    /// - Missing file → `Ok(FeedOptions::default())`
    /// - Empty file → `Ok(FeedOptions::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Size is checked before reading.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Options file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No options file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Options file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let options = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            max_depth = options.max_depth,
            namespaces = options.namespaces.len(),
            "Loaded feed options"
        );
        Ok(options)
    }

    /// Parse options from TOML text. Blank text yields the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in options file, ignoring");
                }
            }
        }

        let options: FeedOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        for (prefix, uri) in &self.namespaces {
            if prefix.is_empty() || prefix.contains(':') || prefix.starts_with("xml") {
                return Err(ConfigError::Invalid(format!(
                    "namespace prefix '{prefix}' is not usable"
                )));
            }
            if uri.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "namespace '{prefix}' has an empty URI"
                )));
            }
        }
        Ok(())
    }

    /// The configured namespaces as `xmlns:prefix` declaration attributes.
    pub fn namespace_attributes(&self) -> Vec<Attribute> {
        self.namespaces
            .iter()
            .map(|(prefix, uri)| Attribute::new(format!("xmlns:{prefix}"), uri.clone()))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
