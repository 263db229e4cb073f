use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of examined lines before a sniff stops
pub const DEFAULT_SNIFF_LINE_LIMIT: usize = 10;

/// Default number of lines in an annotation peek
pub const DEFAULT_PEEK_LINE_COUNT: usize = 5;

/// Default maximum characters kept per peek line
pub const DEFAULT_PEEK_LINE_WIDTH: usize = 256;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What a sniff reports once every examined line matched its grammar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SniffPolicy {
    /// Report no match, as deployed detection pipelines currently observe
    #[default]
    Legacy,
    /// Report a match when at least one line was examined and none failed
    AcceptCleanScan,
}

/// How base sizes from several reference offsets files are reconciled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasesizePolicy {
    /// The last file seen sets the value
    #[default]
    LastWins,
    /// Differing values abort extraction
    RequireAgreement,
}

/// Tunables for sniffing, extraction and previews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatatypeConfig {
    /// Non-blank lines examined before a sniff gives up
    pub sniff_line_limit: usize,
    pub sniff_policy: SniffPolicy,
    pub basesize_policy: BasesizePolicy,
    pub peek_line_count: usize,
    pub peek_line_width: usize,
}

impl Default for DatatypeConfig {
    fn default() -> Self {
        Self {
            sniff_line_limit: DEFAULT_SNIFF_LINE_LIMIT,
            sniff_policy: SniffPolicy::default(),
            basesize_policy: BasesizePolicy::default(),
            peek_line_count: DEFAULT_PEEK_LINE_COUNT,
            peek_line_width: DEFAULT_PEEK_LINE_WIDTH,
        }
    }
}

impl DatatypeConfig {
    /// Load a config from a JSON file; absent fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read or
    /// `ConfigError::Parse` if it is not valid JSON for this schema.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the JSON does not match the schema.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
