//! Error types for loading form definitions and candidate sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a form from external definitions or
/// reading a replay script.
///
/// Keystroke handling never produces these; they only surface at startup.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML form definition could not be parsed.
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A JSON form definition could not be parsed.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The definition file extension is neither YAML nor JSON.
    #[error("unsupported form definition format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A field declared both an inline source and a source file.
    #[error("field `{field}` declares both `source` and `source_file`")]
    AmbiguousSource { field: String },

    /// Terminal setup, drawing or event polling failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// A replay report could not be encoded.
    #[error("failed to encode replay report: {0}")]
    Report(#[source] serde_json::Error),

    /// A replay script used a `<token>` that is not a known key name.
    #[error("unknown replay token `<{token}>` at offset {offset}")]
    UnknownToken { token: String, offset: usize },

    /// A replay script opened a `<token>` without closing it.
    #[error("unterminated replay token at offset {0}")]
    UnterminatedToken(usize),
}

/// Result type for configuration and script loading.
pub type Result<T> = std::result::Result<T, Error>;
