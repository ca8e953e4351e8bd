//! Error types for fallible I/O boundaries.
//!
//! The engine, reducers, and import resolver are total and never return
//! errors. Only persistence, configuration loading, and analyzer
//! implementations surface `Error`.

use thiserror::Error;

/// Main error type for allocation I/O.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),
}

/// Result type alias for allocation I/O.
pub type Result<T> = std::result::Result<T, Error>;
