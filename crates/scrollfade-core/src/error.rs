//! Library error types

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A fade/reveal/parallax parameter is out of its accepted range
    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A timing parameter is zero where a window is required
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// Requested preset does not exist
    #[error("unknown fade preset: {0}")]
    UnknownPreset(String),

    /// Settings file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for the settings schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure to read an element's geometry from the host
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The element is no longer part of the host layout
    #[error("element detached: {0}")]
    Detached(String),

    /// The host has no usable viewport yet
    #[error("viewport unavailable")]
    ViewportUnavailable,
}
