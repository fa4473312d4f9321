//! Error types for the folio-motion shell.
//!
//! The controllers themselves never fail: missing nodes, empty focus sets and
//! re-entrant lifecycle calls are handled locally as no-ops. Errors exist only
//! at the edges, where configuration, page fixtures and the log file are read.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`ConfigError`](crate::config::ConfigError) - config file read / TOML parse failures
//!   - [`FixtureError`] - page fixture read / JSON parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing setup failures

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Page fixture could not be loaded.
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Log output could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

/// Errors encountered while loading a page fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("Failed to read fixture at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The fixture is not valid JSON or does not match the page schema.
    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A viewport dimension was zero, negative or not finite.
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_read_error_mentions_path() {
        let err = FixtureError::Read {
            path: PathBuf::from("/tmp/missing-page.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/missing-page.json"));
    }

    #[test]
    fn fixture_error_converts_into_app_error() {
        let err: AppError = FixtureError::InvalidViewport {
            width: 0.0,
            height: 800.0,
        }
        .into();
        assert!(matches!(err, AppError::Fixture(_)));
        assert!(err.to_string().contains("0x800"));
    }
}
