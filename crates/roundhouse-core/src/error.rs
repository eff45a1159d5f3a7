// SPDX-FileCopyrightText: 2026 Roundhouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Roundhouse backend coordinator.

use thiserror::Error;

/// The primary error type used across Roundhouse crates.
#[derive(Debug, Error)]
pub enum RoundhouseError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend process errors (spawn failure, broken pipe, abnormal exit).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A backend name that does not map to any supported kind.
    #[error("unknown backend: {name}")]
    UnknownBackend { name: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Backend output or a local cache file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RoundhouseError {
    /// Backend error with no underlying source.
    pub fn backend(message: impl Into<String>) -> Self {
        RoundhouseError::Backend {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_prefixed_by_category() {
        let err = RoundhouseError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");

        let err = RoundhouseError::UnknownBackend {
            name: "cursor".into(),
        };
        assert_eq!(err.to_string(), "unknown backend: cursor");

        let err = RoundhouseError::backend("spawn failed");
        assert_eq!(err.to_string(), "backend error: spawn failed");
    }

    #[test]
    fn backend_error_preserves_source() {
        let io = std::io::Error::other("pipe closed");
        let err = RoundhouseError::Backend {
            message: "write failed".into(),
            source: Some(Box::new(io)),
        };
        let source = std::error::Error::source(&err).expect("source present");
        assert_eq!(source.to_string(), "pipe closed");
    }
}
