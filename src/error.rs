//! Error types and error code constants for omdiff.
//!
//! The engine itself is pure and deterministic, so the taxonomy is short:
//! configuration problems abort before any snapshot work begins, provider
//! failures are fatal (a partial diff is worse than no diff), and everything
//! else is an internal bug. Two non-error outcomes, an ambiguous
//! overload-refactor match and an unsupported symbol kind, are
//! deliberately *not* variants here: the first is the heuristics module's
//! conservative fallback, the second is a logged skip in the snapshot builder.
//!
//! ## Design
//!
//! - **Unified type**: `DiffError` is the single error type of the crate
//! - **Code mapping**: `DiffErrorCode` provides stable integer codes for
//!   embedding callers (CLI exit codes, JSON error payloads)

use std::fmt;

use thiserror::Error;

// ============================================================================
// Error Codes
// ============================================================================

/// Stable error codes for embedding callers.
///
/// These map to CLI exit codes and appear in machine-readable error output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DiffErrorCode {
    /// Conflicting or malformed configuration (bad input from caller).
    InvalidConfig = 2,
    /// The symbol provider failed to produce a model.
    Provider = 3,
    /// Internal errors (bugs, unexpected state).
    Internal = 10,
}

impl DiffErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for DiffErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for the diff engine.
///
/// Every fatal condition aborts the whole run; the engine never emits a
/// partial or inconsistent diff tree.
#[derive(Debug, Error)]
pub enum DiffError {
    /// Conflicting or missing visibility settings. Raised before snapshot
    /// construction begins.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The external symbol provider failed to produce a symbol model.
    #[error("symbol provider error: {message}")]
    Provider { message: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DiffError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DiffError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        DiffError::Provider {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        DiffError::Internal {
            message: message.into(),
        }
    }

    /// Get the stable error code for this error.
    pub fn error_code(&self) -> DiffErrorCode {
        DiffErrorCode::from(self)
    }
}

impl From<&DiffError> for DiffErrorCode {
    fn from(err: &DiffError) -> Self {
        match err {
            DiffError::InvalidConfig { .. } => DiffErrorCode::InvalidConfig,
            DiffError::Provider { .. } => DiffErrorCode::Provider,
            DiffError::Internal { .. } => DiffErrorCode::Internal,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod error_code_mapping {
        use super::*;

        #[test]
        fn invalid_config_maps_to_code_2() {
            let err = DiffError::invalid_config("unknown visibility level");
            assert_eq!(err.error_code(), DiffErrorCode::InvalidConfig);
            assert_eq!(err.error_code().code(), 2);
        }

        #[test]
        fn provider_maps_to_code_3() {
            let err = DiffError::provider("compilation failed");
            assert_eq!(err.error_code().code(), 3);
        }

        #[test]
        fn internal_maps_to_code_10() {
            let err = DiffError::internal("unexpected state");
            assert_eq!(err.error_code().code(), 10);
        }
    }

    mod error_display {
        use super::*;

        #[test]
        fn invalid_config_display() {
            let err = DiffError::invalid_config("missing level");
            assert_eq!(err.to_string(), "invalid configuration: missing level");
        }

        #[test]
        fn provider_display() {
            let err = DiffError::provider("no symbols");
            assert_eq!(err.to_string(), "symbol provider error: no symbols");
        }

        #[test]
        fn code_display_shows_number() {
            assert_eq!(format!("{}", DiffErrorCode::Provider), "3");
        }
    }
}
