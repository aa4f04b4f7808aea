//! Visibility configuration for snapshot construction.
//!
//! Configuration is one immutable value threaded explicitly into snapshot
//! construction. Nothing downstream re-reads mutable state, which is what
//! guarantees both snapshots are filtered identically.

use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Which declared accessibilities participate in comparison.
///
/// Applied identically, and exactly once, to both the old and new snapshot
/// while they are being built. The default surface is public (plus
/// protected, which is part of the public contract of a non-sealed type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Include internal (assembly-visible) symbols.
    pub include_internal: bool,
    /// Include private symbols. Implies the internal surface.
    pub include_private: bool,
}

impl VisibilityConfig {
    /// The default public-surface configuration.
    pub fn public_only() -> Self {
        VisibilityConfig::default()
    }

    /// Public plus internal symbols.
    pub fn with_internal() -> Self {
        VisibilityConfig {
            include_internal: true,
            include_private: false,
        }
    }

    /// The full declared surface: public, internal, and private.
    pub fn full() -> Self {
        VisibilityConfig {
            include_internal: true,
            include_private: true,
        }
    }

    /// Parse a named visibility level: `"public"`, `"internal"`, or
    /// `"private"`. Each level includes the ones above it.
    pub fn from_level(level: &str) -> Result<Self, DiffError> {
        match level {
            "public" => Ok(VisibilityConfig::public_only()),
            "internal" => Ok(VisibilityConfig::with_internal()),
            "private" => Ok(VisibilityConfig::full()),
            other => Err(DiffError::invalid_config(format!(
                "unknown visibility level '{}' (expected public, internal, or private)",
                other
            ))),
        }
    }

    /// Validate the configuration before any snapshot work begins.
    ///
    /// The private surface subsumes the internal one; asking for private
    /// symbols while excluding internal ones would produce a surface no
    /// compiler accepts, so it is rejected as conflicting.
    pub fn validate(&self) -> Result<(), DiffError> {
        if self.include_private && !self.include_internal {
            return Err(DiffError::invalid_config(
                "include_private requires include_internal: the private surface subsumes the internal one",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_public_only() {
        let cfg = VisibilityConfig::default();
        assert!(!cfg.include_internal);
        assert!(!cfg.include_private);
    }

    #[test]
    fn from_level_parses_the_three_levels() {
        assert_eq!(
            VisibilityConfig::from_level("public").unwrap(),
            VisibilityConfig::public_only()
        );
        assert_eq!(
            VisibilityConfig::from_level("internal").unwrap(),
            VisibilityConfig::with_internal()
        );
        assert_eq!(
            VisibilityConfig::from_level("private").unwrap(),
            VisibilityConfig::full()
        );
    }

    #[test]
    fn from_level_rejects_unknown_level() {
        let err = VisibilityConfig::from_level("protected").unwrap_err();
        assert_eq!(err.error_code().code(), 2);
    }

    #[test]
    fn validate_rejects_private_without_internal() {
        let cfg = VisibilityConfig {
            include_internal: false,
            include_private: true,
        };
        assert!(cfg.validate().is_err());
        assert!(VisibilityConfig::full().validate().is_ok());
    }
}
