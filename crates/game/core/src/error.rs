//! Common error infrastructure for maze-core.
//!
//! Domain-specific errors (`ConfigError`, `GenerationError`, `MoveRejection`)
//! live next to the code that produces them and implement [`GameError`] so
//! callers can classify them uniformly.
//!
//! Only structural failures are returned as `Err`. Gameplay-level invalid
//! actions (walking into a wall, breaking a wall without a token) degrade to
//! no-ops and are reported as values, never raised.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: destination blocked, maze decoration ran out of attempts
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: grid too small, level outside the configured range
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all maze-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
