//! Common error infrastructure for overmap-core.
//!
//! Domain-specific errors (e.g., [`TemplateError`](crate::TemplateError),
//! [`LegendError`](crate::LegendError)) live next to the component that raises
//! them. This module provides the shared classification used to decide whether
//! an error aborts a call or is absorbed locally and logged.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each component has its own error type with specific variants
//! - **Severity Classification**: Recoverable errors are skipped and logged by the
//!   traversal and build loops, everything else is surfaced to the caller

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Expected at the edges of a render or build; the write is skipped
/// - **Validation**: Invalid input or configuration, rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The call cannot produce any result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the offending write is skipped.
    ///
    /// Examples: room placed outside the grid, connector without a neighbour
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: empty template, symbol bound twice in a legend
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - nothing can be returned to the caller.
    ///
    /// Examples: observer room missing from the world graph
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is absorbed locally.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all overmap-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait MapError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and for asserting on errors in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_is_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Fatal.is_recoverable());
    }

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
