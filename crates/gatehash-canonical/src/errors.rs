use thiserror::Error;

/// Reasons a receipt could not be turned into a [`StructuredValue`](crate::StructuredValue).
///
/// Every variant is terminal for the input that produced it: parsing the same
/// bytes again with the same limits yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input exceeds the configured size bound.
    #[error("input size {size} exceeds maximum {max} bytes")]
    TooLarge {
        /// Actual input size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },
    /// Input is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Syntax(String),
    /// Input nests arrays/objects deeper than allowed.
    #[error("nesting depth exceeds maximum {max}")]
    DepthExceeded {
        /// Maximum allowed depth.
        max: usize,
    },
    /// The same member name appears twice in one object.
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),
    /// A number that has no finite binary64 value.
    #[error("non-finite number")]
    NonFiniteNumber,
}

/// Validation errors for canonical primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
