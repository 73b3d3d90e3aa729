//! Error types for scval-core.
//!
//! Every fallible operation in the core returns [`ScvalResult`]. The variants
//! form a closed taxonomy: a conversion or decode either fully succeeds or
//! fails with exactly one of them. Nothing here is retryable.

use thiserror::Error;

/// Result alias used across the core.
pub type ScvalResult<T> = std::result::Result<T, ScvalError>;

/// The error taxonomy shared by the codec, the spec model and the converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScvalError {
    /// A binary buffer is truncated, carries an invalid tag, or has invalid padding.
    #[error("malformed wire data at offset {offset}: {context}")]
    MalformedWireData { offset: usize, context: String },

    /// A value's kind does not match the expected type node.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A numeric value does not fit the declared bit width or sign.
    #[error("value {value} is out of range for {width}-bit integer")]
    OutOfRange { width: u16, value: String },

    /// A required struct field or function parameter was not supplied.
    #[error("missing argument: {0}")]
    ArgumentMissing(String),

    /// A user-defined type or function name is not present in the contract spec.
    #[error("unknown spec entry: {0}")]
    UnknownEntry(String),

    /// An enum value or case name does not match any declared case.
    #[error("invalid value {value} for enum {name}")]
    InvalidEnumValue { name: String, value: String },

    /// A union case name does not match any declared case.
    #[error("invalid case {case} for union {name}")]
    InvalidUnionCase { name: String, case: String },

    /// Catch-all for shapes this core deliberately does not support.
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
}

impl ScvalError {
    pub fn malformed(offset: usize, context: impl Into<String>) -> Self {
        Self::MalformedWireData {
            offset,
            context: context.into(),
        }
    }

    pub fn type_mismatch(expected: impl ToString, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.into(),
        }
    }

    pub fn out_of_range(width: u16, value: impl ToString) -> Self {
        Self::OutOfRange {
            width,
            value: value.to_string(),
        }
    }

    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        Self::ConversionFailed(reason.into())
    }

    pub fn invalid_enum_value(name: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidEnumValue {
            name: name.into(),
            value: value.to_string(),
        }
    }

    pub fn invalid_union_case(name: impl Into<String>, case: impl Into<String>) -> Self {
        Self::InvalidUnionCase {
            name: name.into(),
            case: case.into(),
        }
    }

    /// Stable, machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedWireData { .. } => "malformed_wire_data",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::OutOfRange { .. } => "out_of_range",
            Self::ArgumentMissing(_) => "argument_missing",
            Self::UnknownEntry(_) => "unknown_entry",
            Self::InvalidEnumValue { .. } => "invalid_enum_value",
            Self::InvalidUnionCase { .. } => "invalid_union_case",
            Self::ConversionFailed(_) => "conversion_failed",
        }
    }
}
