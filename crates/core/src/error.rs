//! Error types for staystat.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for staystat operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for table construction and aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A column holds a value of the wrong type, or a non-numeric column was
    /// used where a measure is required.
    TypeMismatch {
        column: String,
        expected: &'static str,
        got: DataType,
    },
    /// Null value in a non-nullable column.
    NullConstraint {
        column: String,
    },
    /// Invalid schema definition.
    InvalidSchema {
        message: String,
    },
    /// Column not found.
    ColumnNotFound {
        column: String,
    },
    /// Statistic name outside the supported set.
    UnsupportedStatistic {
        name: String,
    },
    /// Malformed call arguments.
    InvalidArgument {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch {
                column,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Type mismatch on column {}: expected {}, got {}",
                    column,
                    expected,
                    got.name()
                )
            }
            Error::NullConstraint { column } => {
                write!(f, "Null constraint violation on column: {}", column)
            }
            Error::InvalidSchema { message } => {
                write!(f, "Invalid schema: {}", message)
            }
            Error::ColumnNotFound { column } => {
                write!(f, "Column not found: {}", column)
            }
            Error::UnsupportedStatistic { name } => {
                write!(f, "Unsupported statistic: {} (expected mean, min or max)", name)
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a type mismatch error.
    pub fn type_mismatch(column: impl Into<String>, expected: &'static str, got: DataType) -> Self {
        Error::TypeMismatch {
            column: column.into(),
            expected,
            got,
        }
    }

    /// Creates a null constraint error.
    pub fn null_constraint(column: impl Into<String>) -> Self {
        Error::NullConstraint {
            column: column.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates a column not found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates an unsupported statistic error.
    pub fn unsupported_statistic(name: impl Into<String>) -> Self {
        Error::UnsupportedStatistic { name: name.into() }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the caller's arguments rather than
    /// by malformed table data.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::ColumnNotFound { .. }
                | Error::UnsupportedStatistic { .. }
                | Error::InvalidArgument { .. }
                | Error::TypeMismatch { .. }
        )
    }
}
