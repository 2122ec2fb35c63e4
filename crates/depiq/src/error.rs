//! Error types for depiq
//!
//! ## Error classification
//!
//! `Error` variants fall into three categories:
//!
//! **Construction errors** — raised while composing a dataset and latched on
//! it ([`IncompatibleDialects`](Error::IncompatibleDialects),
//! [`EmptyIdentifier`](Error::EmptyIdentifier), [`Validation`](Error::Validation)).
//!
//! **Rendering errors** — dialect grammar violations produced during
//! `to_sql()`: [`ReturningNotSupported`](Error::ReturningNotSupported),
//! [`ClauseNotSupported`](Error::ClauseNotSupported),
//! [`MultipleUpdateTablesNotSupported`](Error::MultipleUpdateTablesNotSupported),
//! [`WindowFunctionNotSupported`](Error::WindowFunctionNotSupported),
//! [`UpsertWhereNotSupported`](Error::UpsertWhereNotSupported),
//! [`BitwiseOpNotSupported`](Error::BitwiseOpNotSupported),
//! [`BooleanDataTypeNotSupported`](Error::BooleanDataTypeNotSupported),
//! [`Encode`](Error::Encode).
//!
//! **Execution / scanning errors** — surfaced by the adapter:
//! [`QueryFactoryNotFound`](Error::QueryFactoryNotFound),
//! [`UnmappedColumn`](Error::UnmappedColumn), [`Driver`](Error::Driver),
//! [`Canceled`](Error::Canceled).
//!
//! Every message carries the `depiq:` prefix (`depiq_encode_error:` for
//! value-encoding failures). Errors are cheap to clone so a dataset can latch
//! its first error and hand copies to every later `to_sql()` call.

use thiserror::Error;

/// Result type alias for depiq operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for query building, rendering, and execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A scan or exec was attempted on a dataset with no bound database.
    #[error("depiq: a query factory was not found for the dataset")]
    QueryFactoryNotFound,

    /// An identifier with no schema, table, or column was rendered, or the
    /// column rename function produced an empty name.
    #[error("depiq: an empty identifier was encountered, please specify a \"schema\", \"table\" or \"column\"")]
    EmptyIdentifier,

    /// A sub-query with a non-default dialect was composed into a dataset
    /// with a different non-default dialect.
    #[error("depiq: incompatible dialects [expected={expected} got={got}]")]
    IncompatibleDialects { expected: String, got: String },

    /// `RETURNING` used against a dialect without support for it.
    #[error("depiq: dialect does not support RETURNING clause [dialect={0}]")]
    ReturningNotSupported(String),

    /// `ORDER BY` or `LIMIT` used on a DELETE/UPDATE the dialect cannot express.
    #[error("depiq: dialect does not support {clause} on {statement} statements [dialect={dialect}]")]
    ClauseNotSupported {
        clause: &'static str,
        statement: &'static str,
        dialect: String,
    },

    /// Multi-table UPDATE against a dialect without support for it.
    #[error("depiq: {0} dialect does not support multiple tables in UPDATE")]
    MultipleUpdateTablesNotSupported(String),

    /// `WINDOW` clause against a dialect without window function support.
    #[error("depiq: adapter does not support window function clause")]
    WindowFunctionNotSupported,

    /// `ON CONFLICT ... DO UPDATE ... WHERE` against a dialect without support.
    #[error("depiq: dialect does not support upsert with where clause [dialect={0}]")]
    UpsertWhereNotSupported(String),

    /// A bitwise operator the dialect cannot express.
    #[error("depiq: bitwise operator '{0}' not supported")]
    BitwiseOpNotSupported(&'static str),

    /// A boolean comparison against a dialect with no boolean data type.
    #[error("depiq: boolean data type is not supported by dialect \"{0}\"")]
    BooleanDataTypeNotSupported(String),

    /// A value that cannot be rendered as a SQL literal.
    #[error("depiq_encode_error: Unable to encode value {0}")]
    Encode(String),

    /// A returned column with no corresponding field on the scan target.
    #[error("depiq: unable to find corresponding field to column \"{0}\" returned by query")]
    UnmappedColumn(String),

    /// A row value that does not convert to the scan target type.
    #[error("depiq: unable to convert value of column \"{column}\": {message}")]
    Decode { column: String, message: String },

    /// Input validation error from a builder.
    #[error("depiq: {0}")]
    Validation(String),

    /// An error reported by the underlying driver handle.
    #[error("depiq: driver error: {0}")]
    Driver(String),

    /// The driver call was canceled before completion.
    #[error("depiq: operation was canceled")]
    Canceled,
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a driver error
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error was produced while rendering SQL,
    /// as opposed to building or executing it.
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::ReturningNotSupported(_)
                | Self::ClauseNotSupported { .. }
                | Self::MultipleUpdateTablesNotSupported(_)
                | Self::WindowFunctionNotSupported
                | Self::UpsertWhereNotSupported(_)
                | Self::BitwiseOpNotSupported(_)
                | Self::BooleanDataTypeNotSupported(_)
                | Self::Encode(_)
                | Self::EmptyIdentifier
        )
    }

    /// Returns `true` if the underlying driver call was canceled.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefixes() {
        assert_eq!(
            Error::QueryFactoryNotFound.to_string(),
            "depiq: a query factory was not found for the dataset"
        );
        assert_eq!(
            Error::ReturningNotSupported("mysql".into()).to_string(),
            "depiq: dialect does not support RETURNING clause [dialect=mysql]"
        );
        assert_eq!(
            Error::UpsertWhereNotSupported("mysql".into()).to_string(),
            "depiq: dialect does not support upsert with where clause [dialect=mysql]"
        );
        assert_eq!(
            Error::MultipleUpdateTablesNotSupported("sqlite3".into()).to_string(),
            "depiq: sqlite3 dialect does not support multiple tables in UPDATE"
        );
        assert_eq!(
            Error::BitwiseOpNotSupported("XOR").to_string(),
            "depiq: bitwise operator 'XOR' not supported"
        );
        assert_eq!(
            Error::BooleanDataTypeNotSupported("sqlserver".into()).to_string(),
            "depiq: boolean data type is not supported by dialect \"sqlserver\""
        );
        assert_eq!(
            Error::Encode("SomeOpaqueType".into()).to_string(),
            "depiq_encode_error: Unable to encode value SomeOpaqueType"
        );
    }

    #[test]
    fn unmapped_column_message() {
        assert_eq!(
            Error::UnmappedColumn("test".into()).to_string(),
            "depiq: unable to find corresponding field to column \"test\" returned by query"
        );
    }
}
