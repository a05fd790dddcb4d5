//! Error types for bulk statement assembly and execution.

use std::ops::Range;

use thiserror::Error;

/// A row object that cannot be read as one record of distinct columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The value is not a record with named fields.
    #[error("value must be a record with named fields, found {found}")]
    NotARecord {
        /// Short description of what was supplied instead.
        found: String,
    },

    /// Two written fields map to the same column.
    #[error("column `{column}` is written by more than one field")]
    DuplicateColumn {
        /// The unquoted column name.
        column: String,
    },
}

impl ShapeError {
    /// Creates a shape error for the given kind of value.
    pub fn new(found: impl Into<String>) -> Self {
        Self::NotARecord {
            found: found.into(),
        }
    }

    /// Creates a shape error for a column written twice.
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            column: column.into(),
        }
    }
}

/// Errors raised while assembling or executing a bulk statement.
#[derive(Debug, Error)]
pub enum BulkError {
    /// A row is not a supported record value.
    #[error("row {row}: {source}")]
    Shape {
        /// Position of the row in the batch.
        row: usize,
        /// The underlying shape error.
        #[source]
        source: ShapeError,
    },

    /// A row's columns differ from the columns established by the first row.
    #[error(
        "row {row}: columns do not match the first row (missing: [{}], unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    ColumnMismatch {
        /// Position of the row in the batch.
        row: usize,
        /// Columns of the first row this row does not provide.
        missing: Vec<String>,
        /// Columns this row provides that the first row does not.
        unexpected: Vec<String>,
    },

    /// Neither the builder nor the first row names a table.
    #[error("no table name: set one with `into_table` or provide it from the row type")]
    MissingTable,

    /// Failure reported by the statement executor, passed through unchanged.
    #[error("execution error: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A failed chunk of a chunked bulk execution.
#[derive(Debug, Error)]
#[error("chunk {index} (rows {}..{}): {source}", .rows.start, .rows.end)]
pub struct ChunkError {
    /// Zero-based position of the chunk.
    pub index: usize,
    /// Rows of the input covered by the chunk.
    pub rows: Range<usize>,
    /// Why the chunk failed.
    #[source]
    pub source: BulkError,
}

/// Result type alias for bulk operations.
pub type Result<T> = std::result::Result<T, BulkError>;
