//! Error types for the tablesort crate.

use thiserror::Error;

use crate::row::RowId;

/// Errors raised when a call into the engine breaks its contract.
///
/// All of these are reported before any row state is touched, so a failed
/// call leaves the table exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A descriptor names a column the table does not have.
    #[error("column {column} is out of range (table has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// An operation token is not one of `=`, `!=`, `<`, `>`, `<=`, `>=`, `~`, `~~`.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A row id does not belong to this table.
    #[error("unknown row {0}")]
    UnknownRow(RowId),

    /// Table configuration could not be parsed.
    #[error("invalid table configuration: {0}")]
    Config(String),
}

/// Result type for tablesort operations.
pub type Result<T> = std::result::Result<T, TableError>;
