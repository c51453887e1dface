//! Error types for structsql

use crate::record::Kind;
use thiserror::Error;

/// Result type alias for statement building.
pub type BuildResult<T> = Result<T, BuildError>;

/// Reasons a record could not be turned into a statement.
///
/// Every variant is a deterministic function of the record's shape; retrying
/// with the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No record was supplied (`None`, `Value::Null`, or an empty batch).
    #[error("Invalid input: no record provided")]
    InvalidInput,

    /// The value is a scalar or collection, not a record.
    #[error("Input is not a record (got {kind:?})")]
    NotARecordShape { kind: Kind },

    /// The record's type has no name to derive a table from.
    #[error("Record type has no name to derive a table from")]
    UnnamedType,

    /// The record type declares no fields.
    #[error("Record for table '{table}' has no fields")]
    NoFields { table: String },

    /// No field satisfies the primary-key rule.
    #[error("Record for table '{table}' has no primary key field")]
    MissingPrimaryKey { table: String },

    /// Every non-key field is zero-valued.
    #[error("No fields to update for table '{table}'")]
    NoFieldsToUpdate { table: String },

    /// A batch mixed records of different types.
    #[error("Mixed record types in batch: expected '{expected}', found '{found}'")]
    MixedRecordTypes { expected: String, found: String },
}

impl BuildError {
    pub(crate) fn no_fields(table: impl Into<String>) -> Self {
        Self::NoFields {
            table: table.into(),
        }
    }

    pub(crate) fn missing_primary_key(table: impl Into<String>) -> Self {
        Self::MissingPrimaryKey {
            table: table.into(),
        }
    }

    pub(crate) fn no_fields_to_update(table: impl Into<String>) -> Self {
        Self::NoFieldsToUpdate {
            table: table.into(),
        }
    }

    /// Check if the input was absent.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput)
    }

    /// Check if the input was not record-shaped.
    pub fn is_not_a_record(&self) -> bool {
        matches!(self, Self::NotARecordShape { .. })
    }

    /// Check if the record type was unnamed.
    pub fn is_unnamed_type(&self) -> bool {
        matches!(self, Self::UnnamedType)
    }

    /// Check if this is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self, Self::MissingPrimaryKey { .. })
    }

    /// Check if an update had nothing to SET.
    pub fn is_no_fields_to_update(&self) -> bool {
        matches!(self, Self::NoFieldsToUpdate { .. })
    }
}
