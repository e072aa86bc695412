//! Snapshot error types.

use splitbill_shared::AppError;
use thiserror::Error;

use crate::bill::BillError;

/// Errors raised while importing or exporting a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid snapshot JSON.
    #[error("Invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two groups share a name.
    #[error("Group with name \"{0}\" already exists")]
    DuplicateGroupName(String),

    /// Two circles in the same group share a name.
    #[error("Circle with name \"{name}\" already exists in group \"{group}\"")]
    DuplicateCircleName {
        /// Group name.
        group: String,
        /// Duplicated circle name.
        name: String,
    },

    /// Two people in the same group share a name.
    #[error("Person with name \"{name}\" already exists in group \"{group}\"")]
    DuplicatePersonName {
        /// Group name.
        group: String,
        /// Duplicated person name.
        name: String,
    },

    /// A bill failed validation.
    #[error("Invalid bill in group \"{group}\": {source}")]
    Bill {
        /// Group name.
        group: String,
        /// Underlying bill error.
        #[source]
        source: BillError,
    },

    /// The bills of a group add up to more than a decimal can hold.
    #[error("Bills of group \"{0}\" are too large to add up")]
    GroupTotalOverflow(String),
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Parse(_)
            | SnapshotError::Bill { .. }
            | SnapshotError::GroupTotalOverflow(_) => Self::Validation(err.to_string()),
            SnapshotError::DuplicateGroupName(_)
            | SnapshotError::DuplicateCircleName { .. }
            | SnapshotError::DuplicatePersonName { .. } => Self::Conflict(err.to_string()),
        }
    }
}
