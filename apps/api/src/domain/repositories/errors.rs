use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::search::Field;

/// Errors surfaced by repository implementations
///
/// Datastore failures are carried unchanged so callers can decide how to
/// react; nothing here is retried.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Team not found: {0}")]
    TeamNotFound(i64),

    #[error("Bulk statements only accept member columns, got {0}")]
    UnsupportedCondition(Field),

    #[error("Value out of range for the datastore: {0}")]
    OutOfRange(u64),

    #[error("Datastore returned a negative count: {0}")]
    NegativeCount(i64),

    #[error("Age overflow for member {0}")]
    AgeOverflow(i64),
}
