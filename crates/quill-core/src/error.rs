//! Domain-level error types.

use thiserror::Error;

/// Business-rule violations raised by the domain entities themselves.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Repository-level errors. Persistence failures propagate unchanged
/// through the ranking components; the rankers define no retry policy.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
