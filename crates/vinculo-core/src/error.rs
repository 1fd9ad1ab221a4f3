//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// Lookups that find nothing are not errors: services return `Option`
/// or an empty `Vec` for those.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Content store error: {0}")]
    Store(#[from] RepoError),
}

impl DomainError {
    pub fn post_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "post",
            id: id.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A row points at something that does not exist (unknown category id).
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

/// Draft generation failures.
///
/// Every variant is reported to the admin as "could not generate content"
/// followed by the variant message; none of them is retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Text model credential is not configured")]
    MissingCredential,

    #[error("Text model request failed: {0}")]
    Upstream(String),

    #[error("Text model returned no candidates")]
    EmptyResponse,

    #[error("Malformed generation: {0}")]
    Malformed(String),
}
