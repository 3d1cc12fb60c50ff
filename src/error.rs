//! Error types for the content and feed service.

use thiserror::Error;

/// Classified failure outcomes for every public operation.
///
/// Each variant maps to exactly one response class at the API boundary:
/// `Validation` is a client error, `NotFound` and `EmptyFeed` are
/// not-found outcomes, `Store` and `Serialize` are internal errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: id={id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Feed has no posts to publish")]
    EmptyFeed,

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Feed serialization error: {0}")]
    Serialize(#[from] quick_xml::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type using the service [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
