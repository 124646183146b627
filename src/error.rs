//! Publishing error taxonomy.
//!
//! Four conditions cover every failure the core can surface:
//!
//! | Variant            | Meaning                                          |
//! |--------------------|--------------------------------------------------|
//! | `Validation`       | malformed input (missing/overlong field)         |
//! | `Conflict`         | slug collision in the target scope               |
//! | `NotFound`         | operation targets a non-existent id or slug      |
//! | `StoreUnavailable` | backing store unreachable                        |
//!
//! `Validation` and `Conflict` carry enough detail for the caller to
//! correct the input. `StoreUnavailable` is recovered locally only by the
//! sitemap/feed projectors; everywhere else it propagates.

use thiserror::Error;
use uuid::Uuid;

/// Result alias used across the publishing core.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Errors surfaced by the publishing core.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("invalid `{field}`: {reason}")]
    Validation {
        /// Field that failed validation.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    #[error("slug `{slug}` already exists in scope `{scope}`")]
    Conflict {
        /// The colliding slug.
        slug: String,
        /// Scope of the collision ("canonical" or a locale code).
        scope: String,
    },

    #[error("no record with id `{0}`")]
    NotFound(Uuid),

    #[error("no published entity with slug `{0}`")]
    SlugNotFound(String),

    #[error("content store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PublishError {
    /// Construct a `Validation` error for a field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Construct a `Conflict` error for a slug in a scope.
    pub fn conflict(slug: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::Conflict {
            slug: slug.into(),
            scope: scope.into(),
        }
    }
}
