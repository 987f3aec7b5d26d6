use async_trait::async_trait;
use thiserror::Error;

use super::models::{NewReview, Review, Thing, User};

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Query interface over persisted users, things and reviews.
///
/// Handlers receive the store through `AppState`; nothing reads a
/// process-wide handle. Listings come back in ascending `id` order, which
/// is insertion order for server-assigned ids.
#[async_trait]
pub trait Store: Send + Sync {
    /// Exact, case-sensitive match on `user_name`.
    async fn user_by_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError>;

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, DatabaseError>;

    async fn all_things(&self) -> Result<Vec<Thing>, DatabaseError>;

    async fn thing_by_id(&self, id: i32) -> Result<Option<Thing>, DatabaseError>;

    async fn reviews_for_thing(&self, thing_id: i32) -> Result<Vec<Review>, DatabaseError>;

    async fn review_by_id(&self, id: i32) -> Result<Option<Review>, DatabaseError>;

    /// Insert a review, assigning `id` and `date_created`.
    async fn insert_review(&self, review: NewReview) -> Result<Review, DatabaseError>;

    /// Connectivity check for `/health`
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
