//! Public response shapes assembled from persisted rows.
//!
//! Aggregators are pure: they take rows that were already fetched, embed the
//! owning user's summary and run free text through [`crate::sanitize`].

pub mod review;
pub mod thing;
pub mod user;

pub use review::{build_review_view, ReviewView};
pub use thing::{build_thing_view, ThingView};
pub use user::UserSummary;

use thiserror::Error;

/// Upstream data-integrity faults detected while shaping a view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("review {review_id} has rating {rating}, expected 1..=5")]
    InvalidRating { review_id: i32, rating: i32 },

    #[error("{entity} {id} references user {expected}, got user {actual}")]
    UserMismatch {
        entity: &'static str,
        id: i32,
        expected: i32,
        actual: i32,
    },

    #[error("review {review_id} belongs to thing {actual}, not thing {expected}")]
    ThingMismatch {
        review_id: i32,
        expected: i32,
        actual: i32,
    },
}

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub(crate) fn check_rating(review_id: i32, rating: i32) -> Result<i32, ViewError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ViewError::InvalidRating { review_id, rating })
    }
}
