use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_rating, user::UserSummary, ViewError};
use crate::database::{Review, User};
use crate::sanitize::sanitize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: i32,
    pub text: String,
    pub rating: i32,
    pub date_created: DateTime<Utc>,
    pub thing_id: i32,
    pub user: UserSummary,
}

/// Shape a review row with its author. A rating outside 1..=5 is reported
/// as [`ViewError::InvalidRating`]; the caller decides whether to drop the row.
pub fn build_review_view(review: &Review, author: &User) -> Result<ReviewView, ViewError> {
    if author.id != review.user_id {
        return Err(ViewError::UserMismatch {
            entity: "review",
            id: review.id,
            expected: review.user_id,
            actual: author.id,
        });
    }

    Ok(ReviewView {
        id: review.id,
        text: sanitize(&review.text),
        rating: check_rating(review.id, review.rating)?,
        date_created: review.date_created,
        thing_id: review.thing_id,
        user: UserSummary::from(author),
    })
}
