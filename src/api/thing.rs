use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_rating, user::UserSummary, ViewError};
use crate::database::{Review, Thing, User};
use crate::sanitize::sanitize;

/// Thing with its owner and rating statistics, as returned by `/api/things`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThingView {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub content: String,
    /// Mean review rating rounded half-up; 0 when the thing has no reviews
    pub rating: i32,
    pub number_of_reviews: usize,
    pub date_created: DateTime<Utc>,
    pub owner: UserSummary,
}

/// Shape a thing row together with its owner and every review of it.
pub fn build_thing_view(
    thing: &Thing,
    owner: &User,
    reviews: &[Review],
) -> Result<ThingView, ViewError> {
    if owner.id != thing.owner_user_id {
        return Err(ViewError::UserMismatch {
            entity: "thing",
            id: thing.id,
            expected: thing.owner_user_id,
            actual: owner.id,
        });
    }

    let mut ratings = Vec::with_capacity(reviews.len());
    for review in reviews {
        if review.thing_id != thing.id {
            return Err(ViewError::ThingMismatch {
                review_id: review.id,
                expected: thing.id,
                actual: review.thing_id,
            });
        }
        ratings.push(check_rating(review.id, review.rating)?);
    }

    Ok(ThingView {
        id: thing.id,
        title: thing.title.clone(),
        url: thing.url.clone(),
        content: sanitize(&thing.content),
        rating: average_rating(&ratings),
        number_of_reviews: ratings.len(),
        date_created: thing.date_created,
        owner: UserSummary::from(owner),
    })
}

/// Arithmetic mean rounded half-up, 0 for an empty slice.
/// Callers pass ratings already checked to lie in 1..=5.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    let count = ratings.len() as i64;
    // floor((sum / count) + 1/2) without floating point
    ((2 * sum + count) / (2 * count)) as i32
}
