use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in `thingful_reviews`. `text` is raw user input.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i32,
    pub text: String,
    pub rating: i32,
    pub thing_id: i32,
    pub user_id: i32,
    pub date_created: DateTime<Utc>,
}

/// Validated review fields awaiting insertion; the store assigns `id` and `date_created`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub text: String,
    pub rating: i32,
    pub thing_id: i32,
    pub user_id: i32,
}
