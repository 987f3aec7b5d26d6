use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in `thingful_things`. `content` is raw user input.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Thing {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub content: String,
    pub owner_user_id: i32,
    pub date_created: DateTime<Utc>,
}
