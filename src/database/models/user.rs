use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in `thingful_users`. The hash is never serialized; public output goes
/// through `api::UserSummary`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub user_name: String,
    #[sqlx(rename = "password")]
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub nickname: Option<String>,
    pub date_created: DateTime<Utc>,
}
