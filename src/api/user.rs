use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::User;

/// User fields safe to embed in responses; the password hash has no slot here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub user_name: String,
    pub full_name: String,
    pub nickname: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            full_name: user.full_name.clone(),
            nickname: user.nickname.clone(),
            date_created: user.date_created,
        }
    }
}
