use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::models::{NewReview, Review, Thing, User};
use super::store::{DatabaseError, Store};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    things: Vec<Thing>,
    reviews: Vec<Review>,
}

/// In-process store with the same contract as `PgStore`.
///
/// Rows are kept sorted by id so listings follow insertion order, and
/// `insert_review` enforces the `thing_id`/`user_id` foreign keys.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with fixture rows
    pub fn seeded(users: Vec<User>, things: Vec<Thing>, reviews: Vec<Review>) -> Self {
        let mut tables = Tables { users, things, reviews };
        tables.users.sort_by_key(|u| u.id);
        tables.things.sort_by_key(|t| t.id);
        tables.reviews.sort_by_key(|r| r.id);
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn user_by_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn all_things(&self) -> Result<Vec<Thing>, DatabaseError> {
        Ok(self.tables.read().await.things.clone())
    }

    async fn thing_by_id(&self, id: i32) -> Result<Option<Thing>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.things.iter().find(|t| t.id == id).cloned())
    }

    async fn reviews_for_thing(&self, thing_id: i32) -> Result<Vec<Review>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.thing_id == thing_id)
            .cloned()
            .collect())
    }

    async fn review_by_id(&self, id: i32) -> Result<Option<Review>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, DatabaseError> {
        let mut tables = self.tables.write().await;

        if !tables.things.iter().any(|t| t.id == review.thing_id) {
            return Err(DatabaseError::ForeignKey(format!(
                "thing {} does not exist",
                review.thing_id
            )));
        }
        if !tables.users.iter().any(|u| u.id == review.user_id) {
            return Err(DatabaseError::ForeignKey(format!(
                "user {} does not exist",
                review.user_id
            )));
        }

        let id = tables.reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let row = Review {
            id,
            text: review.text,
            rating: review.rating,
            thing_id: review.thing_id,
            user_id: review.user_id,
            date_created: Utc::now(),
        };
        tables.reviews.push(row.clone());
        Ok(row)
    }
}
