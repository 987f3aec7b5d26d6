use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::models::{NewReview, Review, Thing, User};
use super::store::{DatabaseError, Store};
use crate::config::DatabaseConfig;

/// Postgres-backed store over the `thingful_users`, `thingful_things` and
/// `thingful_reviews` tables. Schema creation lives outside this crate.
///
/// Ids are `INTEGER` (`SERIAL`) and `rating` is `INTEGER`. Every
/// `date_created` column must be `TIMESTAMPTZ` with a `now()` default:
/// rows decode into `DateTime<Utc>`, which sqlx refuses to read from a
/// plain `TIMESTAMP`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a pool using the configured connection string and limits
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max_connections={})", config.max_connections);
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[async_trait]
impl Store for PgStore {
    async fn user_by_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, password, full_name, nickname, date_created
            FROM thingful_users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_by_id(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, password, full_name, nickname, date_created
            FROM thingful_users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn all_things(&self) -> Result<Vec<Thing>, DatabaseError> {
        let things = sqlx::query_as::<_, Thing>(
            r#"
            SELECT id, title, url, content, owner_user_id, date_created
            FROM thingful_things
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(things)
    }

    async fn thing_by_id(&self, id: i32) -> Result<Option<Thing>, DatabaseError> {
        let thing = sqlx::query_as::<_, Thing>(
            r#"
            SELECT id, title, url, content, owner_user_id, date_created
            FROM thingful_things
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(thing)
    }

    async fn reviews_for_thing(&self, thing_id: i32) -> Result<Vec<Review>, DatabaseError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, text, rating, thing_id, user_id, date_created
            FROM thingful_reviews
            WHERE thing_id = $1
            ORDER BY id
            "#,
        )
        .bind(thing_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn review_by_id(&self, id: i32) -> Result<Option<Review>, DatabaseError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, text, rating, thing_id, user_id, date_created
            FROM thingful_reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(review)
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, DatabaseError> {
        let result = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO thingful_reviews (text, rating, thing_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, rating, thing_id, user_id, date_created
            "#,
        )
        .bind(&review.text)
        .bind(review.rating)
        .bind(review.thing_id)
        .bind(review.user_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(DatabaseError::ForeignKey(db_err.message().to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
