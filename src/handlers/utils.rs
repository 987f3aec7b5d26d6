// handlers/utils.rs - Shared lookups for resource handlers
//
// Handlers fetch rows through the injected store and hand them to the pure
// aggregators in `crate::api`. Lookups of the owning user go through a small
// per-request cache so listings don't refetch the same author.

use std::collections::HashMap;

use crate::api::{build_review_view, build_thing_view, ReviewView, ThingView, ViewError};
use crate::database::{DatabaseError, Review, Store, Thing, User};
use crate::error::ApiError;

/// Parse a numeric path segment; anything else cannot name a row
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// Look up a thing by its raw path segment, or 404 `Thing doesn't exist`
pub async fn thing_or_404(store: &dyn Store, raw_id: &str) -> Result<Thing, ApiError> {
    let Some(id) = parse_id(raw_id) else {
        return Err(ApiError::thing_not_found());
    };
    store
        .thing_by_id(id)
        .await?
        .ok_or_else(ApiError::thing_not_found)
}

/// Per-request user cache keyed by id
#[derive(Default)]
pub struct UserCache {
    users: HashMap<i32, Option<User>>,
}

impl UserCache {
    pub async fn get(&mut self, store: &dyn Store, id: i32) -> Result<Option<User>, DatabaseError> {
        if let Some(cached) = self.users.get(&id) {
            return Ok(cached.clone());
        }
        let user = store.user_by_id(id).await?;
        self.users.insert(id, user.clone());
        Ok(user)
    }
}

/// Outcome of shaping one row that a listing may skip
pub enum RowFault {
    Database(DatabaseError),
    MissingUser(i32),
    View(ViewError),
}

impl From<DatabaseError> for RowFault {
    fn from(err: DatabaseError) -> Self {
        RowFault::Database(err)
    }
}

impl From<ViewError> for RowFault {
    fn from(err: ViewError) -> Self {
        RowFault::View(err)
    }
}

impl From<RowFault> for ApiError {
    fn from(fault: RowFault) -> Self {
        match fault {
            RowFault::Database(e) => e.into(),
            RowFault::View(e) => e.into(),
            RowFault::MissingUser(id) => {
                tracing::error!("Data integrity fault: user {} referenced but missing", id);
                ApiError::internal_server_error("Internal server error")
            }
        }
    }
}

impl RowFault {
    /// Listings drop rows with integrity faults but still fail on database errors
    pub fn skippable(&self) -> bool {
        !matches!(self, RowFault::Database(_))
    }

    pub fn describe(&self) -> String {
        match self {
            RowFault::Database(e) => e.to_string(),
            RowFault::MissingUser(id) => format!("user {} referenced but missing", id),
            RowFault::View(e) => e.to_string(),
        }
    }
}

/// Fetch owner and reviews for `thing` and aggregate them
pub async fn fetch_thing_view(
    store: &dyn Store,
    users: &mut UserCache,
    thing: &Thing,
) -> Result<ThingView, RowFault> {
    let owner = users
        .get(store, thing.owner_user_id)
        .await?
        .ok_or(RowFault::MissingUser(thing.owner_user_id))?;
    let reviews = store.reviews_for_thing(thing.id).await?;
    Ok(build_thing_view(thing, &owner, &reviews)?)
}

/// Fetch the author of `review` and aggregate them
pub async fn fetch_review_view(
    store: &dyn Store,
    users: &mut UserCache,
    review: &Review,
) -> Result<ReviewView, RowFault> {
    let author = users
        .get(store, review.user_id)
        .await?
        .ok_or(RowFault::MissingUser(review.user_id))?;
    Ok(build_review_view(review, &author)?)
}
