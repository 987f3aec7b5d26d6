// handlers/public/things.rs - GET /api/things handler

use axum::extract::State;

use crate::api::ThingView;
use crate::app::AppState;
use crate::handlers::utils::{fetch_thing_view, UserCache};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/things - every thing with its owner and rating statistics
///
/// Returns an empty array when no things exist. A thing whose rows fail an
/// integrity check is left out of the listing and logged.
pub async fn things_get(State(state): State<AppState>) -> ApiResult<Vec<ThingView>> {
    let store = state.store.as_ref();
    let things = store.all_things().await?;

    let mut users = UserCache::default();
    let mut views = Vec::with_capacity(things.len());
    for thing in &things {
        match fetch_thing_view(store, &mut users, thing).await {
            Ok(view) => views.push(view),
            Err(fault) if fault.skippable() => {
                tracing::warn!("Skipping thing {} in listing: {}", thing.id, fault.describe());
            }
            Err(fault) => return Err(fault.into()),
        }
    }

    Ok(ApiResponse::success(views))
}
