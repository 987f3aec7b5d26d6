// handlers/protected/things/thing_get.rs - GET /api/things/:thing_id handler

use axum::extract::{Path, State};

use crate::api::ThingView;
use crate::app::AppState;
use crate::handlers::utils::{fetch_thing_view, thing_or_404, UserCache};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/things/:thing_id - one thing with owner and rating statistics
///
/// 404 `Thing doesn't exist` for unknown or non-numeric ids.
pub async fn thing_get(
    State(state): State<AppState>,
    Path(thing_id): Path<String>,
) -> ApiResult<ThingView> {
    let store = state.store.as_ref();
    let thing = thing_or_404(store, &thing_id).await?;
    let view = fetch_thing_view(store, &mut UserCache::default(), &thing).await?;
    Ok(ApiResponse::success(view))
}
