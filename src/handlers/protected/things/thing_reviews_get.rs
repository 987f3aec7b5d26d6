// handlers/protected/things/thing_reviews_get.rs - GET /api/things/:thing_id/reviews handler

use axum::extract::{Path, State};

use crate::api::ReviewView;
use crate::app::AppState;
use crate::handlers::utils::{fetch_review_view, thing_or_404, UserCache};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/things/:thing_id/reviews - reviews of one thing, oldest first
///
/// Order follows review ids, i.e. insertion order. Reviews with an
/// out-of-range rating or a missing author are dropped and logged.
pub async fn thing_reviews_get(
    State(state): State<AppState>,
    Path(thing_id): Path<String>,
) -> ApiResult<Vec<ReviewView>> {
    let store = state.store.as_ref();
    let thing = thing_or_404(store, &thing_id).await?;
    let reviews = store.reviews_for_thing(thing.id).await?;

    let mut users = UserCache::default();
    let mut views = Vec::with_capacity(reviews.len());
    for review in &reviews {
        match fetch_review_view(store, &mut users, review).await {
            Ok(view) => views.push(view),
            Err(fault) if fault.skippable() => {
                tracing::warn!(
                    "Skipping review {} of thing {}: {}",
                    review.id,
                    thing.id,
                    fault.describe()
                );
            }
            Err(fault) => return Err(fault.into()),
        }
    }

    Ok(ApiResponse::success(views))
}
