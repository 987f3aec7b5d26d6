// handlers/protected/reviews/review_get.rs - GET /api/reviews/:review_id handler

use axum::extract::{Path, State};

use crate::api::ReviewView;
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::utils::{fetch_review_view, parse_id, UserCache};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/reviews/:review_id - the resource named by `POST /api/reviews`' Location
pub async fn review_get(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> ApiResult<ReviewView> {
    let store = state.store.as_ref();
    let not_found = || ApiError::not_found("Review doesn't exist");

    let id = parse_id(&review_id).ok_or_else(not_found)?;
    let review = store.review_by_id(id).await?.ok_or_else(not_found)?;
    let view = fetch_review_view(store, &mut UserCache::default(), &review).await?;
    Ok(ApiResponse::success(view))
}
