// handlers/protected/reviews/review_post.rs - POST /api/reviews handler

use axum::{
    body::Bytes,
    extract::{Extension, State},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::{Map, Value};

use crate::api::{ReviewView, MAX_RATING, MIN_RATING};
use crate::app::AppState;
use crate::database::NewReview;
use crate::error::ApiError;
use crate::handlers::utils::{fetch_review_view, UserCache};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Checked in this order; the first missing one is reported
const REQUIRED_FIELDS: [&str; 4] = ["text", "rating", "user_id", "thing_id"];

/**
 * POST /api/reviews - create a review of a thing
 *
 * Expected Input:
 * ```json
 * { "text": "string", "rating": 1-5, "thing_id": 1, "user_id": 1 }
 * ```
 *
 * Success: 201 with the review view and `Location: /api/reviews/{id}`.
 * A field that is absent, null or an empty string fails with
 * 400 `Missing '<field>' in request body`. An empty body, or one sent
 * without a JSON content type, has every field missing.
 */
pub async fn review_post(
    State(state): State<AppState>,
    Extension(AuthUser(auth_user)): Extension<AuthUser>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ReviewView> {
    let body = read_json_body(&headers, &body)?;
    let new_review = parse_new_review(&body)?;

    let store = state.store.as_ref();
    if store.thing_by_id(new_review.thing_id).await?.is_none() {
        return Err(ApiError::thing_not_found());
    }
    if store.user_by_id(new_review.user_id).await?.is_none() {
        return Err(ApiError::validation_error("Invalid 'user_id' in request body"));
    }

    let review = store.insert_review(new_review).await?;
    tracing::info!(
        "User '{}' created review {} on thing {}",
        auth_user.user_name,
        review.id,
        review.thing_id
    );

    let view = fetch_review_view(store, &mut UserCache::default(), &review).await?;
    Ok(ApiResponse::created(view, format!("/api/reviews/{}", review.id)))
}

/// Decode the request body, treating an absent payload as `null`.
///
/// Only a JSON content type with non-blank bytes is parsed; malformed JSON
/// is a 400 carrying the parser's message.
pub fn read_json_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, ApiError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false);

    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON in request body: {}", e)))
}

/// Validate a request body into insertable review fields
pub fn parse_new_review(body: &Value) -> Result<NewReview, ApiError> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    for field in REQUIRED_FIELDS {
        if is_missing(fields.get(field)) {
            return Err(ApiError::missing_field(field));
        }
    }

    let text = fields["text"]
        .as_str()
        .ok_or_else(|| invalid_field("text"))?
        .to_string();

    let rating = as_integer(&fields["rating"])
        .filter(|r| (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(r))
        .ok_or_else(|| {
            ApiError::validation_error(format!(
                "Rating must be an integer between {} and {}",
                MIN_RATING, MAX_RATING
            ))
        })? as i32;

    let user_id = as_id(&fields["user_id"]).ok_or_else(|| invalid_field("user_id"))?;
    let thing_id = as_id(&fields["thing_id"]).ok_or_else(|| invalid_field("thing_id"))?;

    Ok(NewReview {
        text,
        rating,
        thing_id,
        user_id,
    })
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn invalid_field(field: &str) -> ApiError {
    ApiError::validation_error(format!("Invalid '{}' in request body", field))
}

/// Integers arrive as JSON numbers or numeric strings
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_id(value: &Value) -> Option<i32> {
    as_integer(value).and_then(|n| i32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn valid_body() -> Value {
        json!({ "text": "Test new review", "rating": 3, "thing_id": 1, "user_id": 1 })
    }

    fn message(result: Result<NewReview, ApiError>) -> String {
        result.unwrap_err().message().to_string()
    }

    #[test]
    fn accepts_complete_body() {
        let review = parse_new_review(&valid_body()).unwrap();
        assert_eq!(
            review,
            NewReview {
                text: "Test new review".to_string(),
                rating: 3,
                thing_id: 1,
                user_id: 1,
            }
        );
    }

    #[test]
    fn reports_each_missing_field() {
        for field in REQUIRED_FIELDS {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(
                message(parse_new_review(&body)),
                format!("Missing '{}' in request body", field)
            );
        }
    }

    #[test]
    fn null_and_empty_count_as_missing() {
        let mut body = valid_body();
        body["text"] = Value::Null;
        assert_eq!(message(parse_new_review(&body)), "Missing 'text' in request body");

        let mut body = valid_body();
        body["text"] = json!("");
        assert_eq!(message(parse_new_review(&body)), "Missing 'text' in request body");
    }

    #[test]
    fn first_missing_field_wins() {
        assert_eq!(
            message(parse_new_review(&json!({ "thing_id": 1 }))),
            "Missing 'text' in request body"
        );
        assert_eq!(
            message(parse_new_review(&json!({ "text": "hi", "thing_id": 1 }))),
            "Missing 'rating' in request body"
        );
        assert_eq!(
            message(parse_new_review(&json!([]))),
            "Missing 'text' in request body"
        );
    }

    #[test]
    fn rating_must_be_in_range() {
        for bad in [json!(0), json!(6), json!(2.5), json!("five"), json!(true)] {
            let mut body = valid_body();
            body["rating"] = bad;
            assert_eq!(
                message(parse_new_review(&body)),
                "Rating must be an integer between 1 and 5"
            );
        }

        let mut body = valid_body();
        body["rating"] = json!("4");
        assert_eq!(parse_new_review(&body).unwrap().rating, 4);
    }

    #[test]
    fn ids_must_be_integers() {
        let mut body = valid_body();
        body["thing_id"] = json!("first");
        assert_eq!(message(parse_new_review(&body)), "Invalid 'thing_id' in request body");

        let mut body = valid_body();
        body["user_id"] = json!({ "id": 1 });
        assert_eq!(message(parse_new_review(&body)), "Invalid 'user_id' in request body");
    }

    #[test]
    fn text_must_be_a_string() {
        let mut body = valid_body();
        body["text"] = json!(42);
        assert_eq!(message(parse_new_review(&body)), "Invalid 'text' in request body");
    }

    #[test]
    fn empty_or_untyped_body_reads_as_null() {
        assert_eq!(read_json_body(&json_headers(), b"").unwrap(), Value::Null);
        assert_eq!(read_json_body(&json_headers(), b"  \n").unwrap(), Value::Null);
        assert_eq!(read_json_body(&HeaderMap::new(), br#"{"text":"hi"}"#).unwrap(), Value::Null);

        let body = read_json_body(&HeaderMap::new(), b"").unwrap();
        assert_eq!(message(parse_new_review(&body)), "Missing 'text' in request body");
    }

    #[test]
    fn json_content_type_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("Application/JSON; charset=utf-8"));
        assert_eq!(
            read_json_body(&headers, br#"{"rating":3}"#).unwrap(),
            json!({ "rating": 3 })
        );
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let err = read_json_body(&json_headers(), b"{not json").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().starts_with("Invalid JSON in request body"));
    }
}
