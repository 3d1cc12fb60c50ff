use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::Error;
use crate::feed;
use crate::models::*;

use super::AppState;

// ============================================================
// Error Handling
// ============================================================

/// Render a classified error as a response.
///
/// Client-caused outcomes (validation, unknown ids, an empty catalogue)
/// keep their message; store and serialization failures are logged
/// server-side and sanitized so internals never leak to clients.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::EmptyFeed => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Error::Serialize(e) => {
                tracing::error!("Feed serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "code": status.as_u16(),
            "message": message,
        }));
        (status, body).into_response()
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Blogs
// ============================================================

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, Error> {
    state.db.get_all_blogs().map(Json)
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Blog>, Error> {
    state
        .db
        .get_blog(id)?
        .map(Json)
        .ok_or(Error::not_found("blog", id))
}

pub async fn hit_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Blog>, Error> {
    state
        .db
        .add_hit(id)?
        .map(Json)
        .ok_or(Error::not_found("blog", id))
}

// ============================================================
// Remarks
// ============================================================

pub async fn list_remarks(State(state): State<AppState>) -> Result<Json<Vec<Remark>>, Error> {
    state.db.get_remarks().map(Json)
}

pub async fn create_remark(
    State(state): State<AppState>,
    Json(input): Json<CreateRemarkInput>,
) -> Result<(StatusCode, Json<Remark>), Error> {
    state
        .db
        .create_remark(input)
        .map(|r| (StatusCode::CREATED, Json(r)))
}

pub async fn delete_remark(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Remark>, Error> {
    state
        .db
        .delete_remark(id)?
        .map(Json)
        .ok_or(Error::not_found("remark", id))
}

// ============================================================
// Feed
// ============================================================

pub async fn get_feed(State(state): State<AppState>) -> Result<Response, Error> {
    let blogs = state.db.get_all_blogs()?;
    let xml = feed::build_feed(&state.feed, &blogs)?;

    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        xml,
    )
        .into_response())
}
