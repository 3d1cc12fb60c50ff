mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::feed::FeedConfig;

/// Shared state for the API: the store handle plus the immutable feed
/// channel configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub feed: Arc<FeedConfig>,
}

pub fn create_router(db: Database, feed: FeedConfig) -> Router {
    let state = AppState {
        db,
        feed: Arc::new(feed),
    };

    let api = Router::new()
        // Blogs
        .route("/blogs", get(handlers::list_blogs))
        .route("/blogs/{id}", get(handlers::get_blog))
        .route("/blogs/{id}/hit", put(handlers::hit_blog))
        // Remarks
        .route("/remarks", get(handlers::list_remarks))
        .route("/remarks", post(handlers::create_remark))
        .route("/remarks/{id}", delete(handlers::delete_remark))
        // Feed
        .route("/rss", get(handlers::get_feed))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
