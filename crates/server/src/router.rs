use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/post-types", get(handlers::list_post_types_handler))
        .route("/posts", get(handlers::list_posts_handler))
        .route("/posts/process", post(handlers::process_post_handler))
        .route("/posts/bulk", post(handlers::bulk_posts_handler))
        .route("/media", get(handlers::list_media_handler))
        .route("/media/process", post(handlers::process_media_handler))
        .route("/media/bulk", post(handlers::bulk_media_handler))
        .route(
            "/settings",
            get(handlers::get_settings_handler).put(handlers::put_settings_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
