use axum::{
    http::{header, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::comments as comment_handlers;
use crate::store::CommentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: CommentStore,
}

pub fn create_router(store: CommentStore) -> Router {
    let state = AppState { store };

    // Routes are registered flat because axum does not match the
    // prefix-plus-slash form of a nested router, and the aggregate
    // listing must answer on both /api/comments and /api/comments/.
    let comment_routes = Router::new()
        .route("/api/comments", get(comment_handlers::list_all_comments))
        .route("/api/comments/", get(comment_handlers::list_all_comments))
        .route(
            "/api/comments/:product_id",
            get(comment_handlers::list_product_comments),
        )
        .route(
            "/api/comments/:product_id",
            post(comment_handlers::create_comment),
        )
        .route(
            "/api/comments/:product_id/:comment_id",
            put(comment_handlers::update_comment),
        )
        .route(
            "/api/comments/:product_id/:comment_id",
            delete(comment_handlers::delete_comment),
        );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health_check))
        .merge(comment_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
