use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::reviews::handlers;
use crate::features::reviews::services::ReviewService;

/// Review routes. Reading reviews is public; everything else requires the
/// Manager role.
pub fn routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/review/ideas", get(handlers::list_ideas_for_review))
        .route(
            "/api/review/ideas/status/{status}",
            get(handlers::list_ideas_by_status),
        )
        .route(
            "/api/review/ideas/{idea_id}",
            get(handlers::get_idea_for_review),
        )
        .route(
            "/api/review/ideas/{idea_id}/status",
            put(handlers::change_idea_status),
        )
        .route("/api/review/submit", post(handlers::submit_review))
        .route(
            "/api/review/idea/{idea_id}",
            get(handlers::list_reviews_for_idea),
        )
        .route(
            "/api/review/manager/my-reviews",
            get(handlers::list_my_reviews),
        )
        .route(
            "/api/review/{id}",
            get(handlers::get_review)
                .put(handlers::update_review)
                .delete(handlers::delete_review),
        )
        .with_state(service)
}
