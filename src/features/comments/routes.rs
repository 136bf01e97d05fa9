use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::comments::handlers;
use crate::features::comments::services::CommentService;

/// Comment routes. Reads are public, writes need a signed-in author.
pub fn routes(service: Arc<CommentService>) -> Router {
    Router::new()
        .route(
            "/api/comment/{id}",
            get(handlers::list_comments)
                .post(handlers::add_comment)
                .put(handlers::update_comment)
                .delete(handlers::delete_comment),
        )
        .route("/api/comment/comment/{id}", get(handlers::get_comment))
        .with_state(service)
}
