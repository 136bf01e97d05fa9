use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::votes::handlers;
use crate::features::votes::services::VoteService;

/// Vote routes. Listing is public; casting and removing need a signed-in user.
pub fn routes(service: Arc<VoteService>) -> Router {
    Router::new()
        .route(
            "/api/vote/{idea_id}",
            get(handlers::list_votes).delete(handlers::remove_vote),
        )
        .route("/api/vote/{idea_id}/upvote", post(handlers::upvote))
        .route("/api/vote/{idea_id}/downvote", post(handlers::downvote))
        .with_state(service)
}
