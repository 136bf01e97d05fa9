use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::ideas::handlers;
use crate::features::ideas::services::IdeaService;

/// Idea routes; every handler requires the Employee role
pub fn routes(service: Arc<IdeaService>) -> Router {
    Router::new()
        .route("/api/idea/all", get(handlers::list_ideas))
        .route("/api/idea/my-ideas", get(handlers::list_my_ideas))
        .route("/api/idea/submit", post(handlers::submit_idea))
        .route(
            "/api/idea/{id}",
            get(handlers::get_idea)
                .put(handlers::update_idea)
                .delete(handlers::delete_idea),
        )
        .with_state(service)
}
