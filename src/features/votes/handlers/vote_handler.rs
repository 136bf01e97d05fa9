use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::votes::dtos::{DownvoteRequestDto, VoteResponseDto};
use crate::features::votes::services::VoteService;
use crate::shared::types::ApiResponse;

/// List the votes on an idea
#[utoipa::path(
    get,
    path = "/api/vote/{idea_id}",
    params(("idea_id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Votes with voter names", body = ApiResponse<Vec<VoteResponseDto>>),
    ),
    tag = "votes"
)]
pub async fn list_votes(
    State(service): State<Arc<VoteService>>,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<VoteResponseDto>>>> {
    let votes = service.list_for_idea(idea_id).await?;
    Ok(Json(ApiResponse::list(votes)))
}

/// Upvote an idea
///
/// Replaces an earlier downvote and withdraws the comment that justified it.
#[utoipa::path(
    post,
    path = "/api/vote/{idea_id}/upvote",
    params(("idea_id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Upvote recorded", body = ApiResponse<VoteResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Idea not found"),
        (status = 409, description = "You have already upvoted this idea")
    ),
    tag = "votes",
    security(("bearer_auth" = []))
)]
pub async fn upvote(
    user: AuthenticatedUser,
    State(service): State<Arc<VoteService>>,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ApiResponse<VoteResponseDto>>> {
    let vote = service.upvote(user.user_id, idea_id).await?;
    Ok(Json(ApiResponse::success(
        Some(vote),
        Some("Upvote added successfully".to_string()),
        None,
    )))
}

/// Downvote an idea with a mandatory comment
#[utoipa::path(
    post,
    path = "/api/vote/{idea_id}/downvote",
    params(("idea_id" = Uuid, Path, description = "Idea ID")),
    request_body = DownvoteRequestDto,
    responses(
        (status = 200, description = "Downvote recorded", body = ApiResponse<VoteResponseDto>),
        (status = 400, description = "Comment is mandatory when downvoting"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Idea not found"),
        (status = 409, description = "You have already downvoted this idea")
    ),
    tag = "votes",
    security(("bearer_auth" = []))
)]
pub async fn downvote(
    user: AuthenticatedUser,
    State(service): State<Arc<VoteService>>,
    Path(idea_id): Path<Uuid>,
    AppJson(dto): AppJson<DownvoteRequestDto>,
) -> Result<Json<ApiResponse<VoteResponseDto>>> {
    let vote = service
        .downvote(user.user_id, idea_id, dto.comment_text.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(vote),
        Some("Downvote added successfully with comment".to_string()),
        None,
    )))
}

/// Remove the caller's vote on an idea
#[utoipa::path(
    delete,
    path = "/api/vote/{idea_id}",
    params(("idea_id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Vote removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vote not found")
    ),
    tag = "votes",
    security(("bearer_auth" = []))
)]
pub async fn remove_vote(
    user: AuthenticatedUser,
    State(service): State<Arc<VoteService>>,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove(user.user_id, idea_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Vote removed successfully".to_string()),
        None,
    )))
}
