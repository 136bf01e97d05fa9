use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireEmployee;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::comments::dtos::{CommentRequestDto, CommentResponseDto};
use crate::features::comments::services::CommentService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::validate_request;

// GET/POST take an idea ID and PUT/DELETE a comment ID in the same path slot,
// so every route names it `id`.

/// Comment on an idea
#[utoipa::path(
    post,
    path = "/api/comment/{id}",
    params(("id" = Uuid, Path, description = "Idea ID")),
    request_body = CommentRequestDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Comment text cannot be empty"),
        (status = 403, description = "Forbidden - Employee access required"),
        (status = 404, description = "Idea not found")
    ),
    tag = "comments",
    security(("bearer_auth" = []))
)]
pub async fn add_comment(
    RequireEmployee(user): RequireEmployee,
    State(service): State<Arc<CommentService>>,
    Path(idea_id): Path<Uuid>,
    AppJson(dto): AppJson<CommentRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>)> {
    validate_request(&dto)?;

    let comment = service.add(user.user_id, idea_id, &dto.text).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(comment),
            Some("Comment added successfully".to_string()),
            None,
        )),
    ))
}

/// List comments on an idea, newest first
#[utoipa::path(
    get,
    path = "/api/comment/{id}",
    params(("id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Comments", body = ApiResponse<Vec<CommentResponseDto>>),
        (status = 404, description = "Idea not found")
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(service): State<Arc<CommentService>>,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>> {
    let comments = service.list_for_idea(idea_id).await?;
    Ok(Json(ApiResponse::list(comments)))
}

/// Get a single comment
#[utoipa::path(
    get,
    path = "/api/comment/comment/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment found", body = ApiResponse<CommentResponseDto>),
        (status = 404, description = "Comment not found")
    ),
    tag = "comments"
)]
pub async fn get_comment(
    State(service): State<Arc<CommentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CommentResponseDto>>> {
    let comment = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(comment), None, None)))
}

/// Edit one of the caller's comments
#[utoipa::path(
    put,
    path = "/api/comment/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = CommentRequestDto,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Comment text cannot be empty"),
        (status = 403, description = "You can only update your own comments"),
        (status = 404, description = "Comment not found")
    ),
    tag = "comments",
    security(("bearer_auth" = []))
)]
pub async fn update_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CommentRequestDto>,
) -> Result<Json<ApiResponse<CommentResponseDto>>> {
    validate_request(&dto)?;

    let comment = service.update(user.user_id, id, &dto.text).await?;
    Ok(Json(ApiResponse::success(
        Some(comment),
        Some("Comment updated successfully".to_string()),
        None,
    )))
}

/// Delete one of the caller's comments
#[utoipa::path(
    delete,
    path = "/api/comment/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "You can only delete your own comments"),
        (status = 404, description = "Comment not found")
    ),
    tag = "comments",
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<CommentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(user.user_id, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Comment deleted successfully".to_string()),
        None,
    )))
}
