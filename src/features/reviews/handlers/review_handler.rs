use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireManager;
use crate::features::ideas::dtos::ChangeIdeaStatusDto;
use crate::features::ideas::models::IdeaStatus;
use crate::features::reviews::dtos::{
    IdeaReviewDetailDto, ReviewRequestDto, ReviewResponseDto, SubmitReviewDto,
};
use crate::features::reviews::policy;
use crate::features::reviews::services::ReviewService;
use crate::shared::types::ApiResponse;

/// List every idea with comments and reviews, newest first
#[utoipa::path(
    get,
    path = "/api/review/ideas",
    responses(
        (status = 200, description = "Ideas with reviews", body = ApiResponse<Vec<IdeaReviewDetailDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Manager access required")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn list_ideas_for_review(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<ReviewService>>,
) -> Result<Json<ApiResponse<Vec<IdeaReviewDetailDto>>>> {
    let ideas = service.ideas_for_review().await?;
    Ok(Json(ApiResponse::list(ideas)))
}

/// List ideas in one status
#[utoipa::path(
    get,
    path = "/api/review/ideas/status/{status}",
    params(("status" = String, Path, description = "Draft, UnderReview or Approved (case-insensitive)")),
    responses(
        (status = 200, description = "Ideas with reviews", body = ApiResponse<Vec<IdeaReviewDetailDto>>),
        (status = 400, description = "Invalid status")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn list_ideas_by_status(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<ReviewService>>,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<IdeaReviewDetailDto>>>> {
    let status = status.parse::<IdeaStatus>().map_err(AppError::Validation)?;
    let ideas = service.ideas_by_status(status).await?;
    Ok(Json(ApiResponse::list(ideas)))
}

/// Get one idea with comments and reviews
#[utoipa::path(
    get,
    path = "/api/review/ideas/{idea_id}",
    params(("idea_id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Idea with reviews", body = ApiResponse<IdeaReviewDetailDto>),
        (status = 404, description = "Idea not found")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn get_idea_for_review(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<ReviewService>>,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ApiResponse<IdeaReviewDetailDto>>> {
    let idea = service.idea_for_review(idea_id).await?;
    Ok(Json(ApiResponse::success(Some(idea), None, None)))
}

/// Move an idea to another status
///
/// Allowed moves: Draft to UnderReview, UnderReview to Draft, UnderReview to Approved.
#[utoipa::path(
    put,
    path = "/api/review/ideas/{idea_id}/status",
    params(("idea_id" = Uuid, Path, description = "Idea ID")),
    request_body = ChangeIdeaStatusDto,
    responses(
        (status = 200, description = "Status changed"),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Idea not found"),
        (status = 422, description = "Transition not allowed")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn change_idea_status(
    RequireManager(_user): RequireManager,
    State(service): State<Arc<ReviewService>>,
    Path(idea_id): Path<Uuid>,
    AppJson(dto): AppJson<ChangeIdeaStatusDto>,
) -> Result<Json<ApiResponse<()>>> {
    let next = dto.status.parse::<IdeaStatus>().map_err(AppError::Validation)?;

    let previous = service.change_idea_status(idea_id, next).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Idea status changed from {} to {}", previous, next)),
        None,
    )))
}

/// Submit a review for an idea
///
/// The idea's submitter is notified of the decision.
#[utoipa::path(
    post,
    path = "/api/review/submit",
    request_body = SubmitReviewDto,
    responses(
        (status = 201, description = "Review submitted", body = ApiResponse<ReviewResponseDto>),
        (status = 400, description = "Feedback missing or decision invalid"),
        (status = 404, description = "Idea not found"),
        (status = 409, description = "You have already submitted a review for this idea")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn submit_review(
    RequireManager(user): RequireManager,
    State(service): State<Arc<ReviewService>>,
    AppJson(dto): AppJson<SubmitReviewDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponseDto>>)> {
    let (feedback, decision) = policy::validate_review(&dto.feedback, &dto.decision)?;

    let review = service
        .submit(user.user_id, dto.idea_id, &feedback, decision)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(review),
            Some("Review submitted successfully".to_string()),
            None,
        )),
    ))
}

/// Get a review by ID; open to anyone
#[utoipa::path(
    get,
    path = "/api/review/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review found", body = ApiResponse<ReviewResponseDto>),
        (status = 404, description = "Review not found")
    ),
    tag = "reviews"
)]
pub async fn get_review(
    State(service): State<Arc<ReviewService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReviewResponseDto>>> {
    let review = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(review), None, None)))
}

/// List the reviews of an idea, newest first
#[utoipa::path(
    get,
    path = "/api/review/idea/{idea_id}",
    params(("idea_id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Reviews", body = ApiResponse<Vec<ReviewResponseDto>>),
        (status = 404, description = "Idea not found")
    ),
    tag = "reviews"
)]
pub async fn list_reviews_for_idea(
    State(service): State<Arc<ReviewService>>,
    Path(idea_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let reviews = service.list_for_idea(idea_id).await?;
    Ok(Json(ApiResponse::list(reviews)))
}

/// List the caller's own reviews, newest first
#[utoipa::path(
    get,
    path = "/api/review/manager/my-reviews",
    responses(
        (status = 200, description = "Caller's reviews", body = ApiResponse<Vec<ReviewResponseDto>>),
        (status = 403, description = "Forbidden - Manager access required")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn list_my_reviews(
    RequireManager(user): RequireManager,
    State(service): State<Arc<ReviewService>>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let reviews = service.list_by_reviewer(user.user_id).await?;
    Ok(Json(ApiResponse::list(reviews)))
}

/// Edit one of the caller's reviews
#[utoipa::path(
    put,
    path = "/api/review/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = ReviewRequestDto,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewResponseDto>),
        (status = 400, description = "Feedback missing or decision invalid"),
        (status = 403, description = "You can only update your own reviews"),
        (status = 404, description = "Review not found")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    RequireManager(user): RequireManager,
    State(service): State<Arc<ReviewService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ReviewRequestDto>,
) -> Result<Json<ApiResponse<ReviewResponseDto>>> {
    let (feedback, decision) = policy::validate_review(&dto.feedback, &dto.decision)?;

    let review = service.update(user.user_id, id, &feedback, decision).await?;
    Ok(Json(ApiResponse::success(
        Some(review),
        Some("Review updated successfully".to_string()),
        None,
    )))
}

/// Delete one of the caller's reviews
#[utoipa::path(
    delete,
    path = "/api/review/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 403, description = "You can only delete your own reviews"),
        (status = 404, description = "Review not found")
    ),
    tag = "reviews",
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    RequireManager(user): RequireManager,
    State(service): State<Arc<ReviewService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(user.user_id, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Review deleted successfully".to_string()),
        None,
    )))
}
