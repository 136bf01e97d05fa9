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
use crate::features::ideas::dtos::{IdeaRequestDto, IdeaResponseDto};
use crate::features::ideas::services::IdeaService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::validate_request;

/// List all ideas with tallies and comments
#[utoipa::path(
    get,
    path = "/api/idea/all",
    responses(
        (status = 200, description = "List of ideas", body = ApiResponse<Vec<IdeaResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Employee access required")
    ),
    tag = "ideas",
    security(("bearer_auth" = []))
)]
pub async fn list_ideas(
    RequireEmployee(_user): RequireEmployee,
    State(service): State<Arc<IdeaService>>,
) -> Result<Json<ApiResponse<Vec<IdeaResponseDto>>>> {
    let ideas = service.list_all().await?;
    Ok(Json(ApiResponse::list(ideas)))
}

/// List the caller's own ideas, newest first
#[utoipa::path(
    get,
    path = "/api/idea/my-ideas",
    responses(
        (status = 200, description = "Caller's ideas", body = ApiResponse<Vec<IdeaResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "ideas",
    security(("bearer_auth" = []))
)]
pub async fn list_my_ideas(
    RequireEmployee(user): RequireEmployee,
    State(service): State<Arc<IdeaService>>,
) -> Result<Json<ApiResponse<Vec<IdeaResponseDto>>>> {
    let ideas = service.list_by_submitter(user.user_id).await?;
    Ok(Json(ApiResponse::list(ideas)))
}

/// Get an idea by ID
#[utoipa::path(
    get,
    path = "/api/idea/{id}",
    params(("id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Idea found", body = ApiResponse<IdeaResponseDto>),
        (status = 404, description = "Idea not found")
    ),
    tag = "ideas",
    security(("bearer_auth" = []))
)]
pub async fn get_idea(
    RequireEmployee(_user): RequireEmployee,
    State(service): State<Arc<IdeaService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IdeaResponseDto>>> {
    let idea = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(idea), None, None)))
}

/// Submit a new idea
///
/// The idea starts UnderReview and every active manager is notified.
#[utoipa::path(
    post,
    path = "/api/idea/submit",
    request_body = IdeaRequestDto,
    responses(
        (status = 201, description = "Idea submitted", body = ApiResponse<IdeaResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Selected category is inactive")
    ),
    tag = "ideas",
    security(("bearer_auth" = []))
)]
pub async fn submit_idea(
    RequireEmployee(user): RequireEmployee,
    State(service): State<Arc<IdeaService>>,
    AppJson(dto): AppJson<IdeaRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<IdeaResponseDto>>)> {
    let dto = dto.trimmed();
    validate_request(&dto)?;

    let idea = service.submit(&user, &dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(idea),
            Some("Idea submitted successfully".to_string()),
            None,
        )),
    ))
}

/// Update one of the caller's ideas
#[utoipa::path(
    put,
    path = "/api/idea/{id}",
    params(("id" = Uuid, Path, description = "Idea ID")),
    request_body = IdeaRequestDto,
    responses(
        (status = 200, description = "Idea updated", body = ApiResponse<IdeaResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "You can only update your own ideas"),
        (status = 404, description = "Idea or category not found"),
        (status = 422, description = "Selected category is inactive")
    ),
    tag = "ideas",
    security(("bearer_auth" = []))
)]
pub async fn update_idea(
    RequireEmployee(user): RequireEmployee,
    State(service): State<Arc<IdeaService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<IdeaRequestDto>,
) -> Result<Json<ApiResponse<IdeaResponseDto>>> {
    let dto = dto.trimmed();
    validate_request(&dto)?;

    let idea = service.update(&user, id, &dto).await?;
    Ok(Json(ApiResponse::success(
        Some(idea),
        Some("Idea updated successfully".to_string()),
        None,
    )))
}

/// Delete one of the caller's draft ideas
#[utoipa::path(
    delete,
    path = "/api/idea/{id}",
    params(("id" = Uuid, Path, description = "Idea ID")),
    responses(
        (status = 200, description = "Idea deleted"),
        (status = 403, description = "You can only delete your own ideas"),
        (status = 404, description = "Idea not found"),
        (status = 422, description = "You can only delete ideas in Draft status")
    ),
    tag = "ideas",
    security(("bearer_auth" = []))
)]
pub async fn delete_idea(
    RequireEmployee(user): RequireEmployee,
    State(service): State<Arc<IdeaService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Idea deleted successfully".to_string()),
        None,
    )))
}
