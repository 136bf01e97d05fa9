use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::comments::{dtos as comments_dtos, handlers as comments_handlers};
use crate::features::ideas::{
    dtos as ideas_dtos, handlers as ideas_handlers, models as ideas_models,
};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
    models as notifications_models,
};
use crate::features::reviews::{
    dtos as reviews_dtos, handlers as reviews_handlers, models as reviews_models,
};
use crate::features::users::{
    dtos as users_dtos, handlers as users_handlers, models as users_models,
};
use crate::features::votes::{
    dtos as votes_dtos, handlers as votes_handlers, models as votes_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories (public)
        categories_handlers::list_categories,
        // Ideas
        ideas_handlers::list_ideas,
        ideas_handlers::list_my_ideas,
        ideas_handlers::get_idea,
        ideas_handlers::submit_idea,
        ideas_handlers::update_idea,
        ideas_handlers::delete_idea,
        // Comments
        comments_handlers::add_comment,
        comments_handlers::list_comments,
        comments_handlers::get_comment,
        comments_handlers::update_comment,
        comments_handlers::delete_comment,
        // Votes
        votes_handlers::list_votes,
        votes_handlers::upvote,
        votes_handlers::downvote,
        votes_handlers::remove_vote,
        // Reviews (manager)
        reviews_handlers::list_ideas_for_review,
        reviews_handlers::list_ideas_by_status,
        reviews_handlers::get_idea_for_review,
        reviews_handlers::change_idea_status,
        reviews_handlers::submit_review,
        reviews_handlers::get_review,
        reviews_handlers::list_reviews_for_idea,
        reviews_handlers::list_my_reviews,
        reviews_handlers::update_review,
        reviews_handlers::delete_review,
        // Notifications
        notifications_handlers::list_notifications,
        notifications_handlers::mark_notification_read,
        notifications_handlers::mark_all_notifications_read,
        // User management (admin)
        users_handlers::list_users,
        users_handlers::list_users_by_role,
        users_handlers::list_users_by_status,
        users_handlers::get_user,
        users_handlers::get_user_by_email,
        users_handlers::update_user_status,
        users_handlers::activate_user,
        users_handlers::deactivate_user,
        users_handlers::update_user_role,
        users_handlers::user_statistics,
        users_handlers::search_users,
        // Categories (admin)
        categories_handlers::admin_list_categories,
        categories_handlers::admin_get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::toggle_category_status,
        categories_handlers::delete_category,
    ),
    components(
        schemas(
            // Shared
            Meta,
            AuthenticatedUser,
            // Users
            users_models::UserRole,
            users_models::UserStatus,
            users_dtos::UserResponseDto,
            users_dtos::UserDetailResponseDto,
            users_dtos::RoleBreakdownDto,
            users_dtos::UserStatisticsDto,
            users_dtos::UpdateUserStatusDto,
            users_dtos::UpdateUserRoleDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<users_dtos::UserDetailResponseDto>,
            ApiResponse<users_dtos::UserStatisticsDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryRequestDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Ideas
            ideas_models::IdeaStatus,
            ideas_dtos::IdeaRequestDto,
            ideas_dtos::IdeaResponseDto,
            ideas_dtos::ChangeIdeaStatusDto,
            ApiResponse<ideas_dtos::IdeaResponseDto>,
            ApiResponse<Vec<ideas_dtos::IdeaResponseDto>>,
            // Comments
            comments_dtos::CommentRequestDto,
            comments_dtos::CommentResponseDto,
            ApiResponse<comments_dtos::CommentResponseDto>,
            ApiResponse<Vec<comments_dtos::CommentResponseDto>>,
            // Votes
            votes_models::VoteType,
            votes_dtos::VoteResponseDto,
            votes_dtos::DownvoteRequestDto,
            ApiResponse<votes_dtos::VoteResponseDto>,
            ApiResponse<Vec<votes_dtos::VoteResponseDto>>,
            // Reviews
            reviews_models::ReviewDecision,
            reviews_dtos::ReviewResponseDto,
            reviews_dtos::SubmitReviewDto,
            reviews_dtos::ReviewRequestDto,
            reviews_dtos::IdeaReviewDetailDto,
            ApiResponse<reviews_dtos::ReviewResponseDto>,
            ApiResponse<Vec<reviews_dtos::ReviewResponseDto>>,
            ApiResponse<reviews_dtos::IdeaReviewDetailDto>,
            ApiResponse<Vec<reviews_dtos::IdeaReviewDetailDto>>,
            // Notifications
            notifications_models::NotificationType,
            notifications_models::NotificationStatus,
            notifications_dtos::NotificationResponseDto,
            notifications_dtos::MarkAllReadDto,
            ApiResponse<notifications_dtos::NotificationResponseDto>,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
            ApiResponse<notifications_dtos::MarkAllReadDto>,
        )
    ),
    tags(
        (name = "categories", description = "Idea categories (public)"),
        (name = "ideas", description = "Idea submission and browsing (employees)"),
        (name = "comments", description = "Comments on ideas"),
        (name = "votes", description = "Upvotes and justified downvotes"),
        (name = "reviews", description = "Manager reviews and idea status changes"),
        (name = "notifications", description = "In-app notifications for the current user"),
        (name = "usermanagement", description = "User administration (admin only)"),
        (name = "admin-categories", description = "Category administration (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Idea Board API",
        version = "0.1.0",
        description = "API documentation for the internal idea board",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_area() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/categories",
            "/api/idea/all",
            "/api/comment/{id}",
            "/api/vote/{idea_id}/downvote",
            "/api/review/submit",
            "/api/notification",
            "/api/usermanagement/users",
            "/api/admin/categories/{id}/toggle-status",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Board".to_string(),
            version: "9.9.9".to_string(),
            description: "Internal".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Board");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Internal"));
    }
}
