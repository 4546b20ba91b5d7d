//! Profile endpoints.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{MessageResponse, PageQuery, ReviewResponse, UpdateUserRequest, UserProfileResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;
use tg_shared::ApiResponse;

/// GET /api/v1/users/me
pub async fn me(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let profile = state.users.get_profile(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserProfileResponse::from(profile))))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let profile = state.users.get_profile(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserProfileResponse::from(profile))))
}

/// PATCH /api/v1/users/{id}
///
/// Partial update of the caller's own profile. `id`, `created_at` and
/// `is_verified` cannot be changed.
pub async fn update_user(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let profile = state
        .users
        .update_profile(auth.user_id, path.into_inner(), request.into())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserProfileResponse::from(profile))))
}

/// DELETE /api/v1/users/{id}
///
/// Removes the account with its reviews, likes and flags. Tokens already
/// issued to it stop working.
pub async fn delete_user(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state
        .users
        .delete_profile(auth.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new("User deleted"))))
}

/// GET /api/v1/users/{id}/reviews
pub async fn list_user_reviews(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = state
        .users
        .list_reviews(path.into_inner(), query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page.map(ReviewResponse::from))))
}
