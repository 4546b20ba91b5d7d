//! Review endpoints.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    MessageResponse, ReviewListQuery, ReviewResponse, SubmitReviewRequest, UpdateReviewRequest,
};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;
use tg_shared::ApiResponse;

/// Handler for POST /api/v1/reviews
///
/// # Request Body
///
/// ```json
/// {"company": "<company id>", "rating": 4, "title": "On time", "review_body": "..."}
/// ```
///
/// ## Errors
/// - 400 Bad Request: rating outside 1..=5, empty title or body
/// - 401 Unauthorized: no valid access token
/// - 404 Not Found: the company does not exist
pub async fn submit_review(
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<SubmitReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let review = state.reviews.submit(auth.user_id, request.into()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(ReviewResponse::from(review))))
}

/// GET /api/v1/reviews, newest first
pub async fn list_reviews(
    state: web::Data<AppState>,
    query: web::Query<ReviewListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = state
        .reviews
        .list(query.filter(), query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page.map(ReviewResponse::from))))
}

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let review = state.reviews.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(ReviewResponse::from(review))))
}

/// PATCH /api/v1/reviews/{id}, author only
pub async fn update_review(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let review = state
        .reviews
        .update(auth.user_id, path.into_inner(), request.into())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(ReviewResponse::from(review))))
}

/// DELETE /api/v1/reviews/{id}, author only
pub async fn delete_review(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.reviews.delete(auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new("Review deleted"))))
}

/// POST /api/v1/reviews/{id}/like
///
/// A second like by the same user fails with `DUPLICATE_VALUE`.
pub async fn like_review(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let review = state.reviews.like(auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(ReviewResponse::from(review))))
}

/// POST /api/v1/reviews/{id}/flag
pub async fn flag_review(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let review = state.reviews.flag(auth.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(ReviewResponse::from(review))))
}
