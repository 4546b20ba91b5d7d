//! Company endpoints.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    CompanyListQuery, CompanyResponse, CompanyReviewsResponse, CompanySummaryResponse, PageQuery,
    RegisterCompanyRequest, WebsiteReviewsQuery,
};
use crate::handlers::ApiError;
use crate::state::AppState;
use tg_shared::ApiResponse;

/// Handler for POST /api/v1/companies
///
/// Open registration. The company counts as claimed when `work_email` is
/// given; `category` and `subcategory` are stored lower-cased with spaces
/// replaced by `_`.
///
/// ## Errors
/// - 400 Bad Request: invalid fields, or the website is already registered
pub async fn register_company(
    state: web::Data<AppState>,
    body: web::Json<RegisterCompanyRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let summary = state.companies.register(request.into()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(CompanyResponse::from(summary.company))))
}

/// GET /api/v1/companies, best rated first
pub async fn list_companies(
    state: web::Data<AppState>,
    query: web::Query<CompanyListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = state
        .companies
        .list(query.filter(), query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        page.map(CompanySummaryResponse::from),
    )))
}

/// GET /api/v1/companies/{id}
pub async fn get_company(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let summary = state.companies.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(CompanySummaryResponse::from(summary))))
}

/// GET /api/v1/companies/{id}/reviews
pub async fn company_reviews(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let view = state
        .companies
        .reviews_for_company(path.into_inner(), query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(CompanyReviewsResponse::from(view))))
}

/// GET /api/v1/companies/reviews?website=..&subcategory=..
///
/// An unknown website yields `{"company": null, "reviews": <empty page>}`.
pub async fn reviews_by_website(
    state: web::Data<AppState>,
    query: web::Query<WebsiteReviewsQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let view = state
        .companies
        .reviews_for_website(&query.website, query.subcategory(), query.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(CompanyReviewsResponse::from(view))))
}
