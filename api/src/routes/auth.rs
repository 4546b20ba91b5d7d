//! Registration and passcode login.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{
    LoginCodeRequest, LoginRequest, OtpIssuedResponse, RefreshTokenRequest, RegisterResponse,
    RegisterUserRequest, TokenResponse,
};
use crate::handlers::ApiError;
use crate::state::AppState;
use tg_shared::ApiResponse;

/// Handler for POST /api/v1/users/register
///
/// Creates the account and emails a registration passcode.
///
/// # Request Body
///
/// ```json
/// {"email": "a@x.com", "name": "Ada", "country": "NG", "language": "en"}
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid fields, or the email is already registered
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let registration = state.auth.register(request.into()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(RegisterResponse {
        user: registration.user.into(),
        otp: registration.otp.into(),
    })))
}

/// Handler for POST /api/v1/users/login/otp
///
/// Always answers the same way for a well-formed email, registered or not.
pub async fn request_login_code(
    state: web::Data<AppState>,
    body: web::Json<LoginCodeRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let issued = state.auth.request_login_code(&body.email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(OtpIssuedResponse::from(issued))))
}

/// Handler for POST /api/v1/users/login
///
/// Exchanges a pending passcode for an access and refresh token.
///
/// # Request Body
///
/// ```json
/// {"email": "a@x.com", "otp": "0427"}
/// ```
///
/// ## Errors
/// - 400 Bad Request: `INVALID_CREDENTIAL` ("invalid otp") for a wrong,
///   expired or unknown code, or an email without an account
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let result = state.auth.login(&body.email, &body.otp).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenResponse::from(result))))
}

/// Handler for POST /api/v1/users/token/refresh
pub async fn refresh(
    state: web::Data<AppState>,
    body: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let result = state.auth.refresh(&body.refresh_token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenResponse::from(result))))
}
