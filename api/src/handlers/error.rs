//! Mapping from domain and request errors to enveloped HTTP responses.
//!
//! Every failure leaves the server as `{"success": false, "error": {...}}`.
//! Internal details are logged here and never written to the response body.

use std::collections::HashMap;

use actix_web::{
    dev::ServiceResponse,
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    middleware::ErrorHandlerResponse,
    HttpRequest, HttpResponse, ResponseError,
};
use tg_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use tg_shared::{error_codes, ApiResponse, ErrorDetail};

/// Error type returned by every handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Body, query string or path that could not be parsed or validated
    #[error("{message}")]
    InvalidRequest {
        message: String,
        fields: HashMap<String, Vec<String>>,
    },

    #[error("The requested resource was not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("HTTPS required")]
    HttpsRequired,
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest {
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            ApiError::Domain(error) => domain_detail(error),
            ApiError::InvalidRequest { message, fields } => {
                ErrorDetail::new(error_codes::VALIDATION_ERROR, message.clone())
                    .with_fields(fields.clone())
            }
            ApiError::RouteNotFound => {
                ErrorDetail::new(error_codes::NOT_FOUND, self.to_string())
            }
            ApiError::MethodNotAllowed => {
                ErrorDetail::new(error_codes::METHOD_NOT_ALLOWED, self.to_string())
            }
            ApiError::HttpsRequired => {
                ErrorDetail::new(error_codes::PERMISSION_DENIED, self.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|error| match &error.message {
                        Some(message) => message.to_string(),
                        None => error.code.to_string(),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ApiError::InvalidRequest {
            message: "Invalid request data".to_string(),
            fields,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_status(error),
            ApiError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::HttpsRequired => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        HttpResponse::build(status).json(ApiResponse::failure(self.detail()))
    }
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Auth(AuthError::InvalidCredential) => StatusCode::BAD_REQUEST,
        DomainError::Auth(AuthError::AuthenticationFailed) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::PermissionDenied) => StatusCode::FORBIDDEN,
        DomainError::Token(TokenError::TokenGenerationFailed) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
    }
}

fn domain_detail(error: &DomainError) -> ErrorDetail {
    match error {
        DomainError::Validation { message } => {
            ErrorDetail::new(error_codes::VALIDATION_ERROR, message.clone())
        }
        DomainError::NotFound { resource } => {
            ErrorDetail::new(error_codes::NOT_FOUND, format!("{} not found", resource))
        }
        DomainError::Internal { .. } | DomainError::Token(TokenError::TokenGenerationFailed) => {
            ErrorDetail::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        }
        DomainError::Auth(auth) => {
            let code = match auth {
                AuthError::InvalidCredential => error_codes::INVALID_CREDENTIAL,
                AuthError::AuthenticationFailed => error_codes::AUTHENTICATION_FAILED,
                AuthError::PermissionDenied => error_codes::PERMISSION_DENIED,
            };
            ErrorDetail::new(code, auth.to_string())
        }
        DomainError::Token(TokenError::TokenExpired) => {
            ErrorDetail::new(error_codes::TOKEN_EXPIRED, "Token expired")
        }
        DomainError::Token(token) => ErrorDetail::new(
            error_codes::AUTHENTICATION_FAILED,
            format!("Authentication failed: {}", token.to_string().to_lowercase()),
        ),
        DomainError::ValidationErr(validation) => validation_detail(validation),
    }
}

fn validation_detail(error: &ValidationError) -> ErrorDetail {
    let code = match error {
        ValidationError::DuplicateValue { .. } => error_codes::DUPLICATE_VALUE,
        _ => error_codes::VALIDATION_ERROR,
    };
    let detail = ErrorDetail::new(code, error.to_string());
    match error.field() {
        Some(field) => detail.with_fields(HashMap::from([(
            field.to_string(),
            vec![error.to_string()],
        )])),
        None => detail,
    }
}

/// Error handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            format!("Request body exceeds {} bytes", limit)
        }
        other => format!("Invalid JSON body: {}", other),
    };
    ApiError::invalid_request(message).into()
}

/// Error handler for `web::QueryConfig`
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid_request(format!("Invalid query string: {}", err)).into()
}

/// Error handler for `web::PathConfig`
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid_request(format!("Invalid path parameter: {}", err)).into()
}

/// Replaces the bare 405 produced by resources with the envelope
pub fn method_not_allowed<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let response = ServiceResponse::new(req, ApiError::MethodNotAllowed.error_response());
    Ok(ErrorHandlerResponse::Response(response.map_into_right_body()))
}
