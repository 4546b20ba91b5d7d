//! Bearer-token authentication middleware.
//!
//! The middleware wraps the whole application. A request without an
//! `Authorization` header passes through anonymously; protected handlers
//! reject it through the [`AuthContext`] extractor. A header that is present
//! but malformed, or a token that fails verification or belongs to a deleted
//! user, is answered with 401 before any handler runs.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use tg_core::{AuthError, DomainError, User};
use uuid::Uuid;

use crate::handlers::ApiError;
use crate::state::AppState;

/// Authenticated caller, injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub user: User,
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !req.headers().contains_key(AUTHORIZATION) {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            match authenticate(&req).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    tracing::debug!(
                        path = %req.path(),
                        error = %error,
                        "Rejected bearer credential"
                    );
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req).ok_or_else(authentication_failed)?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| DomainError::internal("application state is not registered"))?;

    let (user, _claims) = state.auth.authenticate(&token).await?;
    Ok(AuthContext {
        user_id: user.id,
        user,
    })
}

fn authentication_failed() -> ApiError {
    ApiError::Domain(DomainError::Auth(AuthError::AuthenticationFailed))
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(authentication_failed);

        ready(result)
    }
}
