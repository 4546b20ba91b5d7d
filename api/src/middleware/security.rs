//! Transport security policy and response hardening headers.
//!
//! In production plain-HTTP requests are refused unless a trusted proxy
//! reports `X-Forwarded-Proto: https`, and every response carries HSTS,
//! nosniff, frame and CSP headers.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use tg_shared::{Environment, ServerConfig};

use crate::handlers::ApiError;

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Vec<String>,
}

impl SecurityMiddleware {
    pub fn new(environment: Environment, server: &ServerConfig) -> Self {
        let production = environment.is_production();
        tracing::info!(
            enforce_https = production,
            add_headers = production,
            trusted_proxies = ?server.trusted_proxies,
            "Security middleware configured"
        );
        Self {
            enforce_https: production,
            add_security_headers: production,
            trusted_proxies: server.trusted_proxies.clone(),
        }
    }

    /// No HTTPS enforcement, no extra headers
    pub fn development() -> Self {
        Self {
            enforce_https: false,
            add_security_headers: false,
            trusted_proxies: Vec::new(),
        }
    }

    pub fn with_trusted_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.trusted_proxies.push(proxy.into());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: self.trusted_proxies.clone().into(),
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<[String]>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
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
        let add_security_headers = self.add_security_headers;

        if self.enforce_https && !is_secure_request(&req, &self.trusted_proxies) {
            tracing::warn!(method = %req.method(), path = %req.path(), "Insecure request blocked");
            let response = ApiError::HttpsRequired.error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        Box::pin(async move {
            let mut response = service.call(req).await?;
            if add_security_headers {
                add_security_response_headers(&mut response);
            }
            Ok(response.map_into_left_body())
        })
    }
}

/// True when the transport is secure or a trusted proxy forwarded HTTPS
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    if req.app_config().secure() {
        return true;
    }
    let Some(peer) = req.peer_addr() else {
        return false;
    };
    if peer.ip().is_loopback() {
        return true;
    }

    let forwarded_https = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"));
    forwarded_https && is_trusted_proxy(&peer.to_string(), trusted_proxies)
}

fn is_trusted_proxy(peer_addr: &str, trusted_proxies: &[String]) -> bool {
    let ip = peer_addr
        .rsplit_once(':')
        .map(|(ip, _port)| ip)
        .unwrap_or(peer_addr);
    trusted_proxies
        .iter()
        .any(|trusted| trusted == ip || trusted == peer_addr)
}

fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // JSON only; nothing to load
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none';"),
    );
    headers.insert(
        header::HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("camera=(), geolocation=(), microphone=(), payment=()"),
    );
}
