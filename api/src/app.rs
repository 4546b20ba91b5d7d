//! Application factory
//!
//! Builds the Actix-web application: shared state, extractor limits and
//! error handlers, the middleware stack and the route table.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    middleware::ErrorHandlers,
    web, App, HttpResponse, ResponseError,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::{
    json_error_handler, method_not_allowed, path_error_handler, query_error_handler, ApiError,
};
use crate::middleware::{create_cors, JwtAuth, SecurityMiddleware};
use crate::routes;
use crate::state::AppState;
use tg_shared::AppConfig;

/// Create and configure the application with all dependencies
///
/// Middleware runs outermost first: request tracing, CORS, transport
/// security, then bearer-token authentication.
pub fn create_app(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // wrap order is innermost first
        .wrap(ErrorHandlers::new().handler(StatusCode::METHOD_NOT_ALLOWED, method_not_allowed))
        .wrap(JwtAuth::new())
        .wrap(SecurityMiddleware::new(config.environment, &config.server))
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(routes::health::health_check))
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ApiError::RouteNotFound.error_response()
}
