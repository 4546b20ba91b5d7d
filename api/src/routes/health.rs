//! Liveness and database readiness.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::state::AppState;
use tg_shared::{error_codes, ApiResponse, ErrorDetail};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// `"ok"` for MySQL, `"in-memory"` when no database is configured
    pub database: &'static str,
}

/// Handler for GET /health
///
/// Returns 503 with `SERVICE_UNAVAILABLE` when the database does not answer.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.database {
        None => "in-memory",
        Some(pool) => match pool.health_check().await {
            Ok(true) => "ok",
            Ok(false) => return unavailable("Database returned an unexpected result"),
            Err(error) => {
                tracing::error!(error = %error, "Database health check failed");
                return unavailable("Database unavailable");
            }
        },
    };

    HttpResponse::Ok().json(ApiResponse::success(HealthResponse {
        status: "healthy",
        service: "tradeguider-api",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    }))
}

fn unavailable(message: &str) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ApiResponse::<()>::failure(ErrorDetail::new(
        error_codes::SERVICE_UNAVAILABLE,
        message,
    )))
}
