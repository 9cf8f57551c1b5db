//! API handlers and routing for the analytics REST endpoints

pub mod analytics;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::claims::Claims, AppState};

/// JSON body extractor whose rejections render as `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = Claims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Public scan tracking
        .route("/qr-track", post(analytics::track_qr_scan))
        // Dashboard
        .route("/dashboard/stats", post(analytics::get_dashboard_stats))
        .route("/dashboard/chart", post(analytics::get_chart))
        .route("/dashboard/chart/hourly-today", get(analytics::get_today_hourly_chart))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
