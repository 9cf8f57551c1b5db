//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NextBeer Analytics API",
        version = "0.3.0",
        description = "QR scan tracking and dashboard analytics"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Analytics
        analytics::track_qr_scan,
        analytics::get_dashboard_stats,
        analytics::get_chart,
        analytics::get_today_hourly_chart,
    ),
    components(
        schemas(
            crate::models::analytics::AnalyticsRequest,
            crate::models::analytics::RangeType,
            crate::models::analytics::DashboardStats,
            crate::models::analytics::DailyChartPoint,
            crate::models::analytics::HourlyChartPoint,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "analytics", description = "QR scan tracking and dashboard analytics")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
