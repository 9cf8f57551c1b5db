//! QR tracking and dashboard analytics endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::analytics::{AnalyticsRequest, DailyChartPoint, DashboardStats, HourlyChartPoint},
    AppState,
};

use super::{AppJson, AuthenticatedUser};

/// Record a QR code scan
#[utoipa::path(
    post,
    path = "/qr-track",
    tag = "analytics",
    responses(
        (status = 200, description = "Scan recorded"),
        (status = 503, description = "Event store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn track_qr_scan(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.services.analytics.log_scan().await?;
    Ok(StatusCode::OK)
}

/// Total scans for a range
#[utoipa::path(
    post,
    path = "/dashboard/stats",
    tag = "analytics",
    security(("bearer_auth" = [])),
    request_body = AnalyticsRequest,
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 400, description = "Invalid range or malformed body", body = crate::error::ErrorResponse),
        (status = 403, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppJson(request): AppJson<AnalyticsRequest>,
) -> AppResult<Json<DashboardStats>> {
    claims.require_admin()?;

    let stats = state.services.analytics.dashboard_stats(&request).await?;
    Ok(Json(stats))
}

/// Daily scans for a range, one point per day
#[utoipa::path(
    post,
    path = "/dashboard/chart",
    tag = "analytics",
    security(("bearer_auth" = [])),
    request_body = AnalyticsRequest,
    responses(
        (status = 200, description = "Daily chart data", body = Vec<DailyChartPoint>),
        (status = 400, description = "Invalid range or malformed body", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppJson(request): AppJson<AnalyticsRequest>,
) -> AppResult<Json<Vec<DailyChartPoint>>> {
    claims.require_admin()?;

    let chart = state.services.analytics.chart_data(&request).await?;
    Ok(Json(chart))
}

/// Today's scans by hour of day
#[utoipa::path(
    get,
    path = "/dashboard/chart/hourly-today",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "24 hourly points", body = Vec<HourlyChartPoint>)
    )
)]
pub async fn get_today_hourly_chart(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<HourlyChartPoint>>> {
    claims.require_admin()?;

    let chart = state.services.analytics.today_hourly_chart().await?;
    Ok(Json(chart))
}
