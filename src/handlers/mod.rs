pub mod analytics;
pub mod companies;
pub mod payments;
pub mod settings;

use axum::routing::{get, post, put};
use axum::Router;

use crate::date_utils::{is_supported_year, YearRange, MAX_YEAR, MIN_YEAR};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Companies
        .route(
            "/api/:portfolio/companies",
            get(companies::index).post(companies::create),
        )
        .route(
            "/api/:portfolio/companies/:id",
            put(companies::rename).delete(companies::delete),
        )
        .route(
            "/api/:portfolio/companies/:id/payments",
            get(companies::payment_history),
        )
        // Payments
        .route("/api/:portfolio/payments", post(payments::create))
        .route(
            "/api/:portfolio/payments/:id",
            put(payments::update).delete(payments::delete),
        )
        // Analytics (JSON for cards, tables and charts)
        .route("/api/:portfolio/analytics/summary", get(analytics::summary))
        .route("/api/:portfolio/analytics/monthly", get(analytics::monthly))
        .route("/api/:portfolio/analytics/averages", get(analytics::averages))
        .route(
            "/api/:portfolio/analytics/distribution",
            get(analytics::distribution),
        )
        .route("/api/:portfolio/analytics/compare", get(analytics::compare))
        // Settings
        .route("/api/settings", get(settings::show).put(settings::update))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

/// JSON 404 for unknown routes.
pub async fn fallback() -> AppError {
    AppError::NotFound("No such route".into())
}

/// Validate a selected year and turn it into its date window.
pub(crate) fn year_range(year: i32) -> AppResult<YearRange> {
    if !is_supported_year(year) {
        return Err(AppError::Validation(format!(
            "Year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )));
    }
    YearRange::new(year).ok_or_else(|| AppError::Validation(format!("Invalid year {}", year)))
}
