use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::date_utils::{today, YearFilterable, YearRange};
use crate::error::{AppError, AppResult};
use crate::form_utils::deserialize_optional_i32;
use crate::handlers::companies::YearParams;
use crate::handlers::year_range;
use crate::models::{sum_cents, Payment, Portfolio, Settings};
use crate::owner::Owner;
use crate::services::analytics::IncomeSummary;
use crate::services::comparison::{compare_years, ComparisonRow, YearComparison};
use crate::services::ledger;
use crate::services::period::{
    aggregate_companies_by_month, monthly_breakdown, months_to_consider, MonthlyBreakdown,
    MonthlyBuckets,
};
use crate::services::ranking::{
    distribution as distribution_of, rank_by_average, CompanyAverage, DistributionSlice,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub portfolio: Portfolio,
    pub label: &'static str,
    #[serde(flatten)]
    pub summary: IncomeSummary,
    pub total_formatted: String,
    pub average_formatted: String,
    pub net_formatted: String,
    pub tax_paid_formatted: String,
}

pub async fn summary(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<SummaryResponse>> {
    let today = today();
    let range = year_range(params.resolve_year(today))?;
    let settings = state.load_settings()?;
    let conn = state.db.get()?;

    let companies = ledger::load_companies(&conn, portfolio, owner.as_str(), Some(range))?;
    let summary = IncomeSummary::from_companies(&companies, range.year, today, settings.tax_rate);

    Ok(Json(SummaryResponse {
        portfolio,
        label: portfolio.label(),
        total_formatted: settings.format_money(summary.total_cents),
        average_formatted: settings.format_money(summary.average_per_month_cents),
        net_formatted: settings.format_money(summary.tax.net_cents),
        tax_paid_formatted: settings.format_money(summary.tax.tax_paid_cents),
        summary,
    }))
}

#[derive(Debug, Serialize)]
pub struct MonthlyResponse {
    pub portfolio: Portfolio,
    pub has_data: bool,
    pub months_considered: usize,
    pub buckets: MonthlyBuckets,
    pub breakdown: MonthlyBreakdown,
}

/// Per-month totals for the bar chart and the month table.
pub async fn monthly(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<MonthlyResponse>> {
    let today = today();
    let range = year_range(params.resolve_year(today))?;
    let conn = state.db.get()?;

    let companies = ledger::load_companies(&conn, portfolio, owner.as_str(), Some(range))?;
    let months_considered = months_to_consider(range.year, today);
    let buckets = aggregate_companies_by_month(&companies, range.year);

    Ok(Json(MonthlyResponse {
        portfolio,
        has_data: buckets.has_data(),
        months_considered,
        buckets,
        breakdown: monthly_breakdown(&companies, range.year, months_considered),
    }))
}

#[derive(Debug, Serialize)]
pub struct AverageRow {
    #[serde(flatten)]
    pub average: CompanyAverage,
    pub average_formatted: String,
}

#[derive(Debug, Serialize)]
pub struct AveragesResponse {
    pub portfolio: Portfolio,
    pub companies: Vec<AverageRow>,
}

/// Companies ranked by average income per active month, over their whole
/// history.
pub async fn averages(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
) -> AppResult<Json<AveragesResponse>> {
    let settings = state.load_settings()?;
    let conn = state.db.get()?;

    let companies = ledger::load_companies(&conn, portfolio, owner.as_str(), None)?;
    let ranked = rank_by_average(&companies)
        .into_iter()
        .map(|average| AverageRow {
            average_formatted: settings.format_money(average.average_cents),
            average,
        })
        .collect();

    Ok(Json(AveragesResponse {
        portfolio,
        companies: ranked,
    }))
}

#[derive(Debug, Serialize)]
pub struct DistributionResponse {
    pub portfolio: Portfolio,
    pub year: i32,
    pub total_cents: i64,
    pub slices: Vec<DistributionSlice>,
}

/// Share of the year's income per company, for the pie chart.
pub async fn distribution(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<DistributionResponse>> {
    let range = year_range(params.resolve_year(today()))?;
    let conn = state.db.get()?;

    let companies = ledger::load_companies(&conn, portfolio, owner.as_str(), Some(range))?;
    let slices = distribution_of(&companies);

    Ok(Json(DistributionResponse {
        portfolio,
        year: range.year,
        total_cents: sum_cents(slices.iter().map(|s| s.total_cents)),
        slices,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareParams {
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub year1: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub year2: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct FormattedRow {
    #[serde(flatten)]
    pub row: ComparisonRow,
    pub percent_formatted: String,
}

impl FormattedRow {
    fn new(row: ComparisonRow, settings: &Settings) -> Self {
        Self {
            percent_formatted: settings.format_percent(row.percent_change),
            row,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub portfolio: Portfolio,
    pub year1: i32,
    pub year2: i32,
    pub rows: Vec<FormattedRow>,
    pub totals: FormattedRow,
}

async fn fetch_year_payments(
    state: &AppState,
    portfolio: Portfolio,
    owner: &Owner,
    range: YearRange,
) -> AppResult<Vec<Payment>> {
    let pool = state.db.clone();
    let owner = owner.as_str().to_string();

    tokio::task::spawn_blocking(move || -> AppResult<Vec<Payment>> {
        let conn = pool.get()?;
        Ok(ledger::load_year_payments(&conn, portfolio, &owner, range)?)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Payment lookup task failed: {}", e)))?
}

/// Month-by-month comparison of two years. Defaults to last year against
/// this year.
pub async fn compare(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
    Query(params): Query<CompareParams>,
) -> AppResult<Json<CompareResponse>> {
    let current_year = today().year();
    let range1 = year_range(params.year1.unwrap_or(current_year - 1))?;
    let range2 = year_range(params.year2.unwrap_or(current_year))?;
    let settings = state.load_settings()?;

    let (payments1, payments2) = tokio::try_join!(
        fetch_year_payments(&state, portfolio, &owner, range1),
        fetch_year_payments(&state, portfolio, &owner, range2),
    )?;

    let YearComparison {
        year1,
        year2,
        rows,
        totals,
    } = compare_years(&payments1, &payments2, range1.year, range2.year);

    tracing::debug!(%portfolio, year1, year2, "Compared years");

    Ok(Json(CompareResponse {
        portfolio,
        year1,
        year2,
        rows: rows
            .into_iter()
            .map(|row| FormattedRow::new(row, &settings))
            .collect(),
        totals: FormattedRow::new(totals, &settings),
    }))
}
