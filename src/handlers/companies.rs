use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::date_utils::{today, YearFilterable};
use crate::db::queries::companies;
use crate::db::queries::payments::{list_payments, PaymentFilter};
use crate::error::{AppError, AppResult};
use crate::form_utils::{amount_to_cents, deserialize_optional_f64, deserialize_optional_i32};
use crate::handlers::year_range;
use crate::models::{sum_cents, Company, CompanyWithPayments, NewCompany, Payment, Portfolio};
use crate::owner::Owner;
use crate::services::ledger;
use crate::services::period::{aggregate_by_month, MonthlyBuckets};
use crate::services::pipeline::filter_and_sort;
use crate::sort_utils::{SortMode, Sortable};
use crate::state::AppState;

const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct CompanyListParams {
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub year: Option<i32>,
    /// Minimum yearly total, in major units.
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub min_total: Option<f64>,
    pub sort: Option<String>,
}

impl YearFilterable for CompanyListParams {
    fn year(&self) -> Option<i32> {
        self.year
    }
}

impl Sortable for CompanyListParams {
    fn sort(&self) -> Option<&String> {
        self.sort.as_ref()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct YearParams {
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub year: Option<i32>,
}

impl YearFilterable for YearParams {
    fn year(&self) -> Option<i32> {
        self.year
    }
}

#[derive(Debug, Deserialize)]
pub struct CompanyPayload {
    pub name: String,
}

impl CompanyPayload {
    fn validated_name(&self) -> AppResult<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Company name is required".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "Company name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }
        Ok(name.to_string())
    }
}

/// A row of the company table: the company, its payments for the year and
/// its per-month totals.
#[derive(Debug, Serialize)]
pub struct CompanyRow {
    #[serde(flatten)]
    pub company: CompanyWithPayments,
    pub monthly: MonthlyBuckets,
    pub total_formatted: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub portfolio: Portfolio,
    pub year: i32,
    pub previous_year: Option<i32>,
    pub next_year: Option<i32>,
    pub sort: SortMode,
    pub min_total_cents: Option<i64>,
    pub total_cents: i64,
    pub companies: Vec<CompanyRow>,
}

#[derive(Debug, Serialize)]
pub struct PaymentHistoryResponse {
    pub company: Company,
    pub year: i32,
    pub payments: Vec<Payment>,
    pub total_cents: i64,
    pub total_formatted: String,
}

pub async fn index(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
    Query(params): Query<CompanyListParams>,
) -> AppResult<Json<CompanyListResponse>> {
    let range = year_range(params.resolve_year(today()))?;
    let sort = params.resolve_sort();
    let min_total_cents = match params.min_total {
        Some(amount) => Some(
            amount_to_cents(amount)
                .ok_or_else(|| AppError::Validation("Invalid minimum amount".into()))?,
        ),
        None => None,
    };

    let settings = state.load_settings()?;
    let conn = state.db.get()?;
    let loaded = ledger::load_companies(&conn, portfolio, owner.as_str(), Some(range))?;

    let visible = filter_and_sort(loaded, min_total_cents, sort);
    let total_cents = sum_cents(visible.iter().map(|c| c.total_amount_cents()));

    let companies = visible
        .into_iter()
        .map(|company| CompanyRow {
            monthly: aggregate_by_month(company.payments(), range.year),
            total_formatted: settings.format_money(company.total_amount_cents()),
            company,
        })
        .collect();

    Ok(Json(CompanyListResponse {
        portfolio,
        year: range.year,
        previous_year: range.prev().map(|r| r.year),
        next_year: range.next().map(|r| r.year),
        sort,
        min_total_cents,
        total_cents,
        companies,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
    Json(payload): Json<CompanyPayload>,
) -> AppResult<(StatusCode, Json<Company>)> {
    let new_company = NewCompany {
        name: payload.validated_name()?,
    };

    let conn = state.db.get()?;
    let id = companies::create_company(&conn, portfolio, owner.as_str(), &new_company)
        .map_err(|e| AppError::on_unique_violation(e, "A company with this name already exists"))?;

    let company = companies::get_company(&conn, portfolio, owner.as_str(), &id)?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created company".into()))?;

    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn rename(
    State(state): State<AppState>,
    owner: Owner,
    Path((portfolio, id)): Path<(Portfolio, String)>,
    Json(payload): Json<CompanyPayload>,
) -> AppResult<Json<Company>> {
    let name = payload.validated_name()?;

    let conn = state.db.get()?;
    let updated = companies::rename_company(&conn, portfolio, owner.as_str(), &id, &name)
        .map_err(|e| AppError::on_unique_violation(e, "A company with this name already exists"))?;
    if !updated {
        return Err(AppError::NotFound("Company not found".into()));
    }

    let company = companies::get_company(&conn, portfolio, owner.as_str(), &id)?
        .ok_or_else(|| AppError::NotFound("Company not found".into()))?;

    Ok(Json(company))
}

pub async fn delete(
    State(state): State<AppState>,
    owner: Owner,
    Path((portfolio, id)): Path<(Portfolio, String)>,
) -> AppResult<StatusCode> {
    let conn = state.db.get()?;

    if !companies::delete_company(&conn, portfolio, owner.as_str(), &id)? {
        return Err(AppError::NotFound("Company not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn payment_history(
    State(state): State<AppState>,
    owner: Owner,
    Path((portfolio, id)): Path<(Portfolio, String)>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<PaymentHistoryResponse>> {
    let range = year_range(params.resolve_year(today()))?;
    let settings = state.load_settings()?;
    let conn = state.db.get()?;

    let company = companies::get_company(&conn, portfolio, owner.as_str(), &id)?
        .ok_or_else(|| AppError::NotFound("Company not found".into()))?;

    let filter = PaymentFilter {
        company_id: Some(company.id.clone()),
        ..PaymentFilter::between(range.from, range.to)
    };
    let payments = list_payments(&conn, portfolio, owner.as_str(), &filter)?;
    let total_cents = sum_cents(payments.iter().map(|p| p.amount_cents));

    Ok(Json(PaymentHistoryResponse {
        company,
        year: range.year,
        payments,
        total_cents,
        total_formatted: settings.format_money(total_cents),
    }))
}
