use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::date_utils::{is_supported_year, parse_date};
use crate::db::queries::{companies, payments};
use crate::error::{AppError, AppResult};
use crate::form_utils::amount_to_cents;
use crate::models::{NewPayment, Payment, PaymentUpdate, Portfolio, MAX_PAYMENT_CENTS};
use crate::owner::Owner;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentPayload {
    pub company_id: String,
    /// Amount in major units, e.g. `12.34`.
    pub amount: f64,
    pub payment_date: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentPayload {
    pub amount: f64,
    #[serde(default)]
    pub payment_date: Option<String>,
}

fn positive_cents(amount: f64) -> AppResult<i64> {
    if amount.is_finite() && amount * 100.0 > MAX_PAYMENT_CENTS as f64 {
        return Err(AppError::Validation(format!(
            "Amount must not exceed {}",
            MAX_PAYMENT_CENTS / 100
        )));
    }
    match amount_to_cents(amount) {
        Some(cents) if cents > 0 => Ok(cents),
        _ => Err(AppError::Validation("Amount must be greater than zero".into())),
    }
}

fn valid_date(raw: &str) -> AppResult<NaiveDate> {
    let date = parse_date(raw.trim())
        .ok_or_else(|| AppError::Validation("Invalid date format (expected YYYY-MM-DD)".into()))?;
    if !is_supported_year(date.year()) {
        return Err(AppError::Validation(format!(
            "Year {} is outside the supported range",
            date.year()
        )));
    }
    Ok(date)
}

pub async fn create(
    State(state): State<AppState>,
    owner: Owner,
    Path(portfolio): Path<Portfolio>,
    Json(payload): Json<CreatePaymentPayload>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let amount_cents = positive_cents(payload.amount)?;
    let payment_date = valid_date(&payload.payment_date)?;

    let conn = state.db.get()?;

    if companies::get_company(&conn, portfolio, owner.as_str(), &payload.company_id)?.is_none() {
        return Err(AppError::NotFound("Company not found".into()));
    }

    let new_payment = NewPayment {
        company_id: payload.company_id,
        amount_cents,
        payment_date,
    };
    let id = payments::create_payment(&conn, portfolio, owner.as_str(), &new_payment)?;

    let payment = payments::get_payment(&conn, portfolio, owner.as_str(), &id)?
        .ok_or_else(|| AppError::Internal("Failed to retrieve created payment".into()))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn update(
    State(state): State<AppState>,
    owner: Owner,
    Path((portfolio, id)): Path<(Portfolio, String)>,
    Json(payload): Json<UpdatePaymentPayload>,
) -> AppResult<Json<Payment>> {
    let update = PaymentUpdate {
        amount_cents: positive_cents(payload.amount)?,
        payment_date: payload
            .payment_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(valid_date)
            .transpose()?,
    };

    let conn = state.db.get()?;

    if !payments::update_payment(&conn, portfolio, owner.as_str(), &id, &update)? {
        return Err(AppError::NotFound("Payment not found".into()));
    }

    let payment = payments::get_payment(&conn, portfolio, owner.as_str(), &id)?
        .ok_or_else(|| AppError::NotFound("Payment not found".into()))?;

    Ok(Json(payment))
}

pub async fn delete(
    State(state): State<AppState>,
    owner: Owner,
    Path((portfolio, id)): Path<(Portfolio, String)>,
) -> AppResult<StatusCode> {
    let conn = state.db.get()?;

    if !payments::delete_payment(&conn, portfolio, owner.as_str(), &id)? {
        return Err(AppError::NotFound("Payment not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
