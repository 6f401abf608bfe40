use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Largest single payment accepted, in cents (one trillion in major units).
pub const MAX_PAYMENT_CENTS: i64 = 100_000_000_000_000;

/// Sum amounts in cents, clamping at the `i64` bounds instead of wrapping.
pub fn sum_cents<I>(amounts: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    amounts.into_iter().fold(0, i64::saturating_add)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub company_id: String,
    pub amount_cents: i64,
    pub payment_date: NaiveDate,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub company_id: String,
    pub amount_cents: i64,
    pub payment_date: NaiveDate,
}

/// Changes applied to an existing payment. A missing date keeps the old one.
#[derive(Debug, Clone)]
pub struct PaymentUpdate {
    pub amount_cents: i64,
    pub payment_date: Option<NaiveDate>,
}
