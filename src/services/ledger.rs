//! Builds `CompanyWithPayments` views from the store.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::date_utils::YearRange;
use crate::db::queries::payments::PaymentFilter;
use crate::db::queries::{companies, payments};
use crate::models::{CompanyWithPayments, Payment, Portfolio};

/// Every company of `owner` in `portfolio`, each with its payments inside
/// `window` (or its whole history when `window` is `None`). Companies without
/// payments in the window are included with an empty list and a zero total.
pub fn load_companies(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    window: Option<YearRange>,
) -> rusqlite::Result<Vec<CompanyWithPayments>> {
    let company_list = companies::list_companies(conn, portfolio, owner)?;

    let filter = window
        .map(|range| PaymentFilter::between(range.from, range.to))
        .unwrap_or_default();
    let payment_list = payments::list_payments(conn, portfolio, owner, &filter)?;

    let mut by_company: HashMap<String, Vec<Payment>> = HashMap::new();
    for payment in payment_list {
        by_company
            .entry(payment.company_id.clone())
            .or_default()
            .push(payment);
    }

    Ok(company_list
        .into_iter()
        .map(|company| {
            let attached = by_company.remove(&company.id).unwrap_or_default();
            CompanyWithPayments::new(company, attached)
        })
        .collect())
}

/// Payments of `owner` in `portfolio` dated within `range`.
pub fn load_year_payments(
    conn: &Connection,
    portfolio: Portfolio,
    owner: &str,
    range: YearRange,
) -> rusqlite::Result<Vec<Payment>> {
    payments::list_payments(
        conn,
        portfolio,
        owner,
        &PaymentFilter::between(range.from, range.to),
    )
}
