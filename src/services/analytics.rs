use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{sum_cents, CompanyWithPayments};
use crate::services::period::{
    aggregate_companies_by_month, average_per_month, months_to_consider, MonthlyBuckets,
};
use crate::services::tax::{after_tax, TaxBreakdown};

/// Headline figures for one year of a portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct IncomeSummary {
    pub year: i32,
    pub total_cents: i64,
    pub average_per_month_cents: i64,
    pub months_considered: usize,
    pub payment_count: usize,
    pub company_count: usize,
    pub paying_company_count: usize,
    pub largest_payment_cents: i64,
    pub tax: TaxBreakdown,
    pub monthly: MonthlyBuckets,
}

impl IncomeSummary {
    /// `companies` are expected to carry the payments of `year` only.
    pub fn from_companies(
        companies: &[CompanyWithPayments],
        year: i32,
        today: NaiveDate,
        tax_rate: f64,
    ) -> Self {
        let total_cents = sum_cents(companies.iter().map(|c| c.total_amount_cents()));
        let monthly = aggregate_companies_by_month(companies, year);
        let months_considered = months_to_consider(year, today);

        let payments = || companies.iter().flat_map(|c| c.payments());

        Self {
            year,
            total_cents,
            average_per_month_cents: average_per_month(&monthly, months_considered),
            months_considered,
            payment_count: payments().count(),
            company_count: companies.len(),
            paying_company_count: companies
                .iter()
                .filter(|c| c.total_amount_cents() > 0)
                .count(),
            largest_payment_cents: payments().map(|p| p.amount_cents).max().unwrap_or(0),
            tax: after_tax(total_cents, tax_rate),
            monthly,
        }
    }
}
