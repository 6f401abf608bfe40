//! Per-company metrics computed across a set of companies.

use std::collections::HashSet;

use chrono::Datelike;
use serde::Serialize;

use crate::models::{sum_cents, CompanyWithPayments};

/// Total paid divided by the number of distinct (year, month) pairs with at
/// least one payment, over all attached payments. Zero when there are none.
pub fn average_per_active_month(company: &CompanyWithPayments) -> i64 {
    let active_months = active_month_count(company);
    if active_months == 0 {
        return 0;
    }
    (company.total_amount_cents() as f64 / active_months as f64).round() as i64
}

pub fn active_month_count(company: &CompanyWithPayments) -> usize {
    company
        .payments()
        .iter()
        .map(|p| (p.payment_date.year(), p.payment_date.month0()))
        .collect::<HashSet<_>>()
        .len()
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyAverage {
    pub company_id: String,
    pub name: String,
    pub average_cents: i64,
    pub total_cents: i64,
    pub active_months: usize,
}

/// Companies ordered by descending average per active month. Companies
/// averaging exactly zero are left out; ties keep their input order.
pub fn rank_by_average(companies: &[CompanyWithPayments]) -> Vec<CompanyAverage> {
    let mut ranked: Vec<CompanyAverage> = companies
        .iter()
        .map(|company| CompanyAverage {
            company_id: company.id().to_string(),
            name: company.name().to_string(),
            average_cents: average_per_active_month(company),
            total_cents: company.total_amount_cents(),
            active_months: active_month_count(company),
        })
        .filter(|row| row.average_cents != 0)
        .collect();

    ranked.sort_by(|a, b| b.average_cents.cmp(&a.average_cents));
    ranked
}

/// Percentage of the combined total contributed by `company`.
/// `None` when the combined total is zero.
pub fn share_of_total(company: &CompanyWithPayments, all: &[CompanyWithPayments]) -> Option<f64> {
    percentage_of(company.total_amount_cents(), combined_total(all))
}

fn combined_total(companies: &[CompanyWithPayments]) -> i64 {
    sum_cents(companies.iter().map(|c| c.total_amount_cents()))
}

fn percentage_of(part_cents: i64, total_cents: i64) -> Option<f64> {
    if total_cents == 0 {
        return None;
    }
    Some(part_cents as f64 / total_cents as f64 * 100.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionSlice {
    pub company_id: String,
    pub name: String,
    pub total_cents: i64,
    pub percentage: f64,
}

/// Share of income per company, for companies that paid anything,
/// largest first.
pub fn distribution(companies: &[CompanyWithPayments]) -> Vec<DistributionSlice> {
    let total_cents = combined_total(companies);

    let mut slices: Vec<DistributionSlice> = companies
        .iter()
        .filter(|company| company.total_amount_cents() > 0)
        .filter_map(|company| {
            percentage_of(company.total_amount_cents(), total_cents).map(|percentage| DistributionSlice {
                company_id: company.id().to_string(),
                name: company.name().to_string(),
                total_cents: company.total_amount_cents(),
                percentage,
            })
        })
        .collect();

    slices.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
    slices
}
