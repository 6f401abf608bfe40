//! Minimum-total filtering and ordering of the company table.

use crate::models::CompanyWithPayments;
use crate::sort_utils::{compare_names, SortMode};

/// Keep companies whose total is at least `min_total_cents`. `None` keeps all.
pub fn filter_by_min_total(
    companies: Vec<CompanyWithPayments>,
    min_total_cents: Option<i64>,
) -> Vec<CompanyWithPayments> {
    match min_total_cents {
        Some(min) => companies
            .into_iter()
            .filter(|c| c.total_amount_cents() >= min)
            .collect(),
        None => companies,
    }
}

/// Stable sort in place.
pub fn sort_companies(companies: &mut [CompanyWithPayments], mode: SortMode) {
    match mode {
        SortMode::Alphabetical => companies.sort_by(|a, b| compare_names(a.name(), b.name())),
        SortMode::ByTotal => {
            companies.sort_by(|a, b| b.total_amount_cents().cmp(&a.total_amount_cents()))
        }
    }
}

pub fn filter_and_sort(
    companies: Vec<CompanyWithPayments>,
    min_total_cents: Option<i64>,
    mode: SortMode,
) -> Vec<CompanyWithPayments> {
    let mut filtered = filter_by_min_total(companies, min_total_cents);
    sort_companies(&mut filtered, mode);
    filtered
}
