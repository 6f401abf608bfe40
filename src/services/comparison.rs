//! Month-by-month comparison of two years of income.

use serde::Serialize;

use crate::date_utils::MONTH_NAMES;
use crate::models::Payment;
use crate::services::period::{aggregate_by_month, MonthlyBuckets};

/// Value reported when income appears in a month that had none the year before.
pub const NEW_INCOME_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub month: &'static str,
    pub year1_cents: i64,
    pub year2_cents: i64,
    pub difference_cents: i64,
    /// `None` when both years are zero.
    pub percent_change: Option<f64>,
}

impl ComparisonRow {
    fn new(month: &'static str, year1_cents: i64, year2_cents: i64) -> Self {
        Self {
            month,
            year1_cents,
            year2_cents,
            difference_cents: year2_cents.saturating_sub(year1_cents),
            percent_change: percent_change(year1_cents, year2_cents),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct YearComparison {
    pub year1: i32,
    pub year2: i32,
    pub rows: Vec<ComparisonRow>,
    pub totals: ComparisonRow,
}

/// Percentage change from `year1_cents` to `year2_cents`.
///
/// A zero baseline followed by income reports [`NEW_INCOME_PERCENT`]; two
/// zero values report `None`.
pub fn percent_change(year1_cents: i64, year2_cents: i64) -> Option<f64> {
    if year1_cents > 0 {
        Some((year2_cents - year1_cents) as f64 / year1_cents as f64 * 100.0)
    } else if year1_cents == 0 && year2_cents > 0 {
        Some(NEW_INCOME_PERCENT)
    } else {
        None
    }
}

/// Compare two independently fetched payment sets. Every month of both years
/// is included, whichever year is the current one.
pub fn compare_years(
    payments_year1: &[Payment],
    payments_year2: &[Payment],
    year1: i32,
    year2: i32,
) -> YearComparison {
    let buckets1 = aggregate_by_month(payments_year1, year1);
    let buckets2 = aggregate_by_month(payments_year2, year2);
    compare_buckets(&buckets1, &buckets2, year1, year2)
}

pub fn compare_buckets(
    buckets1: &MonthlyBuckets,
    buckets2: &MonthlyBuckets,
    year1: i32,
    year2: i32,
) -> YearComparison {
    let rows = MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(month0, &month)| {
            ComparisonRow::new(month, buckets1.get(month0), buckets2.get(month0))
        })
        .collect();

    YearComparison {
        year1,
        year2,
        rows,
        totals: ComparisonRow::new("Total", buckets1.total(), buckets2.total()),
    }
}
