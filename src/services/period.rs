//! Calendar-month bucketing of payments for a single year.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date_utils::MONTH_NAMES;
use crate::models::{sum_cents, CompanyWithPayments, Payment};

/// Summed amounts (in cents) per calendar month, index 0 = January.
/// Months without payments hold zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyBuckets([i64; 12]);

impl MonthlyBuckets {
    pub fn new(slots: [i64; 12]) -> Self {
        Self(slots)
    }

    pub fn slots(&self) -> &[i64; 12] {
        &self.0
    }

    pub fn get(&self, month0: usize) -> i64 {
        self.0.get(month0).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        sum_cents(self.0.iter().copied())
    }

    pub fn has_data(&self) -> bool {
        self.0.iter().any(|&amount| amount != 0)
    }

    fn add(&mut self, date: NaiveDate, amount_cents: i64) {
        let slot = &mut self.0[date.month0() as usize];
        *slot = slot.saturating_add(amount_cents);
    }
}

/// Bucket the payments dated in `year` by calendar month.
pub fn aggregate_by_month<'a, I>(payments: I, year: i32) -> MonthlyBuckets
where
    I: IntoIterator<Item = &'a Payment>,
{
    let mut buckets = MonthlyBuckets::default();
    for payment in payments {
        if payment.payment_date.year() == year {
            buckets.add(payment.payment_date, payment.amount_cents);
        }
    }
    buckets
}

/// Bucket every payment of every company for `year`.
pub fn aggregate_companies_by_month(companies: &[CompanyWithPayments], year: i32) -> MonthlyBuckets {
    aggregate_by_month(companies.iter().flat_map(|c| c.payments()), year)
}

/// Number of leading months that count towards a yearly average.
///
/// In the current year only the elapsed months (including the present one)
/// count. Any other year uses all twelve.
pub fn months_to_consider(year: i32, today: NaiveDate) -> usize {
    if year == today.year() {
        today.month0() as usize + 1
    } else {
        12
    }
}

/// Mean of the first `months` buckets, rounded to the nearest cent.
/// Zero when every considered month is empty.
pub fn average_per_month(buckets: &MonthlyBuckets, months: usize) -> i64 {
    let months = months.min(12);
    let considered = &buckets.slots()[..months];
    if !considered.iter().any(|&amount| amount != 0) {
        return 0;
    }

    let sum = sum_cents(considered.iter().copied());
    (sum as f64 / months as f64).round() as i64
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthRow {
    pub month: &'static str,
    pub total_cents: i64,
    pub payment_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyBreakdown {
    pub year: i32,
    pub rows: Vec<MonthRow>,
    pub year_to_date_cents: i64,
}

/// Per-month totals and payment counts for the first `months` months of
/// `year`, across all companies.
pub fn monthly_breakdown(
    companies: &[CompanyWithPayments],
    year: i32,
    months: usize,
) -> MonthlyBreakdown {
    let months = months.min(12);
    let mut totals = [0i64; 12];
    let mut counts = [0usize; 12];

    for payment in companies.iter().flat_map(|c| c.payments()) {
        if payment.payment_date.year() == year {
            let month0 = payment.payment_date.month0() as usize;
            totals[month0] = totals[month0].saturating_add(payment.amount_cents);
            counts[month0] += 1;
        }
    }

    let rows: Vec<MonthRow> = (0..months)
        .map(|month0| MonthRow {
            month: MONTH_NAMES[month0],
            total_cents: totals[month0],
            payment_count: counts[month0],
        })
        .collect();

    let year_to_date_cents = sum_cents(rows.iter().map(|r| r.total_cents));

    MonthlyBreakdown {
        year,
        rows,
        year_to_date_cents,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Company;

    pub(crate) fn payment(company_id: &str, date: &str, amount_cents: i64) -> Payment {
        Payment {
            id: format!("{}-{}-{}", company_id, date, amount_cents),
            company_id: company_id.into(),
            amount_cents,
            payment_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            user_id: "owner".into(),
            created_at: "2024-01-01 00:00:00".into(),
        }
    }

    pub(crate) fn company(id: &str, name: &str, payments: Vec<Payment>) -> CompanyWithPayments {
        CompanyWithPayments::new(
            Company {
                id: id.into(),
                name: name.into(),
                user_id: "owner".into(),
                created_at: "2024-01-01 00:00:00".into(),
            },
            payments,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_acme_scenario() {
        let payments = vec![
            payment("acme", "2024-01-15", 10_000),
            payment("acme", "2024-03-20", 20_000),
        ];

        let buckets = aggregate_by_month(&payments, 2024);

        assert_eq!(
            buckets.slots(),
            &[10_000, 0, 20_000, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(buckets.total(), 30_000);
    }

    #[test]
    fn test_empty_input_gives_twelve_zero_slots() {
        let none: Vec<Payment> = Vec::new();
        let buckets = aggregate_by_month(&none, 2024);
        assert_eq!(buckets.slots().len(), 12);
        assert!(buckets.slots().iter().all(|&s| s == 0));
        assert!(!buckets.has_data());
    }

    #[test]
    fn test_other_years_are_ignored() {
        let payments = vec![
            payment("a", "2023-12-31", 5_000),
            payment("a", "2024-12-01", 700),
            payment("a", "2024-12-31", 300),
            payment("a", "2025-01-01", 9_999),
        ];

        let buckets = aggregate_by_month(&payments, 2024);

        let expected: i64 = payments
            .iter()
            .filter(|p| p.payment_date.year() == 2024)
            .map(|p| p.amount_cents)
            .sum();
        assert_eq!(buckets.total(), expected);
        assert_eq!(buckets.get(11), 1_000);
    }

    #[test]
    fn test_aggregate_across_companies() {
        let companies = vec![
            company("a", "A", vec![payment("a", "2024-02-01", 100)]),
            company("b", "B", vec![payment("b", "2024-02-10", 250)]),
        ];

        let buckets = aggregate_companies_by_month(&companies, 2024);
        assert_eq!(buckets.get(1), 350);
    }

    #[test]
    fn test_months_to_consider() {
        assert_eq!(months_to_consider(2024, date(2024, 3, 10)), 3);
        assert_eq!(months_to_consider(2024, date(2024, 12, 31)), 12);
        assert_eq!(months_to_consider(2023, date(2024, 3, 10)), 12);
        assert_eq!(months_to_consider(2025, date(2024, 3, 10)), 12);
    }

    #[test]
    fn test_average_zero_when_considered_months_empty() {
        let mut slots = [0; 12];
        slots[6] = 1_000;
        let buckets = MonthlyBuckets::new(slots);

        assert_eq!(average_per_month(&buckets, 3), 0);
    }

    #[test]
    fn test_average_is_mean_of_considered_months() {
        let mut slots = [0; 12];
        slots[0] = 300;
        slots[2] = 600;
        slots[5] = 5_000;
        let buckets = MonthlyBuckets::new(slots);

        // Partial year: Jan..Mar, empty February still counts.
        assert_eq!(average_per_month(&buckets, 3), 300);
        // Full year.
        assert_eq!(average_per_month(&buckets, 12), 492);
    }

    #[test]
    fn test_average_zero_months() {
        let buckets = MonthlyBuckets::new([100; 12]);
        assert_eq!(average_per_month(&buckets, 0), 0);
    }

    #[test]
    fn test_monthly_breakdown_counts_payments() {
        let companies = vec![
            company(
                "a",
                "A",
                vec![
                    payment("a", "2024-01-05", 100),
                    payment("a", "2024-01-20", 200),
                ],
            ),
            company("b", "B", vec![payment("b", "2024-04-01", 400)]),
        ];

        let breakdown = monthly_breakdown(&companies, 2024, 3);

        assert_eq!(breakdown.rows.len(), 3);
        assert_eq!(breakdown.rows[0].month, "January");
        assert_eq!(breakdown.rows[0].total_cents, 300);
        assert_eq!(breakdown.rows[0].payment_count, 2);
        // April falls outside the considered months.
        assert_eq!(breakdown.year_to_date_cents, 300);
    }
}
