use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBreakdown {
    pub rate_percent: f64,
    pub gross_cents: i64,
    pub tax_paid_cents: i64,
    pub net_cents: i64,
}

/// Apply a flat percentage rate to a total. The caller guarantees the rate
/// lies in `0..=100`.
pub fn after_tax(total_cents: i64, rate_percent: f64) -> TaxBreakdown {
    let tax_paid_cents = (total_cents as f64 * rate_percent / 100.0).round() as i64;
    TaxBreakdown {
        rate_percent,
        gross_cents: total_cents,
        tax_paid_cents,
        net_cents: total_cents - tax_paid_cents,
    }
}
