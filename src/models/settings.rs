use crate::filters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_CURRENCY: &str = "GBP";
pub const DEFAULT_LOCALE: &str = "en-GB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    pub locale: String,
    /// Percentage withheld from dividend income, within `0..=100`.
    pub tax_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.into(),
            locale: DEFAULT_LOCALE.into(),
            tax_rate: 0.0,
        }
    }
}

impl Settings {
    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self {
            currency: map
                .get("currency")
                .cloned()
                .unwrap_or_else(|| DEFAULT_CURRENCY.into()),
            locale: map
                .get("locale")
                .cloned()
                .unwrap_or_else(|| DEFAULT_LOCALE.into()),
            tax_rate: map
                .get("tax_rate")
                .and_then(|s| s.parse().ok())
                .filter(|rate| is_valid_tax_rate(*rate))
                .unwrap_or(0.0),
        }
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("currency".into(), self.currency.clone());
        map.insert("locale".into(), self.locale.clone());
        map.insert("tax_rate".into(), self.tax_rate.to_string());
        map
    }

    /// Format an amount (in cents) using the configured currency and locale.
    pub fn format_money(&self, cents: i64) -> String {
        filters::format_money(cents, &self.currency, &self.locale)
    }

    /// Format a percentage change, `None` rendering as the neutral placeholder.
    pub fn format_percent(&self, value: Option<f64>) -> String {
        filters::format_percent(value, &self.locale)
    }
}

pub fn is_valid_tax_rate(rate: f64) -> bool {
    rate.is_finite() && (0.0..=100.0).contains(&rate)
}
