/// Serde helpers for query strings and request bodies.
///
/// Year and amount pickers send an empty string when cleared, which
/// `serde_urlencoded` cannot parse as a number. These helpers treat empty
/// strings as `None`.
use serde::{Deserialize, Deserializer};

pub fn deserialize_optional_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<i32>().map(Some).map_err(serde::de::Error::custom),
    }
}

pub fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse::<f64>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Convert a decimal amount in major units to cents. `None` for values that
/// are not finite or do not fit.
pub fn amount_to_cents(amount: f64) -> Option<i64> {
    if !amount.is_finite() {
        return None;
    }
    let cents = (amount * 100.0).round();
    if cents.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }
    Some(cents as i64)
}
