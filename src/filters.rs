//! Money and percentage formatting.
//!
//! One policy throughout: configured currency symbol, locale-dependent
//! separators, always two decimal places. Only negative amounts carry a sign.

/// Placeholder shown when a percentage has no meaningful value.
pub const NOT_APPLICABLE: &str = "N/A";

/// Format cents as a currency string, e.g. `£1,234.50` or `-€12,00`.
pub fn format_money(cents: i64, currency: &str, locale: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let whole = abs_cents / 100;
    let fractional = abs_cents % 100;

    let (thousands_sep, decimal_sep) = locale_separators(locale);
    let whole_str = format_with_thousands(whole, thousands_sep);
    let symbol = currency_symbol(currency);

    format!(
        "{}{}{}{}{:02}",
        sign, symbol, whole_str, decimal_sep, fractional
    )
}

/// Format a percentage change with sign and one decimal place.
/// `None` renders as [`NOT_APPLICABLE`] rather than `0.0%`.
///
/// Example: `Some(12.34)` -> "+12.3%" (en-GB) or "+12,3%" (de-DE)
pub fn format_percent(value: Option<f64>, locale: &str) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_APPLICABLE.to_string();
    };

    let (_, decimal_sep) = locale_separators(locale);
    let tenths = (value.abs() * 10.0).round() as i64;
    let sign = if tenths == 0 {
        ""
    } else if value > 0.0 {
        "+"
    } else {
        "-"
    };

    format!("{}{}{}{}%", sign, tenths / 10, decimal_sep, tenths % 10)
}

/// Get thousands and decimal separators based on locale.
fn locale_separators(locale: &str) -> (char, char) {
    match locale {
        "de-DE" | "de-AT" | "fr-FR" | "fr-BE" | "es-ES" | "it-IT" | "pt-BR" | "pt-PT"
        | "nl-NL" | "nl-BE" | "pl-PL" | "da-DK" | "nb-NO" | "sv-SE" | "fi-FI" => ('.', ','),
        _ => (',', '.'),
    }
}

fn format_with_thousands(n: u64, sep: char) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

fn currency_symbol(currency: &str) -> &'static str {
    match currency.to_uppercase().as_str() {
        "GBP" => "\u{00a3}",
        "USD" => "$",
        "EUR" => "\u{20ac}",
        "JPY" => "\u{00a5}",
        "CAD" => "C$",
        "AUD" => "A$",
        "CHF" => "CHF\u{00a0}",
        "SEK" | "NOK" | "DKK" => "kr\u{00a0}",
        "NZD" => "NZ$",
        _ => "\u{00a3}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount_has_no_sign() {
        assert_eq!(format_money(12345, "GBP", "en-GB"), "\u{00a3}123.45");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_money(-12345, "USD", "en-US"), "-$123.45");
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(format_money(0, "GBP", "en-GB"), "\u{00a3}0.00");
    }

    #[test]
    fn test_always_two_decimals() {
        assert_eq!(format_money(100_000, "USD", "en-US"), "$1,000.00");
    }

    #[test]
    fn test_thousands_separator_en() {
        assert_eq!(format_money(123456789, "USD", "en-US"), "$1,234,567.89");
    }

    #[test]
    fn test_thousands_separator_de() {
        assert_eq!(
            format_money(123456789, "EUR", "de-DE"),
            "\u{20ac}1.234.567,89"
        );
    }

    #[test]
    fn test_unknown_currency_falls_back_to_pound() {
        assert_eq!(format_money(500, "XYZ", "en-GB"), "\u{00a3}5.00");
    }

    #[test]
    fn test_percent_positive() {
        assert_eq!(format_percent(Some(12.34), "en-GB"), "+12.3%");
    }

    #[test]
    fn test_percent_negative() {
        assert_eq!(format_percent(Some(-5.67), "en-GB"), "-5.7%");
    }

    #[test]
    fn test_percent_zero() {
        assert_eq!(format_percent(Some(0.0), "en-GB"), "0.0%");
    }

    #[test]
    fn test_percent_not_applicable() {
        assert_eq!(format_percent(None, "en-GB"), "N/A");
        assert_eq!(format_percent(Some(f64::INFINITY), "en-GB"), "N/A");
    }

    #[test]
    fn test_percent_de_locale() {
        assert_eq!(format_percent(Some(100.0), "de-DE"), "+100,0%");
    }
}
