use chrono::{Datelike, Local, NaiveDate};

/// Earliest year offered by the year selectors.
pub const MIN_YEAR: i32 = 2000;
/// Latest year offered by the year selectors.
pub const MAX_YEAR: i32 = 2100;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Today's date in local time. Only request handlers call this; aggregation
/// code always takes the date or year as an argument.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn is_supported_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Trait for query params that carry an optional selected year.
pub trait YearFilterable {
    fn year(&self) -> Option<i32>;

    /// The selected year, defaulting to the year of `today`.
    fn resolve_year(&self, today: NaiveDate) -> i32 {
        self.year().unwrap_or(today.year())
    }
}

/// Inclusive date window covering one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub year: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl YearRange {
    /// Returns `None` for years chrono cannot represent.
    pub fn new(year: i32) -> Option<Self> {
        Some(Self {
            year,
            from: NaiveDate::from_ymd_opt(year, 1, 1)?,
            to: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// The year before, if it is still selectable.
    pub fn prev(&self) -> Option<Self> {
        Some(self.year - 1)
            .filter(|y| is_supported_year(*y))
            .and_then(Self::new)
    }

    /// The year after, if it is still selectable.
    pub fn next(&self) -> Option<Self> {
        Some(self.year + 1)
            .filter(|y| is_supported_year(*y))
            .and_then(Self::new)
    }
}
