use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ordering applied to the company table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Ascending by company name.
    #[default]
    Alphabetical,
    /// Descending by total paid; ties keep their input order.
    ByTotal,
}

impl SortMode {
    /// Parse from a query string value, falling back to alphabetical.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "by_total" | "bytotal" | "total" => Self::ByTotal,
            _ => Self::Alphabetical,
        }
    }
}

/// Trait for query params that carry a sort mode.
pub trait Sortable {
    fn sort(&self) -> Option<&String>;

    fn resolve_sort(&self) -> SortMode {
        self.sort()
            .map(|s| SortMode::from_str(s))
            .unwrap_or_default()
    }
}

/// Name comparison for display lists. Letters compare without accents or
/// case first, so "Émile" files under E. Accents then break ties ("Eve"
/// before "Ève"), and case decides last, lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    folded(s).filter(|c| !is_combining_mark(*c))
}
