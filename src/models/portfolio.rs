use serde::{Deserialize, Serialize};

/// Which set of holdings a company or payment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portfolio {
    All,
    Isa,
}

impl Portfolio {
    pub fn as_str(&self) -> &'static str {
        match self {
            Portfolio::All => "all",
            Portfolio::Isa => "isa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Portfolio::All => "All Stocks",
            Portfolio::Isa => "ISA Stocks and Shares",
        }
    }

    pub fn companies_table(&self) -> &'static str {
        match self {
            Portfolio::All => "companies",
            Portfolio::Isa => "isa_companies",
        }
    }

    pub fn payments_table(&self) -> &'static str {
        match self {
            Portfolio::All => "payments",
            Portfolio::Isa => "isa_payments",
        }
    }
}

impl std::fmt::Display for Portfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
