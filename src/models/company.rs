use serde::{Deserialize, Serialize};

use crate::models::{sum_cents, Payment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCompany {
    pub name: String,
}

/// A company together with its payments for one selection window.
///
/// `total_amount_cents` is derived from `payments` on construction and has no
/// setter, so it always matches the attached payments.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyWithPayments {
    #[serde(flatten)]
    pub company: Company,
    payments: Vec<Payment>,
    total_amount_cents: i64,
}

impl CompanyWithPayments {
    pub fn new(company: Company, payments: Vec<Payment>) -> Self {
        let total_amount_cents = sum_cents(payments.iter().map(|p| p.amount_cents));
        Self {
            company,
            payments,
            total_amount_cents,
        }
    }

    pub fn id(&self) -> &str {
        &self.company.id
    }

    pub fn name(&self) -> &str {
        &self.company.name
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn total_amount_cents(&self) -> i64 {
        self.total_amount_cents
    }
}
