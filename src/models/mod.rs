pub mod company;
pub mod payment;
pub mod portfolio;
pub mod settings;

pub use company::{Company, CompanyWithPayments, NewCompany};
pub use payment::{sum_cents, NewPayment, Payment, PaymentUpdate, MAX_PAYMENT_CENTS};
pub use portfolio::Portfolio;
pub use settings::Settings;
