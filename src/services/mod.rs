pub mod analytics;
pub mod comparison;
pub mod ledger;
pub mod period;
pub mod pipeline;
pub mod ranking;
pub mod tax;
