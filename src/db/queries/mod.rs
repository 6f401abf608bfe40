pub mod companies;
pub mod payments;
pub mod settings;
