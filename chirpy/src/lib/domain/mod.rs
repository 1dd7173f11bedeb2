pub mod account;
pub mod errors;
pub mod metrics;
pub mod platform;
pub mod session;
