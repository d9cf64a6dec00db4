//! Core abstractions shared by the stores, providers and CLI

pub mod config;
pub mod log;
pub mod rates;
pub mod storage;

// Re-export main types for cleaner imports
pub use rates::{CurrencyRate, RateProvider, RateSnapshot};
pub use storage::LocalStorage;
