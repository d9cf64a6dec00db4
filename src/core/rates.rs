//! Exchange rate data shapes and the provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One full set of exchange rates relative to `base_code`, as returned by a
/// single successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub result: String,
    pub provider: String,
    pub documentation: String,
    pub terms_of_use: String,
    pub time_last_update_unix: i64,
    pub time_last_update_utc: String,
    pub time_next_update_unix: i64,
    pub time_next_update_utc: String,
    pub time_eol_unix: i64,
    pub base_code: String,
    pub rates: HashMap<String, f64>,
}

impl RateSnapshot {
    /// Rate of `code` relative to the base currency.
    ///
    /// A zero rate is reported as missing, the same as an absent code.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied().filter(|rate| *rate != 0.0)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time_last_update_unix, 0).single()
    }

    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time_next_update_unix, 0).single()
    }
}

/// A currency code paired with its rate, used for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub code: String,
    pub rate: f64,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_latest(&self, base_currency: &str) -> Result<RateSnapshot>;
}
