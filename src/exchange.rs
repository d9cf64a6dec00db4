//! Latest exchange rate snapshot and the conversions derived from it.

use crate::core::{CurrencyRate, RateProvider, RateSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

pub const DEFAULT_BASE_CURRENCY: &str = "USD";

const UNKNOWN_ERROR: &str = "Unknown error";

/// Lifecycle of the rate data. The previous snapshot is carried through
/// loading and failure so stale rates stay usable.
#[derive(Debug, Clone, Default)]
pub enum RateState {
    #[default]
    Uninitialized,
    Loading(Option<Arc<RateSnapshot>>),
    Ready(Arc<RateSnapshot>),
    Failed(String, Option<Arc<RateSnapshot>>),
}

impl RateState {
    fn snapshot(&self) -> Option<&Arc<RateSnapshot>> {
        match self {
            RateState::Uninitialized => None,
            RateState::Loading(prev) | RateState::Failed(_, prev) => prev.as_ref(),
            RateState::Ready(snapshot) => Some(snapshot),
        }
    }

    fn into_snapshot(self) -> Option<Arc<RateSnapshot>> {
        match self {
            RateState::Uninitialized => None,
            RateState::Loading(prev) | RateState::Failed(_, prev) => prev,
            RateState::Ready(snapshot) => Some(snapshot),
        }
    }
}

/// Holds at most one rate snapshot plus the loading flag and error message of
/// the most recent fetch.
///
/// Overlapping `fetch_rates` calls are not coordinated. Whichever finishes
/// last sets the loading flag and the snapshot, and a success leaves an error
/// recorded by another call in place.
pub struct RateStore {
    provider: Arc<dyn RateProvider>,
    state: Mutex<RateState>,
}

impl RateStore {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(RateState::Uninitialized),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the state using the previous one. The lock is never held
    /// across an await point.
    fn transition(&self, f: impl FnOnce(RateState) -> RateState) {
        let mut state = self.lock();
        let current = std::mem::take(&mut *state);
        *state = f(current);
    }

    pub fn state(&self) -> RateState {
        self.lock().clone()
    }

    pub fn snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.lock().snapshot().cloned()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.lock(), RateState::Loading(_))
    }

    pub fn error(&self) -> Option<String> {
        match &*self.lock() {
            RateState::Failed(message, _) => Some(message.clone()),
            _ => None,
        }
    }

    /// Fetches the latest rates for `base_currency` (USD when `None`).
    ///
    /// Failures never escape: they are recorded in [`RateStore::error`] and
    /// any previous snapshot is kept.
    pub async fn fetch_rates(&self, base_currency: Option<&str>) {
        let base = base_currency.unwrap_or(DEFAULT_BASE_CURRENCY);
        self.transition(|prev| RateState::Loading(prev.into_snapshot()));

        match self.provider.fetch_latest(base).await {
            Ok(snapshot) => {
                info!(base = %snapshot.base_code, "Exchange rates updated");
                let snapshot = Arc::new(snapshot);
                // Success never clears an error recorded by an overlapping fetch.
                self.transition(|prev| match prev {
                    RateState::Failed(message, _) => RateState::Failed(message, Some(snapshot)),
                    _ => RateState::Ready(snapshot),
                });
            }
            Err(e) => {
                error!(error = ?e, "Error fetching exchange rates");
                let message = format!("{e:#}");
                let message = if message.is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    message
                };
                self.transition(|prev| RateState::Failed(message, prev.into_snapshot()));
            }
        }
    }

    /// Rate to multiply an amount in `from` by to get `to`, or `None` when
    /// there is no snapshot or either code is missing from it.
    pub fn conversion_rate(&self, from: &str, to: &str) -> Option<f64> {
        let state = self.lock();
        let snapshot = state.snapshot()?;
        let from_rate = snapshot.rate(from)?;
        let to_rate = snapshot.rate(to)?;
        Some(to_rate / from_rate)
    }

    pub fn convert_currency(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        self.conversion_rate(from, to).map(|rate| amount * rate)
    }

    /// Rates of each of `codes` against `from`, skipping unavailable codes.
    pub fn currency_rates(&self, from: &str, codes: &[String]) -> Vec<CurrencyRate> {
        codes
            .iter()
            .filter_map(|code| {
                let rate = self.conversion_rate(from, code);
                if rate.is_none() {
                    debug!("No rate available for {} -> {}", from, code);
                }
                rate.map(|rate| CurrencyRate {
                    code: code.clone(),
                    rate,
                })
            })
            .collect()
    }
}
