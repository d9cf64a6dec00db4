use crate::core::{RateProvider, RateSnapshot};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, error, instrument};

/// Message reported when the provider answers with a non-success status.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching exchange rates";

/// Client for the open.er-api.com "latest rates" endpoint.
pub struct OpenErApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl RateProvider for OpenErApiProvider {
    #[instrument(name = "OpenErApiFetch", skip(self), fields(base = %base_currency))]
    async fn fetch_latest(&self, base_currency: &str) -> Result<RateSnapshot> {
        let url = format!("{}/v6/latest/{}", self.base_url, base_currency);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request failed for base currency: {base_currency}"))?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Rate provider returned an error status");
            return Err(anyhow!(FETCH_ERROR_MESSAGE));
        }

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for: {base_currency}"))?;

        let snapshot: RateSnapshot = match serde_json::from_str(&response_text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse exchange rate response"
                );
                return Err(e).with_context(|| {
                    format!("Failed to parse exchange rate response for: {base_currency}")
                });
            }
        };

        debug!(
            base = %snapshot.base_code,
            count = snapshot.rates.len(),
            "Fetched exchange rates"
        );
        Ok(snapshot)
    }
}
