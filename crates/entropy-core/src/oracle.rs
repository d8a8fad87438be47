//! Price oracle client.
//!
//! Single-call, no-retry HTTP collaborator: success yields a decimal
//! price, failure (network error, non-2xx, missing field) yields an
//! error with no partial result. The conversation flow turns failures
//! into user-visible error renders; nothing here is fatal.

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use serde_json::Value;

use crate::config::Config;

/// Fetches the current price of the configured asset.
pub trait PriceOracle: Send + Sync {
    fn fetch_price(&self) -> impl Future<Output = Result<f64>> + Send;
}

/// Coingecko-style `simple/price` client.
#[derive(Clone)]
pub struct CoingeckoOracle {
    http: reqwest::Client,
    base_url: String,
    asset_id: String,
    quote_currency: String,
    timeout: Option<Duration>,
}

impl CoingeckoOracle {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.oracle_base_url.clone(),
            asset_id: config.asset_symbol.clone(),
            quote_currency: config.quote_currency.clone(),
            timeout: config.request_timeout(),
        }
    }
}

impl PriceOracle for CoingeckoOracle {
    async fn fetch_price(&self) -> Result<f64> {
        let url = format!("{}/api/v3/simple/price", self.base_url);
        let mut request = self.http.get(url).query(&[
            ("ids", self.asset_id.as_str()),
            ("vs_currencies", self.quote_currency.as_str()),
        ]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|_| anyhow!("Price request failed"))?;

        if !response.status().is_success() {
            bail!("Price request failed with status {}", response.status());
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|_| anyhow!("Failed to decode price response"))?;

        payload
            .get(&self.asset_id)
            .and_then(|asset| asset.get(&self.quote_currency))
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                anyhow!(
                    "Price response missing {}.{}",
                    self.asset_id,
                    self.quote_currency
                )
            })
    }
}
