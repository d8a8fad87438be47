//! QR image renderer client.
//!
//! Same contract as the price oracle: one call, one happy path, one
//! failure path, no retry. Success is a PNG byte buffer sized for
//! inline display.

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};

use crate::config::Config;

/// Renders an opaque string (a wallet address) as a QR image.
pub trait QrRenderer: Send + Sync {
    fn render(&self, data: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Client for a qrserver-style `create-qr-code` endpoint.
#[derive(Clone)]
pub struct QrServerRenderer {
    http: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

// Inline-display size; Telegram renders 300x300 crisply in chat.
const QR_IMAGE_SIZE: &str = "300x300";

impl QrServerRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.qr_base_url.clone(),
            timeout: config.request_timeout(),
        }
    }
}

impl QrRenderer for QrServerRenderer {
    async fn render(&self, data: &str) -> Result<Vec<u8>> {
        let url = format!("{}/v1/create-qr-code/", self.base_url);
        let mut request = self
            .http
            .get(url)
            .query(&[("size", QR_IMAGE_SIZE), ("data", data)]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|_| anyhow!("QR request failed"))?;

        if !response.status().is_success() {
            bail!("QR request failed with status {}", response.status());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|_| anyhow!("Failed to read QR image bytes"))?;
        Ok(bytes.to_vec())
    }
}
