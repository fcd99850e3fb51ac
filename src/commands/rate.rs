//! Direct shipping-rate lookup command implementation.

use crate::abebooks::models::ShippingRate;
use crate::abebooks::{AbeClient, Parser, RateSource};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Executes a shipping-rate lookup by listing id.
pub struct RateCommand {
    config: Config,
}

impl RateCommand {
    /// Creates a new rate command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the rate for one listing id and returns formatted output.
    pub async fn execute(&self, vid: &str) -> Result<String> {
        let client = AbeClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, vid).await
    }

    /// Fetches the rate with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl RateSource, vid: &str) -> Result<String> {
        let vid = vid.trim();
        if vid.is_empty() || !vid.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Invalid listing id: '{}'. Listing ids are numeric.", vid);
        }

        info!("Looking up shipping rate for listing: {}", vid);

        let parser = Parser::new(client.country());
        let body = client.ship_rates(vid).await?;
        let rate = parser
            .extract_shipping_rate(&body)
            .with_context(|| format!("No rate table in response for listing {}", vid))?;

        let formatter = Formatter::new(self.config.format, client.country());
        Ok(formatter.format_rates(&[ShippingRate::new(vid, rate)]))
    }

    /// Fetches rates for multiple listing ids.
    pub async fn execute_batch(&self, vids: &[String]) -> Result<String> {
        let client = AbeClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_batch_with_client(&client, vids).await
    }

    /// Fetches multiple rates with a provided client (for testing).
    pub async fn execute_batch_with_client(
        &self,
        client: &impl RateSource,
        vids: &[String],
    ) -> Result<String> {
        let parser = Parser::new(client.country());
        let mut rates: Vec<ShippingRate> = Vec::new();

        for vid in vids {
            let vid = vid.trim();
            if vid.is_empty() || !vid.chars().all(|c| c.is_ascii_digit()) {
                eprintln!("Skipping invalid listing id: {}", vid);
                continue;
            }

            info!("Looking up shipping rate for listing: {}", vid);

            match client.ship_rates(vid).await {
                Ok(body) => match parser.extract_shipping_rate(&body) {
                    Some(rate) => rates.push(ShippingRate::new(vid, rate)),
                    None => eprintln!("No rate table for {}", vid),
                },
                Err(e) => eprintln!("Failed to fetch {}: {}", vid, e),
            }
        }

        let formatter = Formatter::new(self.config.format, client.country());
        Ok(formatter.format_rates(&rates))
    }
}
