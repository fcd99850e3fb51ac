//! Search-page augmentation command implementation.

use crate::abebooks::models::{AugmentedListing, RateResult};
use crate::abebooks::{AbeClient, Parser, RateSource};
use crate::config::Config;
use crate::format::Formatter;
use crate::pricing;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Executes the search-page augmentation.
pub struct AugmentCommand {
    config: Config,
}

impl AugmentCommand {
    /// Creates a new augment command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the augmentation and returns formatted output.
    pub async fn execute(&self, query: &str) -> Result<String> {
        let client = AbeClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(Arc::new(client), query).await
    }

    /// Executes the augmentation with a provided client (for testing).
    ///
    /// The client is shared behind an Arc because each listing's rate fetch
    /// runs as its own task.
    pub async fn execute_with_client(
        &self,
        client: Arc<dyn RateSource>,
        query: &str,
    ) -> Result<String> {
        info!("Augmenting search results for: {}", query);

        let country = client.country();
        let parser = Parser::new(country);
        let factor = self.config.effective_conversion_rate();

        let html = client.search(query).await?;
        let mut page = parser.parse_search_page(&html, query);

        if let Some(max) = self.config.max_listings {
            page.listings.truncate(max);
        }

        debug!("Fetching rates for {} listings ({} skipped)", page.count(), page.skipped);

        // One independent fetch task per listing. Completions arrive in
        // arbitrary order; results are reassembled by discovery index.
        let mut set = JoinSet::new();
        for (idx, listing) in page.listings.iter().enumerate() {
            let client = Arc::clone(&client);
            let listing = listing.clone();

            set.spawn(async move {
                match client.ship_rates(&listing.vid).await {
                    Ok(body) => Some((idx, listing, body)),
                    Err(e) => {
                        // Failed fetches leave the listing unaugmented.
                        debug!("Rate fetch failed for listing {}: {}", listing.vid, e);
                        None
                    }
                }
            });
        }

        let mut slots: Vec<Option<AugmentedListing>> = vec![None; page.count()];

        while let Some(joined) = set.join_next().await {
            let Ok(Some((idx, listing, body))) = joined else {
                continue;
            };

            // A missing rate table degrades through the formatting fallback.
            let rate = parser.extract_shipping_rate(&body).unwrap_or_default();
            let total = pricing::total_price(&listing.price_text, &rate);
            let converted = pricing::convert_total(&total, factor);

            slots[idx] = Some(AugmentedListing {
                listing,
                result: RateResult::new(rate, total, converted),
            });
        }

        let augmented: Vec<AugmentedListing> = slots.into_iter().flatten().collect();

        info!("Augmented {} of {} listings", augmented.len(), page.count());

        let formatter = Formatter::new(self.config.format, country);
        Ok(formatter.format_augmented(&augmented))
    }
}
