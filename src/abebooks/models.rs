//! Data models for listings and shipping-rate results.

use serde::{Deserialize, Serialize};

/// One search-result listing discovered on the page.
///
/// Only listings whose rate-link href carries a numeric id are represented;
/// anything else is skipped at discovery time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Numeric listing identifier extracted from the rate-link href.
    pub vid: String,
    /// Item price text as shown on the page (e.g. "US$ 12.34").
    pub price_text: String,
}

impl Listing {
    /// Creates a new listing.
    pub fn new(vid: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self { vid: vid.into(), price_text: price_text.into() }
    }
}

/// Computed shipping-rate outcome for one listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResult {
    /// Raw shipping-rate cell markup, carried verbatim.
    pub rate: String,
    /// Item + shipping total in US dollars, formatted.
    pub total: String,
    /// Total converted to the destination currency, formatted.
    pub converted: String,
}

impl RateResult {
    /// Creates a new rate result.
    pub fn new(
        rate: impl Into<String>,
        total: impl Into<String>,
        converted: impl Into<String>,
    ) -> Self {
        Self { rate: rate.into(), total: total.into(), converted: converted.into() }
    }
}

/// A listing together with its resolved shipping-rate result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentedListing {
    /// The discovered listing.
    pub listing: Listing,
    /// The computed result.
    pub result: RateResult,
}

impl AugmentedListing {
    /// Returns the output block identifier for this listing.
    pub fn block_id(&self) -> String {
        format!("price_{}", self.listing.vid)
    }
}

/// A shipping rate looked up directly for one listing id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRate {
    /// Listing identifier the rate was fetched for.
    pub vid: String,
    /// Raw shipping-rate cell markup.
    pub rate: String,
}

impl ShippingRate {
    /// Creates a new shipping rate.
    pub fn new(vid: impl Into<String>, rate: impl Into<String>) -> Self {
        Self { vid: vid.into(), rate: rate.into() }
    }
}

/// Listings discovered on one search-results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageListings {
    /// Search query used.
    pub query: String,
    /// Destination country code.
    pub country: String,
    /// Listings with a matching rate link.
    pub listings: Vec<Listing>,
    /// Containers skipped for lack of a matching rate link.
    pub skipped: usize,
}

impl PageListings {
    /// Creates an empty page result.
    pub fn new(query: impl Into<String>, country: impl Into<String>) -> Self {
        Self { query: query.into(), country: country.into(), listings: Vec::new(), skipped: 0 }
    }

    /// Returns the number of matching listings.
    pub fn count(&self) -> usize {
        self.listings.len()
    }

    /// Returns true if no matching listings were found.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
