//! abe-shiprates - Shipping-rate augmenter for AbeBooks search results
//!
//! Scans a search-results page, fetches per-listing shipping rates, and
//! renders item + shipping totals with a fixed currency conversion.

pub mod abebooks;
pub mod commands;
pub mod config;
pub mod format;
pub mod pricing;

pub use abebooks::countries::Country;
pub use abebooks::models::{AugmentedListing, Listing, PageListings, RateResult, ShippingRate};
pub use config::Config;
