//! AbeBooks-specific modules for HTTP client, parsing, and data models.

pub mod client;
pub mod countries;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{AbeClient, RateSource};
pub use countries::Country;
pub use models::{AugmentedListing, Listing, PageListings, RateResult, ShippingRate};
pub use parser::Parser;
