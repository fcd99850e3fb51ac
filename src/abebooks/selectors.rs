//! CSS selectors for AbeBooks HTML parsing.
//!
//! This file contains all CSS selectors used for parsing AbeBooks pages.
//! Update this file when AbeBooks changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search results pages.
pub mod search {
    use super::*;

    /// Listing pricing container - one per search result.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.result-pricing").unwrap());

    /// Shipping-rate link inside a listing container.
    pub static RATE_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("p.m-sm-t a.small").unwrap());

    /// Item price inside a listing container.
    pub static ITEM_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.item-price span.price").unwrap());
}

/// Selectors for ShipRates response fragments.
pub mod shiprates {
    use super::*;

    /// Rate table in the fragment.
    pub static DATA_TABLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("table.data").unwrap());

    /// Table rows.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Row cells.
    pub static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
}
