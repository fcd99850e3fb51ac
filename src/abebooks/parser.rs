//! HTML parser for search-results pages and ShipRates fragments.

use crate::abebooks::countries::Country;
use crate::abebooks::models::{Listing, PageListings};
use crate::abebooks::selectors::{search, shiprates};
use regex_lite::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Listing id embedded in the rate-link href.
static RATE_LINK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ShipRates.*vid=(\d+)").unwrap());

/// Parser for AbeBooks HTML.
pub struct Parser {
    country: Country,
}

impl Parser {
    /// Creates a new parser for the given destination country.
    pub fn new(country: Country) -> Self {
        Self { country }
    }

    /// Scans a search-results page for listings with a shipping-rate link.
    ///
    /// Containers without a matching link are counted and skipped silently;
    /// there is no error path at discovery time.
    pub fn parse_search_page(&self, html: &str, query: &str) -> PageListings {
        let document = Html::parse_document(html);
        let mut page = PageListings::new(query, self.country.code());

        for container in document.select(&search::RESULT) {
            match self.parse_listing(container) {
                Some(listing) => {
                    trace!("Discovered listing {} ({})", listing.vid, listing.price_text);
                    page.listings.push(listing);
                }
                None => {
                    trace!("Skipping container without a matching rate link");
                    page.skipped += 1;
                }
            }
        }

        debug!(
            "Discovered {} listings on page ({} skipped)",
            page.listings.len(),
            page.skipped
        );

        page
    }

    /// Parses one listing container into a Listing, or None to skip it.
    fn parse_listing(&self, container: ElementRef) -> Option<Listing> {
        let href = container.select(&search::RATE_LINK).next()?.value().attr("href")?;

        let vid = RATE_LINK_ID.captures(href)?.get(1)?.as_str().to_string();

        // Price markup is carried as-is; unparseable text degrades later
        // through the formatting fallback rather than failing here.
        let price_text = container
            .select(&search::ITEM_PRICE)
            .next()
            .map(|e| e.inner_html().trim().to_string())
            .unwrap_or_default();

        Some(Listing::new(vid, price_text))
    }

    /// Extracts the shipping-rate cell from a ShipRates fragment.
    ///
    /// Returns the inner markup of the second row's second cell of
    /// `table.data`, verbatim. Absent structure yields None.
    pub fn extract_shipping_rate(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        let table = document.select(&shiprates::DATA_TABLE).next()?;
        let row = table.select(&shiprates::ROW).nth(1)?;
        let cell = row.select(&shiprates::CELL).nth(1)?;

        Some(cell.inner_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_listing_html(entries: &[(&str, &str)]) -> String {
        let mut html = String::from("<html><body>");
        for (vid, price) in entries {
            html.push_str(&format!(
                r#"<div class="result-pricing">
                    <div class="item-price"><span class="price">{}</span></div>
                    <p class="m-sm-t"><a class="small" href="/servlet/ShipRates?vid={}&cntry=HRV">See shipping rates</a></p>
                </div>"#,
                price, vid
            ));
        }
        html.push_str("</body></html>");
        html
    }

    #[test]
    fn test_parse_search_page() {
        let parser = Parser::new(Country::Hrv);
        let html = make_listing_html(&[("12345", "US$ 10.00"), ("67890", "US$ 3.25")]);

        let page = parser.parse_search_page(&html, "dickens");
        assert_eq!(page.count(), 2);
        assert_eq!(page.skipped, 0);
        assert_eq!(page.country, "HRV");

        assert_eq!(page.listings[0].vid, "12345");
        assert_eq!(page.listings[0].price_text, "US$ 10.00");
        assert_eq!(page.listings[1].vid, "67890");
    }

    #[test]
    fn test_parse_search_page_empty() {
        let parser = Parser::new(Country::Hrv);
        let page = parser.parse_search_page("<html><body></body></html>", "dickens");
        assert!(page.is_empty());
        assert_eq!(page.skipped, 0);
    }

    #[test]
    fn test_parse_search_page_skips_non_matching_links() {
        let parser = Parser::new(Country::Hrv);
        let html = r#"<html><body>
            <div class="result-pricing">
                <div class="item-price"><span class="price">US$ 10.00</span></div>
                <p class="m-sm-t"><a class="small" href="/servlet/BookDetails?bi=555">Details</a></p>
            </div>
            <div class="result-pricing">
                <div class="item-price"><span class="price">US$ 4.00</span></div>
                <p class="m-sm-t"><a class="small" href="/servlet/ShipRates?vid=777&cntry=HRV">Rates</a></p>
            </div>
        </body></html>"#;

        let page = parser.parse_search_page(html, "test");
        assert_eq!(page.count(), 1);
        assert_eq!(page.skipped, 1);
        assert_eq!(page.listings[0].vid, "777");
    }

    #[test]
    fn test_parse_search_page_skips_missing_link() {
        let parser = Parser::new(Country::Hrv);
        let html = r#"<html><body>
            <div class="result-pricing">
                <div class="item-price"><span class="price">US$ 10.00</span></div>
            </div>
        </body></html>"#;

        let page = parser.parse_search_page(html, "test");
        assert!(page.is_empty());
        assert_eq!(page.skipped, 1);
    }

    #[test]
    fn test_parse_search_page_missing_price_is_empty() {
        let parser = Parser::new(Country::Hrv);
        let html = r#"<html><body>
            <div class="result-pricing">
                <p class="m-sm-t"><a class="small" href="/servlet/ShipRates?vid=42&cntry=HRV">Rates</a></p>
            </div>
        </body></html>"#;

        let page = parser.parse_search_page(html, "test");
        assert_eq!(page.count(), 1);
        assert_eq!(page.listings[0].price_text, "");
    }

    #[test]
    fn test_rate_link_id_capture() {
        let caps = RATE_LINK_ID.captures("/servlet/ShipRates?vid=12345&cntry=HRV").unwrap();
        assert_eq!(&caps[1], "12345");

        assert!(RATE_LINK_ID.captures("/servlet/BookDetails?bi=12345").is_none());
        assert!(RATE_LINK_ID.captures("/servlet/ShipRates?cntry=HRV").is_none());
    }

    #[test]
    fn test_extract_shipping_rate() {
        let parser = Parser::new(Country::Hrv);
        let html = r#"<html><body>
            <table class="data">
                <tr><th>Speed</th><th>Rate</th></tr>
                <tr><td>Standard</td><td>US$ 2.50</td></tr>
                <tr><td>Express</td><td>US$ 9.00</td></tr>
            </table>
        </body></html>"#;

        assert_eq!(parser.extract_shipping_rate(html), Some("US$ 2.50".to_string()));
    }

    #[test]
    fn test_extract_shipping_rate_keeps_markup() {
        let parser = Parser::new(Country::Hrv);
        let html = r#"<table class="data">
            <tr><td>a</td><td>b</td></tr>
            <tr><td>Standard</td><td><b>US$ 2.50</b></td></tr>
        </table>"#;

        // Cell markup comes back verbatim, not flattened to text.
        assert_eq!(parser.extract_shipping_rate(html), Some("<b>US$ 2.50</b>".to_string()));
    }

    #[test]
    fn test_extract_shipping_rate_missing_structure() {
        let parser = Parser::new(Country::Hrv);

        // No table at all
        assert!(parser.extract_shipping_rate("<html><body></body></html>").is_none());

        // Wrong table class
        assert!(parser
            .extract_shipping_rate(r#"<table class="other"><tr><td>x</td></tr></table>"#)
            .is_none());

        // Only one row
        assert!(parser
            .extract_shipping_rate(r#"<table class="data"><tr><td>x</td><td>y</td></tr></table>"#)
            .is_none());

        // Second row has only one cell
        assert!(parser
            .extract_shipping_rate(
                r#"<table class="data"><tr><td>a</td><td>b</td></tr><tr><td>only</td></tr></table>"#
            )
            .is_none());
    }

    #[test]
    fn test_parser_new() {
        let parser = Parser::new(Country::Srb);
        assert_eq!(parser.country, Country::Srb);
    }
}
