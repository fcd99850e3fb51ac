//! Output formatting for augmented listings (table, JSON, HTML fragments).

use crate::abebooks::countries::Country;
use crate::abebooks::models::{AugmentedListing, ShippingRate};
use crate::config::OutputFormat;

/// Formats augmented listings and rate lookups for output.
pub struct Formatter {
    format: OutputFormat,
    country: Country,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, country: Country) -> Self {
        Self { format, country }
    }

    /// Formats a batch of augmented listings.
    pub fn format_augmented(&self, listings: &[AugmentedListing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Html => String::new(),
                OutputFormat::Table => "No listings augmented.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_augmented(listings),
            OutputFormat::Table => self.table_augmented(listings),
            OutputFormat::Html => self.html_augmented(listings),
        }
    }

    /// Formats a single augmented listing as a two-line block.
    pub fn format_augmented_single(&self, listing: &AugmentedListing) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(listing).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Html => self.html_block(listing),
            OutputFormat::Table => format!(
                "Listing: {}\n{} rate: {}\nTotal:   US$ {} ({}{})",
                listing.listing.vid,
                self.country.display_name(),
                listing.result.rate,
                listing.result.total,
                listing.result.converted,
                self.country.currency_label()
            ),
        }
    }

    /// Formats direct rate lookups.
    pub fn format_rates(&self, rates: &[ShippingRate]) -> String {
        if rates.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Html => String::new(),
                OutputFormat::Table => "No rates found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(rates).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_rates(rates),
            OutputFormat::Html => rates
                .iter()
                .map(|r| {
                    format!(
                        "<b>{} rate:</b> <span class=price>{}</span>",
                        self.country.display_name(),
                        r.rate
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    // JSON formatting

    fn json_augmented(&self, listings: &[AugmentedListing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_augmented(&self, listings: &[AugmentedListing]) -> String {
        let vid_width = 10;
        let price_width = 12;
        let rate_width = 14;
        let total_width = 12;

        let local_header = format!("Total ({})", self.country.currency_label());

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<vid_width$}  {:<price_width$}  {:<rate_width$}  {:<total_width$}  {}",
            "Listing", "Item", "Shipping", "Total (US$)", local_header
        ));
        lines.push(format!(
            "{:-<vid_width$}  {:-<price_width$}  {:-<rate_width$}  {:-<total_width$}  {:-<12}",
            "", "", "", "", ""
        ));

        for entry in listings {
            lines.push(format!(
                "{:<vid_width$}  {:<price_width$}  {:<rate_width$}  {:>total_width$}  {}",
                entry.listing.vid,
                entry.listing.price_text,
                entry.result.rate,
                entry.result.total,
                entry.result.converted
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} listings", listings.len()));

        lines.join("\n")
    }

    fn table_rates(&self, rates: &[ShippingRate]) -> String {
        let vid_width = 10;

        let mut lines = Vec::new();
        lines.push(format!("{:<vid_width$}  {}", "Listing", "Rate"));
        lines.push(format!("{:-<vid_width$}  {:-<14}", "", ""));

        for rate in rates {
            lines.push(format!("{:<vid_width$}  {}", rate.vid, rate.rate));
        }

        lines.join("\n")
    }

    // HTML formatting

    /// Renders the exact injection fragments the page augmenter appends.
    ///
    /// Rendering the same listings twice yields duplicate `price_<vid>`
    /// blocks; the output is append-only by contract.
    fn html_augmented(&self, listings: &[AugmentedListing]) -> String {
        listings.iter().map(|l| self.html_block(l)).collect::<Vec<_>>().join("\n")
    }

    fn html_block(&self, entry: &AugmentedListing) -> String {
        format!(
            "<div id=\"{}\" style=\"padding-top:5px\"><b>{} rate:</b> <span class=price>{}</span><br><b>Total:</b> <span class=price>US$ {} ({}{})</span></div>",
            entry.block_id(),
            self.country.display_name(),
            entry.result.rate,
            entry.result.total,
            entry.result.converted,
            self.country.currency_label()
        )
    }
}
