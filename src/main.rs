//! abe-shiprates - Shipping-rate augmenter for AbeBooks search results
//!
//! A Rust implementation with TLS fingerprint emulation for reliable scraping.

use abe_shiprates::abebooks::countries::Country;
use abe_shiprates::commands::{AugmentCommand, RateCommand};
use abe_shiprates::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "abe-shiprates",
    version,
    about = "Shipping-rate augmenter for AbeBooks search results",
    long_about = "Scans an AbeBooks search-results page, fetches per-listing shipping rates for a destination country, and renders item + shipping totals with a fixed currency conversion."
)]
struct Cli {
    /// Destination country for shipping rates
    #[arg(short, long, default_value = "hrv", global = true)]
    country: Country,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "ABE_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, default_value = "0", global = true, env = "ABE_DELAY")]
    delay: u64,

    /// Override the country's fixed conversion factor
    #[arg(long, global = true)]
    conversion_rate: Option<f64>,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Augment search results with shipping rates and totals
    #[command(alias = "a")]
    Augment {
        /// Search query
        query: String,

        /// Maximum number of listings to augment
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Look up the shipping rate for listing id(s)
    #[command(alias = "r")]
    Rate {
        /// Listing id(s) to look up
        #[arg(required = true)]
        vids: Vec<String>,
    },

    /// List supported destination countries
    Countries,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.country = cli.country;
    config.format = cli.format;
    config.delay_ms = cli.delay;

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(rate) = cli.conversion_rate {
        config.conversion_rate = Some(rate);
    }

    match cli.command {
        Commands::Augment { query, max } => {
            if let Some(max) = max {
                config.max_listings = Some(max);
            }

            let cmd = AugmentCommand::new(config);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Rate { vids } => {
            let cmd = RateCommand::new(config);

            let output = if vids.len() == 1 {
                cmd.execute(&vids[0]).await?
            } else {
                cmd.execute_batch(&vids).await?
            };

            println!("{}", output);
        }

        Commands::Countries => {
            println!("Supported destination countries:\n");
            println!("{:<6} {:<26} {:<10} {:<10}", "Code", "Country", "Currency", "USD rate");
            println!("{:-<6} {:-<26} {:-<10} {:-<10}", "", "", "", "");

            for country in Country::all() {
                println!(
                    "{:<6} {:<26} {:<10} {:<10}",
                    country.to_string(),
                    country.display_name(),
                    country.currency_label(),
                    country.conversion_factor()
                );
            }
        }
    }

    Ok(())
}
