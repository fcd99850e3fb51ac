//! HTTP client for AbeBooks requests using wreq for TLS fingerprint emulation.

use crate::abebooks::countries::Country;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for search-page and ShipRates fetching - enables mocking for tests.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches a search-results page for the given query.
    async fn search(&self, query: &str) -> Result<String>;

    /// Fetches the shipping-rate fragment for one listing id.
    async fn ship_rates(&self, vid: &str) -> Result<String>;

    /// Returns the configured destination country.
    fn country(&self) -> Country;
}

/// AbeBooks HTTP client with browser impersonation.
pub struct AbeClient {
    client: Client,
    country: Country,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: Option<String>,
}

impl AbeClient {
    /// Creates a new client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            country: config.country,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url,
        })
    }

    /// Returns the base URL (custom for testing, or the production site).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| "https://www.abebooks.com".to_string())
    }

    /// Builds the ShipRates URL for one listing id.
    pub fn ship_rates_url(&self, vid: &str) -> String {
        format!("{}/servlet/ShipRates?vid={}&cntry={}", self.base_url(), vid, self.country.code())
    }

    /// Builds the search-results URL for a query.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/servlet/SearchResults?kn={}", self.base_url(), urlencoding::encode(query))
    }

    /// Performs a GET request with browser-emulation headers.
    async fn get(&self, url: &str) -> Result<String> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider using a proxy or increasing delay.");
            anyhow::bail!("Rate limited by AbeBooks. Try increasing --delay or using a proxy.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Adds the configured inter-request delay, if any.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl RateSource for AbeClient {
    async fn search(&self, query: &str) -> Result<String> {
        let url = self.search_url(query);

        info!("Searching: {}", query);
        self.get(&url).await
    }

    async fn ship_rates(&self, vid: &str) -> Result<String> {
        let url = self.ship_rates_url(vid);

        debug!("Fetching shipping rates for listing {}", vid);
        self.get(&url).await
    }

    fn country(&self) -> Country {
        self.country
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config {
            country: Country::Hrv,
            proxy: None,
            delay_ms: 0,
            delay_jitter_ms: 0,
            max_listings: None,
            conversion_rate: None,
            format: crate::config::OutputFormat::Table,
        }
    }

    #[test]
    fn test_url_encoding() {
        let query = "charles dickens";
        let encoded = urlencoding::encode(query);
        assert_eq!(encoded, "charles%20dickens");
    }

    #[tokio::test]
    async fn test_ship_rates_url_shape() {
        let config = make_test_config();
        let client =
            AbeClient::with_base_url(&config, Some("http://test.local".to_string())).await.unwrap();

        assert_eq!(
            client.ship_rates_url("12345"),
            "http://test.local/servlet/ShipRates?vid=12345&cntry=HRV"
        );
    }

    #[tokio::test]
    async fn test_ship_rates_url_other_country() {
        let mut config = make_test_config();
        config.country = Country::Pol;

        let client =
            AbeClient::with_base_url(&config, Some("http://test.local".to_string())).await.unwrap();

        assert!(client.ship_rates_url("9").ends_with("/servlet/ShipRates?vid=9&cntry=POL"));
    }

    #[tokio::test]
    async fn test_search_url_shape() {
        let config = make_test_config();
        let client =
            AbeClient::with_base_url(&config, Some("http://test.local".to_string())).await.unwrap();

        assert_eq!(
            client.search_url("charles dickens"),
            "http://test.local/servlet/SearchResults?kn=charles%20dickens"
        );
    }

    #[tokio::test]
    async fn test_search_success() {
        let mock_server = MockServer::start().await;

        let html = r#"
            <html><body>
                <div class="result-pricing">
                    <div class="item-price"><span class="price">US$ 10.00</span></div>
                    <p class="m-sm-t"><a class="small" href="/servlet/ShipRates?vid=42&cntry=HRV">rates</a></p>
                </div>
            </body></html>
        "#;

        Mock::given(method("GET"))
            .and(path("/servlet/SearchResults"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client = AbeClient::with_base_url(&config, Some(mock_server.uri())).await.unwrap();

        let result = client.search("dickens").await;
        assert!(result.is_ok());
        let body = result.unwrap();
        assert!(body.contains("US$ 10.00"));
        assert!(body.contains("vid=42"));
    }

    #[tokio::test]
    async fn test_ship_rates_success() {
        let mock_server = MockServer::start().await;

        let html = r#"
            <table class="data">
                <tr><th>Speed</th><th>Rate</th></tr>
                <tr><td>Standard</td><td>US$ 2.50</td></tr>
            </table>
        "#;

        Mock::given(method("GET"))
            .and(path("/servlet/ShipRates"))
            .and(query_param("vid", "12345"))
            .and(query_param("cntry", "HRV"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client = AbeClient::with_base_url(&config, Some(mock_server.uri())).await.unwrap();

        let result = client.ship_rates("12345").await;
        assert!(result.is_ok());
        assert!(result.unwrap().contains("US$ 2.50"));
    }

    #[tokio::test]
    async fn test_rate_limited_503() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/servlet/SearchResults"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client = AbeClient::with_base_url(&config, Some(mock_server.uri())).await.unwrap();

        let result = client.search("test").await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Rate limited"));
    }

    #[tokio::test]
    async fn test_http_error_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/servlet/ShipRates"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client = AbeClient::with_base_url(&config, Some(mock_server.uri())).await.unwrap();

        let result = client.ship_rates("999").await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("404"));
    }

    #[tokio::test]
    async fn test_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/servlet/SearchResults"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let config = make_test_config();
        let client = AbeClient::with_base_url(&config, Some(mock_server.uri())).await.unwrap();

        let result = client.search("test").await;
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_country_returned() {
        let config = make_test_config();
        let client = AbeClient::with_base_url(&config, Some("http://localhost".to_string()))
            .await
            .unwrap();

        assert_eq!(client.country(), Country::Hrv);
    }

    #[tokio::test]
    async fn test_base_url_default() {
        let config = make_test_config();
        let client = AbeClient::new(&config).await.unwrap();

        assert_eq!(client.base_url(), "https://www.abebooks.com");
        assert_eq!(
            client.ship_rates_url("12345"),
            "https://www.abebooks.com/servlet/ShipRates?vid=12345&cntry=HRV"
        );
    }
}
