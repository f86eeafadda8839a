use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::error::FetchError;
use crate::models::{decode_coins, Coin, Currency};

/// Listings page size used by the proxy route and the dashboard.
pub const PAGE_SIZE: u32 = 50;

/// Anything that can produce a page of market listings.
#[async_trait]
pub trait CoinSource: Send + Sync {
    /// `page` is 1-based. Results are ordered by market cap, descending.
    async fn fetch_coins(
        &self,
        currency: Currency,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Coin>, FetchError>;
}

/// Reads listings through this service's own `/api/coins` route. The route
/// fixes the page size, so `per_page` is not forwarded.
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn coins_url(&self, currency: Currency, page: u32) -> String {
        format!(
            "{}/api/coins?currency={}&page={}",
            self.base_url, currency, page
        )
    }
}

#[async_trait]
impl CoinSource for ProxyClient {
    async fn fetch_coins(
        &self,
        currency: Currency,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<Coin>, FetchError> {
        let url = self.coins_url(currency, page);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Proxy returned non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode_coins(&body)
    }
}
