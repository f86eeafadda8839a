use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{
    config::Settings,
    error::{ConfigError, FetchError},
    fetcher::CoinSource,
    models::{decode_coins, Coin, Currency},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingKey {
    pub currency: Currency,
    pub page: u32,
    pub per_page: u32,
}

/// Decoded listing pages kept for a fixed freshness window. A zero TTL
/// disables caching.
pub struct ListingCache {
    ttl: Duration,
    pages: HashMap<ListingKey, (Instant, Vec<Coin>)>,
}

impl ListingCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pages: HashMap::new(),
        }
    }

    pub fn get(&self, key: &ListingKey, now: Instant) -> Option<Vec<Coin>> {
        let (stored_at, coins) = self.pages.get(key)?;
        if now.saturating_duration_since(*stored_at) < self.ttl {
            Some(coins.clone())
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: ListingKey, coins: Vec<Coin>, now: Instant) {
        if self.ttl.is_zero() {
            return;
        }
        let ttl = self.ttl;
        self.pages
            .retain(|_, (stored_at, _)| now.saturating_duration_since(*stored_at) < ttl);
        self.pages.insert(key, (now, coins));
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

pub struct CoinGecko {
    client: Client,
    base_url: String,
    cache: RwLock<ListingCache>,
}

impl CoinGecko {
    pub fn init(settings: &Settings) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &settings.coingecko_api_key {
            let value = HeaderValue::from_str(api_key).map_err(|_| ConfigError::Invalid {
                key: "COINGECKO_API_KEY",
                value: api_key.clone(),
            })?;
            headers.insert("x-cg-demo-api-key", value);
        }
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.coingecko_base_url.clone(),
            cache: RwLock::new(ListingCache::new(settings.cache_ttl)),
        })
    }

    pub fn listings_url(&self, key: &ListingKey) -> String {
        listings_url(&self.base_url, key)
    }

    async fn request_listings(&self, key: &ListingKey) -> Result<Vec<Coin>, FetchError> {
        let url = self.listings_url(key);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Listings request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode_coins(&body)
    }
}

/// Market-cap ordered listings, without sparkline, with the 24h change.
pub fn listings_url(base_url: &str, key: &ListingKey) -> String {
    format!(
        "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}&sparkline=false&price_change_percentage=24h",
        base_url, key.currency, key.per_page, key.page
    )
}

#[async_trait]
impl CoinSource for CoinGecko {
    async fn fetch_coins(
        &self,
        currency: Currency,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Coin>, FetchError> {
        let key = ListingKey {
            currency,
            page,
            per_page,
        };

        if let Some(coins) = self.cache.read().await.get(&key, Instant::now()) {
            debug!(%currency, page, "Serving listings from cache");
            return Ok(coins);
        }

        let coins = self.request_listings(&key).await?;
        self.cache
            .write()
            .await
            .insert(key, coins.clone(), Instant::now());

        Ok(coins)
    }
}
