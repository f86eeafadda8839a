use std::cmp::Ordering;

use crate::{
    models::{Coin, Currency, SortKey},
    utils::{format_change, format_market_cap_in, format_price},
};

/// Number of placeholder cards shown while the first page loads.
pub const PLACEHOLDER_CARDS: usize = 12;

fn matches(coin: &Coin, query: &str) -> bool {
    coin.name.to_lowercase().contains(query) || coin.symbol.to_lowercase().contains(query)
}

fn sort_value(coin: &Coin, sort: SortKey) -> f64 {
    match sort {
        SortKey::Price => coin.current_price,
        SortKey::Change => coin
            .price_change_percentage_24h
            .unwrap_or(f64::NEG_INFINITY),
        SortKey::MarketCap => coin.market_cap,
    }
}

/// Filters by case-insensitive name/symbol match, then sorts descending by
/// `sort`. The sort is stable so ties keep list order.
pub fn derive_view<'a>(coins: &'a [Coin], search: &str, sort: SortKey) -> Vec<&'a Coin> {
    let query = search.to_lowercase();
    let mut view: Vec<&Coin> = if query.is_empty() {
        coins.iter().collect()
    } else {
        coins.iter().filter(|coin| matches(coin, &query)).collect()
    };

    view.sort_by(|a, b| {
        sort_value(b, sort)
            .partial_cmp(&sort_value(a, sort))
            .unwrap_or(Ordering::Equal)
    });
    view
}

/// One rendered coin card.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinCard<'a> {
    pub coin: &'a Coin,
    pub price: String,
    pub change: String,
    pub market_cap: String,
    pub volume: String,
    pub watchlisted: bool,
}

impl<'a> CoinCard<'a> {
    pub fn new(coin: &'a Coin, currency: Currency, watchlisted: bool) -> Self {
        Self {
            coin,
            price: format_price(coin.current_price, currency),
            change: format_change(coin.price_change_percentage_24h),
            market_cap: format_market_cap_in(coin.market_cap, currency),
            volume: format_market_cap_in(coin.total_volume, currency),
            watchlisted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMore {
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView<'a> {
    /// Nothing loaded and the last load failed. Retry runs a refresh.
    Failure,
    Loading { placeholders: usize },
    Empty,
    /// `load_more` is `None` while a search filter is active.
    Coins {
        cards: Vec<CoinCard<'a>>,
        load_more: Option<LoadMore>,
    },
}
