
use crate::models::Coin;

pub fn coin(id: &str, name: &str, symbol: &str, price: f64, market_cap: f64, change: f64) -> Coin {
    Coin {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: format!("https://assets.example/{}.png", id),
        current_price: price,
        market_cap,
        market_cap_rank: Some(1),
        price_change_percentage_24h: Some(change),
        total_volume: market_cap / 20.0,
    }
}

/// `count` distinct coins with ids `{prefix}-0..count`, in market-cap order.
pub fn page_of(prefix: &str, count: usize) -> Vec<Coin> {
    (0..count)
        .map(|i| {
            let id = format!("{}-{}", prefix, i);
            coin(
                &id,
                &format!("Coin {}", id),
                &format!("C{}", i),
                100.0 - i as f64,
                1e9 - i as f64 * 1e6,
                i as f64 - 10.0,
            )
        })
        .collect()
}
