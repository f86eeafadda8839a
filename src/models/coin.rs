use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Latest market snapshot of one asset, as listed by the upstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<f64>,
    pub total_volume: f64,
}

/// Listing record exactly as the upstream sends it. Every field may be absent
/// or null, validation happens in `TryFrom`.
#[derive(Deserialize, Debug)]
struct RawCoin {
    id: Option<String>,
    symbol: Option<String>,
    name: Option<String>,
    image: Option<String>,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    market_cap_rank: Option<i64>,
    price_change_percentage_24h: Option<f64>,
    total_volume: Option<f64>,
}

fn required_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(format!("missing {}", field)),
    }
}

fn required_amount(value: Option<f64>, field: &str) -> Result<f64, String> {
    match value {
        Some(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        Some(amount) => Err(format!("invalid {}: {}", field, amount)),
        None => Err(format!("missing {}", field)),
    }
}

impl TryFrom<RawCoin> for Coin {
    type Error = String;

    fn try_from(raw: RawCoin) -> Result<Self, Self::Error> {
        let market_cap_rank = match raw.market_cap_rank {
            Some(rank) if rank >= 1 => Some(
                u32::try_from(rank).map_err(|_| format!("invalid market_cap_rank: {}", rank))?,
            ),
            Some(rank) => return Err(format!("invalid market_cap_rank: {}", rank)),
            None => None,
        };

        let price_change_percentage_24h = match raw.price_change_percentage_24h {
            Some(change) if !change.is_finite() => {
                return Err(format!("invalid price_change_percentage_24h: {}", change))
            }
            other => other,
        };

        Ok(Coin {
            id: required_text(raw.id, "id")?,
            symbol: required_text(raw.symbol, "symbol")?,
            name: required_text(raw.name, "name")?,
            image: raw.image.unwrap_or_default(),
            current_price: required_amount(raw.current_price, "current_price")?,
            market_cap: required_amount(raw.market_cap, "market_cap")?,
            market_cap_rank,
            price_change_percentage_24h,
            total_volume: required_amount(raw.total_volume, "total_volume")?,
        })
    }
}

/// Decodes a listings page. The first invalid record rejects the whole page.
pub fn decode_coins(body: &[u8]) -> Result<Vec<Coin>, FetchError> {
    let raw: Vec<RawCoin> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            Coin::try_from(record).map_err(|reason| {
                FetchError::Decode(format!("record {}: {}", index, reason))
            })
        })
        .collect()
}
