use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod coin;

pub use coin::{decode_coins, Coin};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
    ];

    /// Lowercase code, as the upstream expects it in `vs_currency`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
            Currency::Jpy => "jpy",
            Currency::Cad => "cad",
        }
    }

    /// Display symbol. Only usd, eur and gbp are in the table.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Currency::Usd => Some("$"),
            Currency::Eur => Some("€"),
            Currency::Gbp => Some("£"),
            Currency::Jpy | Currency::Cad => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.as_str() == code)
            .ok_or_else(|| format!("Unsupported currency: {}", s))
    }
}

/// Ordering applied to the derived view. Always descending.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    MarketCap,
    Price,
    Change,
}

impl SortKey {
    /// Unrecognised keys fall back to market cap.
    pub fn parse_or_default(input: &str) -> Self {
        match input.trim() {
            "price" => SortKey::Price,
            "change" => SortKey::Change,
            _ => SortKey::MarketCap,
        }
    }
}
