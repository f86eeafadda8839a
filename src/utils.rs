pub mod coingecko;

use std::num::ParseIntError;

use crate::models::Currency;

const TRILLION: f64 = 1e12;
const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const TIERS: [(f64, &str); 3] = [(MILLION, "M"), (BILLION, "B"), (TRILLION, "T")];

pub fn parse_u32(input: &str) -> Result<u32, ParseIntError> {
    input.trim().parse::<u32>()
}

/// Inserts `,` every three digits of the integer part of an already
/// formatted decimal number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

// Currencies without a table symbol are prefixed with their upper-case code.
fn currency_prefix(currency: Currency) -> String {
    match currency.symbol() {
        Some(symbol) => symbol.to_string(),
        None => format!("{} ", currency.as_str().to_ascii_uppercase()),
    }
}

/// `$1,234.50` at or above one unit, `$0.004210` below it.
pub fn format_price(price: f64, currency: Currency) -> String {
    let prefix = currency_prefix(currency);
    if price >= 1.0 {
        format!("{}{}", prefix, group_thousands(&format!("{:.2}", price)))
    } else {
        format!("{}{:.6}", prefix, price)
    }
}

/// Market cap in dollars, abbreviated to T/B/M above one million.
pub fn format_market_cap(value: f64) -> String {
    format_market_cap_in(value, Currency::Usd)
}

pub fn format_market_cap_in(value: f64, currency: Currency) -> String {
    let prefix = currency_prefix(currency);

    // Tiers are chosen on the rounded figure, so 999,999.7 reads 1.00M.
    let whole = format!("{:.0}", value);
    if whole.parse::<f64>().map_or(false, |whole| whole < MILLION) {
        return format!("{}{}", prefix, group_thousands(&whole));
    }

    let mut tier = TIERS
        .iter()
        .rposition(|(size, _)| value >= *size)
        .unwrap_or(0);
    let mut scaled = format!("{:.2}", value / TIERS[tier].0);
    while tier + 1 < TIERS.len() && scaled.parse::<f64>().map_or(false, |s| s >= 1000.0) {
        tier += 1;
        scaled = format!("{:.2}", value / TIERS[tier].0);
    }

    format!("{}{}{}", prefix, scaled, TIERS[tier].1)
}

/// Signed 24h change, e.g. `+2.31%`.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(change) if change >= 0.0 => format!("+{:.2}%", change.abs()),
        Some(change) => format!("{:.2}%", change),
        None => "n/a".to_string(),
    }
}
