//! Deterministic sample data served when the backend cannot be reached.
//!
//! Every generator is seeded from a stable hash of the symbol, so the same
//! request always yields the same numbers. Prices follow a small random walk
//! around a per-symbol base price; forecasts are a closed-form log-normal fan
//! rather than a simulation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracker_common::Symbol;
use tracker_common::model::{Forecast, Quote, QuoteMap, Sparkline, State};

/// Number of closes in a sample sparkline (the backend keeps the last 60).
pub const SPARKLINE_LEN: usize = 60;

/// z-score of the 90th percentile of a standard normal.
const Z90: f64 = 1.281_551_565_544_600_4;
const TRADING_DAYS: f64 = 252.0;
const SAMPLE_DRIFT: f64 = 0.06;

/// FNV-1a over the symbol bytes.
fn seed_for(symbol: &Symbol) -> u64 {
    symbol
        .as_str()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

fn rng_for(symbol: &Symbol) -> StdRng {
    StdRng::seed_from_u64(seed_for(symbol))
}

/// Next price of a ±1% random walk, clamped to stay positive.
fn next_price(rng: &mut StdRng, current_price: f64) -> f64 {
    let change: f64 = rng.random_range(-0.01..0.01);
    (current_price * (1.0 + change)).max(0.01)
}

/// Stable per-symbol starting price in `[20, 500)`, rounded to cents.
pub fn base_price(symbol: &Symbol) -> f64 {
    let mut rng = rng_for(symbol);
    let price: f64 = rng.random_range(20.0..500.0);
    (price * 100.0).round() / 100.0
}

fn currency_for(symbol: &Symbol) -> &'static str {
    if symbol.is_london_listing() { "GBP" } else { "USD" }
}

/// Sample watchlist state.
pub fn state() -> State {
    State::default()
}

/// Sample quotes keyed by symbol.
pub fn quotes(symbols: &[Symbol]) -> QuoteMap {
    symbols
        .iter()
        .map(|symbol| {
            let quote = Quote {
                symbol: symbol.to_string(),
                price: Some(base_price(symbol)),
                currency: Some(currency_for(symbol).to_string()),
                short_name: None,
            };
            (symbol.to_string(), quote)
        })
        .collect()
}

/// Sample sparkline that ends at the symbol's base price.
pub fn sparkline(symbol: &Symbol) -> Sparkline {
    let mut rng = rng_for(symbol);
    let mut price = base_price(symbol);
    let mut closes = Vec::with_capacity(SPARKLINE_LEN);
    for _ in 0..SPARKLINE_LEN {
        closes.push(price);
        price = next_price(&mut rng, price);
    }
    closes.reverse();
    Sparkline {
        symbol: symbol.to_string(),
        closes,
    }
}

/// Sample forecast of `days + 1` points starting at the symbol's base price.
///
/// The median compounds a fixed drift; the outer bands sit at ±`Z90`·σ·√t in log
/// space, which keeps `p10 <= p50 <= p90` on every day.
pub fn forecast(symbol: &Symbol, days: u32) -> Forecast {
    let s0 = base_price(symbol);
    let sigma = 0.15 + (seed_for(symbol) % 20) as f64 / 100.0;
    let drift = SAMPLE_DRIFT - 0.5 * sigma * sigma;

    let capacity = days as usize + 1;
    let mut p10 = Vec::with_capacity(capacity);
    let mut p50 = Vec::with_capacity(capacity);
    let mut p90 = Vec::with_capacity(capacity);
    for day in 0..=days {
        let years = f64::from(day) / TRADING_DAYS;
        let median = s0 * (drift * years).exp();
        let spread = Z90 * sigma * years.sqrt();
        p10.push(median * (-spread).exp());
        p50.push(median);
        p90.push(median * spread.exp());
    }

    Forecast {
        symbol: symbol.to_string(),
        mu: SAMPLE_DRIFT,
        sigma,
        s0,
        days,
        p10,
        p50,
        p90,
    }
}
