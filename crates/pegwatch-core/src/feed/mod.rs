//! Price feed clients
//!
//! One-shot quote retrieval for the monitored asset from off-chain price
//! APIs. The only implementation talks to the CoinGecko simple-price
//! endpoint.

mod coingecko;

pub use coingecko::{FetchError, PriceFeed};
