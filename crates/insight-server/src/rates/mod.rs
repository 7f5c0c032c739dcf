//! Exchange rate sources.

mod ticker;

pub use ticker::{TickerSource, parse_price_usd};
