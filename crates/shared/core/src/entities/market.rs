use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 24h ticker. Field names and string-typed numbers follow the exchange so
/// the payload can be passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticker {
    pub inst_type: String,
    pub inst_id: String,
    pub last: String,
    pub last_sz: String,
    pub ask_px: String,
    pub ask_sz: String,
    pub bid_px: String,
    pub bid_sz: String,
    pub open_24h: String,
    pub high_24h: String,
    pub low_24h: String,
    pub vol_ccy_24h: String,
    pub vol_24h: String,
    pub sod_utc0: String,
    pub sod_utc8: String,
    pub ts: String,
}

/// Aggregated order book level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
    /// Number of orders resting at this price
    pub orders: u32,
}

/// Order book snapshot, best levels first on both sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<PriceLevel>,
    pub bids: Vec<PriceLevel>,
    /// Exchange timestamp in milliseconds
    pub ts: i64,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }
}

/// OHLCV candle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time in milliseconds
    pub ts: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Volume in base currency
    pub volume: Decimal,
    /// Volume in quote currency
    pub volume_ccy: Decimal,
    /// False while the candle is still forming
    pub confirmed: bool,
}

/// Currency metadata. Only the commonly used fields are typed; everything
/// else the exchange sends is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub ccy: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub can_dep: bool,
    #[serde(default)]
    pub can_wd: bool,
    #[serde(default)]
    pub min_wd: String,
    #[serde(default)]
    pub min_fee: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
