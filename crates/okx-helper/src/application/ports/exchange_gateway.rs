use async_trait::async_trait;
use okx_helper_core::{
    BalanceSnapshot, Candle, CurrencyInfo, InstId, InstType, MarketOrder, OrderBook, OrderResult,
    Result, Ticker,
};
use serde::Serialize;

/// Which credential parts are present. Never carries the values themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub api_key_configured: bool,
    pub api_secret_configured: bool,
    pub passphrase_configured: bool,
}

impl CredentialStatus {
    pub fn is_complete(&self) -> bool {
        self.api_key_configured && self.api_secret_configured && self.passphrase_configured
    }
}

/// Exchange access used by every use case
///
/// One method is one HTTP call to the exchange; implementations do not retry.
/// Signed operations must fail with a configuration error before touching the
/// network when credentials are incomplete.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// 24h ticker for a single instrument
    async fn ticker(&self, inst_id: &InstId) -> Result<Ticker>;

    /// Tickers for every instrument of a family
    async fn tickers(&self, inst_type: InstType) -> Result<Vec<Ticker>>;

    /// Order book limited to `depth` levels per side
    async fn order_book(&self, inst_id: &InstId, depth: usize) -> Result<OrderBook>;

    /// Most recent candles, newest first
    async fn candles(&self, inst_id: &InstId, bar: &str, limit: usize) -> Result<Vec<Candle>>;

    /// Exchange clock in milliseconds
    async fn server_time(&self) -> Result<i64>;

    /// Available balances; an empty filter returns every currency
    async fn balances(&self, currencies: &[&str]) -> Result<BalanceSnapshot>;

    /// Currency metadata (signed)
    async fn currencies(&self) -> Result<Vec<CurrencyInfo>>;

    /// Place a spot market order (signed)
    async fn place_market_order(&self, order: &MarketOrder) -> Result<OrderResult>;

    fn credential_status(&self) -> CredentialStatus;
}
