use crate::application::ports::ExchangeGateway;
use okx_helper_core::{
    Candle, CurrencyInfo, InstId, InstType, OrderBook, Result, Ticker, TradingError,
};
use std::sync::Arc;

/// Order book levels returned per side
pub const ORDER_BOOK_DEPTH: usize = 3;
/// Number of candles returned
pub const CANDLE_LIMIT: usize = 10;
/// Candle interval
pub const CANDLE_BAR: &str = "1m";

#[derive(Debug, Clone)]
pub struct MarketDataQuery {
    pub inst_id: String,
}

#[derive(Debug, Clone)]
pub struct MarketDataResult {
    pub inst_id: InstId,
    pub ticker: Ticker,
    pub order_book: OrderBook,
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone)]
pub struct TickersResult {
    pub inst_type: InstType,
    pub tickers: Vec<Ticker>,
}

/// Read-only market queries
pub struct MarketDataUseCase<G>
where
    G: ExchangeGateway,
{
    gateway: Arc<G>,
}

impl<G> MarketDataUseCase<G>
where
    G: ExchangeGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Ticker, shallow order book and recent candles for one instrument.
    /// The three reads run concurrently; the first failure wins.
    pub async fn snapshot(&self, query: MarketDataQuery) -> Result<MarketDataResult> {
        let inst_id = InstId::new(&query.inst_id).map_err(TradingError::validation)?;

        let (ticker, order_book, candles) = tokio::try_join!(
            self.gateway.ticker(&inst_id),
            self.gateway.order_book(&inst_id, ORDER_BOOK_DEPTH),
            self.gateway.candles(&inst_id, CANDLE_BAR, CANDLE_LIMIT),
        )?;

        tracing::debug!(
            inst_id = %inst_id,
            candles = candles.len(),
            spread = ?order_book.spread(),
            "Market data snapshot assembled"
        );

        Ok(MarketDataResult {
            inst_id,
            ticker,
            order_book,
            candles,
        })
    }

    pub async fn tickers(&self, inst_type: &str) -> Result<TickersResult> {
        let inst_type = InstType::try_from(inst_type).map_err(TradingError::validation)?;
        let tickers = self.gateway.tickers(inst_type).await?;
        Ok(TickersResult { inst_type, tickers })
    }

    pub async fn currencies(&self) -> Result<Vec<CurrencyInfo>> {
        self.gateway.currencies().await
    }
}
