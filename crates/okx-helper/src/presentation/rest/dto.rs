use okx_helper_core::{
    BalanceSnapshot, Candle, CurrencyInfo, OrderBook, OrderResult, Ticker, WaitMinutes,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::{
    BuyCommand, BuyResult, MarketDataQuery, MarketDataResult, SellCommand, SellResult,
    TickersResult, TradeStrategyCommand, TradeStrategyResult,
};

const DEFAULT_INST_ID: &str = "BTC-USDT";
const DEFAULT_BUY_AMOUNT: Decimal = Decimal::TEN;

fn default_inst_id() -> String {
    DEFAULT_INST_ID.to_string()
}

// ============================================================================
// Requests (JSON body for POST, query string for GET; every field optional)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeRequest {
    pub wait_minutes: i64,
    /// Quote currency to spend
    pub buy_amount: Decimal,
    pub inst_id: String,
}

impl Default for TradeRequest {
    fn default() -> Self {
        TradeRequest {
            wait_minutes: WaitMinutes::DEFAULT as i64,
            buy_amount: DEFAULT_BUY_AMOUNT,
            inst_id: default_inst_id(),
        }
    }
}

impl From<TradeRequest> for TradeStrategyCommand {
    fn from(req: TradeRequest) -> Self {
        TradeStrategyCommand {
            inst_id: req.inst_id,
            wait_minutes: req.wait_minutes,
            buy_amount: req.buy_amount,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuyRequest {
    pub buy_amount: Decimal,
    pub inst_id: String,
    /// Attach a take-profit this many percent above the last price
    pub take_profit_percent: Option<Decimal>,
    /// Attach a stop-loss this many percent below the last price
    pub stop_loss_percent: Option<Decimal>,
}

impl Default for BuyRequest {
    fn default() -> Self {
        BuyRequest {
            buy_amount: DEFAULT_BUY_AMOUNT,
            inst_id: default_inst_id(),
            take_profit_percent: None,
            stop_loss_percent: None,
        }
    }
}

impl From<BuyRequest> for BuyCommand {
    fn from(req: BuyRequest) -> Self {
        BuyCommand {
            inst_id: req.inst_id,
            buy_amount: req.buy_amount,
            take_profit_percent: req.take_profit_percent,
            stop_loss_percent: req.stop_loss_percent,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SellRequest {
    pub sell_all: bool,
    pub sell_amount: Option<Decimal>,
    pub inst_id: String,
}

impl Default for SellRequest {
    fn default() -> Self {
        SellRequest {
            sell_all: true,
            sell_amount: None,
            inst_id: default_inst_id(),
        }
    }
}

impl From<SellRequest> for SellCommand {
    fn from(req: SellRequest) -> Self {
        SellCommand {
            inst_id: req.inst_id,
            sell_all: req.sell_all,
            sell_amount: req.sell_amount,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataRequest {
    pub inst_id: String,
}

impl Default for MarketDataRequest {
    fn default() -> Self {
        MarketDataRequest {
            inst_id: default_inst_id(),
        }
    }
}

impl From<MarketDataRequest> for MarketDataQuery {
    fn from(req: MarketDataRequest) -> Self {
        MarketDataQuery {
            inst_id: req.inst_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TickersRequest {
    pub inst_type: String,
}

impl Default for TickersRequest {
    fn default() -> Self {
        TickersRequest {
            inst_type: "SPOT".to_string(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

// The btc_* / usdt_* names are kept for existing clients; they refer to the
// base and quote currency of `inst_id`.

#[derive(Debug, Clone, Serialize)]
pub struct TradeResponse {
    pub strategy_completed: bool,
    pub wait_minutes: u32,
    pub buy_amount: Decimal,
    pub inst_id: String,
    pub buy_order: OrderResult,
    pub sell_order: OrderResult,
    pub btc_balance_sold: Decimal,
}

impl From<TradeStrategyResult> for TradeResponse {
    fn from(result: TradeStrategyResult) -> Self {
        TradeResponse {
            strategy_completed: true,
            wait_minutes: result.wait_minutes.minutes(),
            buy_amount: result.buy.buy_amount.inner(),
            inst_id: result.buy.inst_id.to_string(),
            btc_balance_sold: result.base_sold(),
            buy_order: result.buy.order,
            sell_order: result.sell.order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuyResponse {
    pub success: bool,
    pub buy_amount: Decimal,
    pub inst_id: String,
    pub buy_order: OrderResult,
    /// Null when the balance could not be re-read after the order
    pub btc_acquired: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<Decimal>,
    pub message: String,
}

impl From<BuyResult> for BuyResponse {
    fn from(result: BuyResult) -> Self {
        let mut message = match result.base_acquired {
            Some(acquired) => format!(
                "Bought {} {} for {} {}",
                acquired.normalize(),
                result.inst_id.base(),
                result.buy_amount,
                result.inst_id.quote()
            ),
            None => format!(
                "Buy order {} placed for {} {}; the {} balance could not be re-read",
                result.order.order_id,
                result.buy_amount,
                result.inst_id.quote(),
                result.inst_id.base()
            ),
        };
        if let Some(price) = result.reference_price {
            message.push_str(&format!(" at about {}", price.normalize()));
        }
        if let Some(tp) = result.exits.take_profit {
            message.push_str(&format!(", take profit {}", tp.normalize()));
        }
        if let Some(sl) = result.exits.stop_loss {
            message.push_str(&format!(", stop loss {}", sl.normalize()));
        }

        BuyResponse {
            success: true,
            buy_amount: result.buy_amount.inner(),
            inst_id: result.inst_id.to_string(),
            buy_order: result.order,
            btc_acquired: result.base_acquired,
            current_price: result.reference_price,
            take_profit_price: result.exits.take_profit,
            stop_loss_price: result.exits.stop_loss,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SellResponse {
    pub success: bool,
    pub inst_id: String,
    pub sell_order: OrderResult,
    pub btc_sold: Decimal,
    pub usdt_received: Decimal,
    pub message: String,
}

impl From<SellResult> for SellResponse {
    fn from(result: SellResult) -> Self {
        let message = format!(
            "Sold {} {} for {} {}",
            result.base_sold.normalize(),
            result.inst_id.base(),
            result.quote_received.normalize(),
            result.inst_id.quote()
        );
        SellResponse {
            success: true,
            inst_id: result.inst_id.to_string(),
            sell_order: result.order,
            btc_sold: result.base_sold,
            usdt_received: result.quote_received,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub success: bool,
    pub balances: BalanceSnapshot,
    pub message: String,
}

impl From<BalanceSnapshot> for BalanceResponse {
    fn from(balances: BalanceSnapshot) -> Self {
        BalanceResponse {
            success: true,
            message: format!("{} currencies with a non-zero balance", balances.len()),
            balances,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketDataResponse {
    pub inst_id: String,
    pub ticker: Ticker,
    pub order_book: OrderBook,
    pub candles: Vec<Candle>,
}

impl From<MarketDataResult> for MarketDataResponse {
    fn from(result: MarketDataResult) -> Self {
        MarketDataResponse {
            inst_id: result.inst_id.to_string(),
            ticker: result.ticker,
            order_book: result.order_book,
            candles: result.candles,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TickersResponse {
    pub inst_type: String,
    pub count: usize,
    pub tickers: Vec<Ticker>,
}

impl From<TickersResult> for TickersResponse {
    fn from(result: TickersResult) -> Self {
        TickersResponse {
            inst_type: result.inst_type.to_string(),
            count: result.tickers.len(),
            tickers: result.tickers,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<CurrencyInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub docs: &'static str,
    pub health: &'static str,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind, e.g. `validation_error`
    pub error: String,
    pub detail: String,
    /// Exchange error code, only for `exchange_error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            detail: detail.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
