mod balance;
mod buy;
mod diagnostics;
mod market_data;
mod sell;
mod trade_strategy;

pub use balance::GetBalanceUseCase;
pub use buy::{BuyCommand, BuyResult, BuyUseCase};
pub use diagnostics::{ConnectionReport, ConnectionStatus, DiagnosticsUseCase, HealthReport};
pub use market_data::{
    CANDLE_BAR, CANDLE_LIMIT, MarketDataQuery, MarketDataResult, MarketDataUseCase,
    ORDER_BOOK_DEPTH, TickersResult,
};
pub use sell::{SellCommand, SellResult, SellUseCase};
pub use trade_strategy::{TradeStrategyCommand, TradeStrategyResult, TradeStrategyUseCase};
