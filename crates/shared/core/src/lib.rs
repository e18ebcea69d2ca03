//! OKX Helper Core Domain
//!
//! Pure domain types for the OKX helper service: instruments, amounts,
//! orders, balances, market data and the error taxonomy shared by every
//! layer. This crate contains no async and no I/O.

pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    BalanceSnapshot, Candle, CurrencyInfo, ExitPrices, MarketOrder, OrderBook, OrderResult,
    PriceLevel, Side, SizeUnit, Ticker,
};
pub use error::{NetworkFailure, Result, TradingError};
pub use values::{InstId, InstType, PositiveAmount, WaitMinutes};
