mod balance;
mod market;
mod order;
mod side;

pub use balance::BalanceSnapshot;
pub use market::{Candle, CurrencyInfo, OrderBook, PriceLevel, Ticker};
pub use order::{ExitPrices, MarketOrder, OrderResult, SizeUnit};
pub use side::Side;
