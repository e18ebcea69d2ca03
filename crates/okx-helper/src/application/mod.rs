pub mod ports;
pub mod use_cases;

pub use ports::{CredentialStatus, ExchangeGateway};
pub use use_cases::{
    BuyCommand, BuyResult, BuyUseCase, ConnectionReport, ConnectionStatus, DiagnosticsUseCase,
    GetBalanceUseCase, HealthReport, MarketDataQuery, MarketDataResult, MarketDataUseCase,
    SellCommand, SellResult, SellUseCase, TickersResult, TradeStrategyCommand,
    TradeStrategyResult, TradeStrategyUseCase,
};
