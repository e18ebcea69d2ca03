//! OKX v5 REST adapter

mod client;
mod envelope;
pub mod signer;
mod wire;

pub use client::{
    BALANCE_PATH, BOOKS_PATH, CANDLES_PATH, CURRENCIES_PATH, DEMO_TRADING_HEADER,
    DEMO_TRADING_VALUE, ORDER_PATH, OkxRestClient, SERVER_TIME_PATH, TICKER_PATH, TICKERS_PATH,
    request_path,
};
pub use signer::{RequestSigner, SignedRequest, sign_payload, timestamp_now};
