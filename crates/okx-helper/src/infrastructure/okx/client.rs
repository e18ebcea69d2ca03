use async_trait::async_trait;
use okx_helper_core::{
    BalanceSnapshot, Candle, CurrencyInfo, InstId, InstType, MarketOrder, NetworkFailure,
    OrderBook, OrderResult, Result, Ticker, TradingError,
};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use super::envelope::Envelope;
use super::signer::RequestSigner;
use super::wire::{BalanceData, BookData, OrderAck, OrderRequestBody, ServerTime, candle_from_row};
use crate::application::ports::{CredentialStatus, ExchangeGateway};
use crate::infrastructure::config::Credentials;

/// Demo-trading flag sent on every request
pub const DEMO_TRADING_HEADER: &str = "x-simulated-trading";
pub const DEMO_TRADING_VALUE: &str = "1";

pub const TICKER_PATH: &str = "/api/v5/market/ticker";
pub const TICKERS_PATH: &str = "/api/v5/market/tickers";
pub const BOOKS_PATH: &str = "/api/v5/market/books";
pub const CANDLES_PATH: &str = "/api/v5/market/candles";
pub const SERVER_TIME_PATH: &str = "/api/v5/public/time";
pub const BALANCE_PATH: &str = "/api/v5/account/balance";
pub const CURRENCIES_PATH: &str = "/api/v5/asset/currencies";
pub const ORDER_PATH: &str = "/api/v5/trade/order";

/// HTTP client for the OKX v5 REST API
///
/// One method call is one HTTP request. Nothing is retried.
#[derive(Clone)]
pub struct OkxRestClient {
    client: Client,
    credentials: Credentials,
}

impl OkxRestClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                TradingError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(OkxRestClient {
            client,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(&self, request_path: &str) -> String {
        format!("{}{}", self.credentials.base_url(), request_path)
    }

    async fn get_public(&self, path: &str, query: &[(&str, String)]) -> Result<Envelope> {
        let request_path = request_path(path, query);
        self.send(self.client.get(self.url(&request_path))).await
    }

    async fn get_private(&self, path: &str, query: &[(&str, String)]) -> Result<Envelope> {
        // Credentials are checked before anything touches the network
        let signer = RequestSigner::from_credentials(&self.credentials)?;
        let request_path = request_path(path, query);
        let signed = signer.get(&request_path)?;

        self.send(signed.apply(self.client.get(self.url(&request_path))))
            .await
    }

    async fn post_private(&self, path: &str, body: &OrderRequestBody<'_>) -> Result<Envelope> {
        let signer = RequestSigner::from_credentials(&self.credentials)?;
        // Serialized once; the signed string is the one sent
        let body = serde_json::to_string(body).map_err(|e| {
            TradingError::validation(format!("Failed to encode request body: {}", e))
        })?;
        let signed = signer.post(path, &body)?;

        self.send(signed.apply(self.client.post(self.url(path))))
            .await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Envelope> {
        let response = request
            .header(DEMO_TRADING_HEADER, DEMO_TRADING_VALUE)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        let envelope = Envelope::parse(status, &text)?;
        if !envelope.is_ok() {
            tracing::debug!(
                code = %envelope.code,
                http_status = status.as_u16(),
                "OKX returned an error envelope"
            );
        }
        envelope.into_result()
    }
}

#[async_trait]
impl ExchangeGateway for OkxRestClient {
    async fn ticker(&self, inst_id: &InstId) -> Result<Ticker> {
        self.get_public(TICKER_PATH, &[("instId", inst_id.to_string())])
            .await?
            .first("ticker")
    }

    async fn tickers(&self, inst_type: InstType) -> Result<Vec<Ticker>> {
        self.get_public(TICKERS_PATH, &[("instType", inst_type.to_string())])
            .await?
            .items()
    }

    async fn order_book(&self, inst_id: &InstId, depth: usize) -> Result<OrderBook> {
        self.get_public(
            BOOKS_PATH,
            &[("instId", inst_id.to_string()), ("sz", depth.to_string())],
        )
        .await?
        .first::<BookData>("order book")?
        .into_order_book()
    }

    async fn candles(&self, inst_id: &InstId, bar: &str, limit: usize) -> Result<Vec<Candle>> {
        let rows: Vec<Vec<String>> = self
            .get_public(
                CANDLES_PATH,
                &[
                    ("instId", inst_id.to_string()),
                    ("bar", bar.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?
            .items()?;
        rows.iter().map(|row| candle_from_row(row)).collect()
    }

    async fn server_time(&self) -> Result<i64> {
        self.get_public(SERVER_TIME_PATH, &[])
            .await?
            .first::<ServerTime>("server time")?
            .millis()
    }

    async fn balances(&self, currencies: &[&str]) -> Result<BalanceSnapshot> {
        let query = if currencies.is_empty() {
            Vec::new()
        } else {
            vec![("ccy", currencies.join(","))]
        };
        let envelope = self.get_private(BALANCE_PATH, &query).await?;

        // An account with no assets may answer with no data item at all
        if envelope.data.is_empty() {
            return Ok(BalanceSnapshot::new());
        }
        envelope.first::<BalanceData>("balance")?.into_snapshot()
    }

    async fn currencies(&self) -> Result<Vec<CurrencyInfo>> {
        self.get_private(CURRENCIES_PATH, &[]).await?.items()
    }

    async fn place_market_order(&self, order: &MarketOrder) -> Result<OrderResult> {
        let envelope = self
            .post_private(ORDER_PATH, &OrderRequestBody::from(order))
            .await?;

        let ack: OrderAck = envelope.first("order")?;
        ack.into_order_result(envelope.raw)
    }

    fn credential_status(&self) -> CredentialStatus {
        self.credentials.status()
    }
}

/// Path plus encoded query string; this exact string is both signed and requested
pub fn request_path(path: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", path, encoded)
}

fn transport_error(err: reqwest::Error) -> TradingError {
    let message = error_chain(&err);
    let kind = if err.is_timeout() {
        NetworkFailure::Timeout
    } else if looks_like_tls(&message) {
        NetworkFailure::Tls
    } else if err.is_connect() {
        NetworkFailure::Connect
    } else {
        NetworkFailure::Other
    };

    tracing::debug!(kind = %kind, "OKX request failed: {}", message);
    TradingError::network(kind, message)
}

/// Display of the error and each of its sources, joined with ": "
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

fn looks_like_tls(message: &str) -> bool {
    let message = message.to_lowercase();
    ["certificate", "tls", "ssl", "handshake"]
        .iter()
        .any(|needle| message.contains(needle))
}
