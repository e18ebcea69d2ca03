//! OKX Helper
//!
//! A thin REST façade over the OKX v5 API: a timed buy-wait-sell strategy,
//! independent market buy and sell, balances, market data and connectivity
//! diagnostics. Every outbound call is signed with the configured API key and
//! flagged for demo trading.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture with clear separation of concerns:
//!
//! - **Application**: Use cases and the exchange port (TradeStrategy, Buy, Sell, etc.)
//! - **Infrastructure**: Configuration and the OKX REST adapter (signer, client)
//! - **Presentation**: REST API under `/api/v1`
//!
//! Domain types live in the `okx-helper-core` crate.
//!
//! # Example
//!
//! ```ignore
//! use okx_helper::{AppConfig, HelperService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load(None).unwrap();
//!     let service = HelperService::from_config(config).unwrap();
//!     service.run().await.unwrap();
//! }
//! ```

pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use application::{CredentialStatus, ExchangeGateway};
pub use infrastructure::{AppConfig, ConfigError, Credentials, OkxRestClient, RequestSigner};
pub use presentation::{ApiError, AppState, create_router};

use axum::Router;
use okx_helper_core::Result as TradingResult;
use std::sync::Arc;
use tokio::net::TcpListener;

/// The HTTP service: configuration plus the exchange it talks to
pub struct HelperService<G: ExchangeGateway + 'static> {
    pub config: AppConfig,
    pub gateway: Arc<G>,
}

impl HelperService<OkxRestClient> {
    /// Build the OKX client from configuration. Missing credentials are not an
    /// error here; signed endpoints report them per request.
    pub fn from_config(config: AppConfig) -> TradingResult<Self> {
        let client = OkxRestClient::new(config.okx.credentials(), config.okx.request_timeout())?;
        Ok(Self::with_gateway(config, Arc::new(client)))
    }
}

impl<G: ExchangeGateway + 'static> HelperService<G> {
    pub fn with_gateway(config: AppConfig, gateway: Arc<G>) -> Self {
        HelperService { config, gateway }
    }

    /// Create the REST API router
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState::new(
            Arc::clone(&self.gateway),
            self.config.app_name.clone(),
            self.config.app_version.clone(),
        ));

        create_router(state)
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("{} listening on {}", self.config.app_name, addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
