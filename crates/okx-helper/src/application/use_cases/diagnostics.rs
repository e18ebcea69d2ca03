use crate::application::ports::{CredentialStatus, ExchangeGateway};
use chrono::{SecondsFormat, Utc};
use okx_helper_core::{NetworkFailure, TradingError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    #[serde(flatten)]
    pub credentials: CredentialStatus,
}

/// Outcome class of a connectivity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Success,
    SslError,
    Timeout,
    NetworkError,
    UnknownError,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub status: ConnectionStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_time: Option<i64>,
    pub latency_ms: u64,
}

/// Liveness and connectivity checks
pub struct DiagnosticsUseCase<G>
where
    G: ExchangeGateway,
{
    gateway: Arc<G>,
}

impl<G> DiagnosticsUseCase<G>
where
    G: ExchangeGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Local-only check; never calls the exchange
    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            credentials: self.gateway.credential_status(),
        }
    }

    /// Round trip to the exchange clock. Transport failures are reported as a
    /// diagnostic rather than an error; anything else propagates.
    pub async fn test_connection(&self) -> Result<ConnectionReport, TradingError> {
        let started = Instant::now();
        let result = self.gateway.server_time().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(server_time) => Ok(ConnectionReport {
                status: ConnectionStatus::Success,
                message: "Connection to the exchange is working".to_string(),
                suggestion: None,
                server_time: Some(server_time),
                latency_ms,
            }),
            Err(TradingError::Network { kind, message }) => {
                tracing::warn!(kind = %kind, "Connection test failed: {}", message);
                let (status, suggestion) = match kind {
                    NetworkFailure::Tls => (
                        ConnectionStatus::SslError,
                        "Check the system CA certificates and any TLS-intercepting proxy",
                    ),
                    NetworkFailure::Timeout => (
                        ConnectionStatus::Timeout,
                        "The exchange did not answer in time; check latency or raise the request timeout",
                    ),
                    NetworkFailure::Connect => (
                        ConnectionStatus::NetworkError,
                        "Check DNS resolution, firewall rules and the configured base URL",
                    ),
                    NetworkFailure::Other => (
                        ConnectionStatus::UnknownError,
                        "Inspect the service logs for the underlying transport error",
                    ),
                };
                Ok(ConnectionReport {
                    status,
                    message,
                    suggestion: Some(suggestion),
                    server_time: None,
                    latency_ms,
                })
            }
            Err(e) => Err(e),
        }
    }
}
