use std::fmt;
use thiserror::Error;

/// Transport-level failure classes, kept apart so callers can decide whether
/// a retry makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkFailure {
    Timeout,
    Tls,
    Connect,
    Other,
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkFailure::Timeout => write!(f, "timeout"),
            NetworkFailure::Tls => write!(f, "tls"),
            NetworkFailure::Connect => write!(f, "connect"),
            NetworkFailure::Other => write!(f, "other"),
        }
    }
}

/// Every failure the service can surface to a caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradingError {
    /// Credentials or settings are missing; raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input rejected before any exchange call.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error ({kind}): {message}")]
    Network {
        kind: NetworkFailure,
        message: String,
    },

    /// The exchange answered with a non-zero application code.
    #[error("Exchange error {code}: {message}")]
    Exchange { code: String, message: String },

    /// The exchange answered with something that is not a valid envelope.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Account state blocks a later step of a flow that already placed an order.
    #[error("Position error: {0}")]
    Position(String),
}

impl TradingError {
    pub fn configuration(message: impl Into<String>) -> Self {
        TradingError::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        TradingError::Validation(message.into())
    }

    pub fn network(kind: NetworkFailure, message: impl Into<String>) -> Self {
        TradingError::Network {
            kind,
            message: message.into(),
        }
    }

    pub fn position(message: impl Into<String>) -> Self {
        TradingError::Position(message.into())
    }

    pub fn exchange(code: impl Into<String>, message: impl Into<String>) -> Self {
        TradingError::Exchange {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Stable snake_case name of the error kind, used in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            TradingError::Configuration(_) => "configuration_error",
            TradingError::Validation(_) => "validation_error",
            TradingError::Network { .. } => "network_error",
            TradingError::Exchange { .. } => "exchange_error",
            TradingError::Decode(_) => "decode_error",
            TradingError::Position(_) => "position_error",
        }
    }

    /// Human readable detail without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            TradingError::Configuration(msg)
            | TradingError::Validation(msg)
            | TradingError::Decode(msg)
            | TradingError::Position(msg) => msg.clone(),
            TradingError::Network { kind, message } => format!("{} ({})", message, kind),
            TradingError::Exchange { code, message } => format!("{} (code {})", message, code),
        }
    }
}

pub type Result<T> = std::result::Result<T, TradingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(
            TradingError::configuration("x").kind(),
            "configuration_error"
        );
        assert_eq!(TradingError::validation("x").kind(), "validation_error");
        assert_eq!(
            TradingError::network(NetworkFailure::Timeout, "x").kind(),
            "network_error"
        );
        assert_eq!(TradingError::exchange("1", "x").kind(), "exchange_error");
        assert_eq!(TradingError::Decode("x".into()).kind(), "decode_error");
        assert_eq!(TradingError::position("x").kind(), "position_error");
    }

    #[test]
    fn test_exchange_detail_carries_code() {
        let err = TradingError::exchange("51008", "Insufficient balance");
        assert_eq!(err.detail(), "Insufficient balance (code 51008)");
        assert_eq!(
            err.to_string(),
            "Exchange error 51008: Insufficient balance"
        );
    }
}
