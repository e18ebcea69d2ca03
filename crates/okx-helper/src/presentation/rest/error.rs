use crate::presentation::rest::dto::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use okx_helper_core::TradingError;

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new("validation_error", message),
        }
    }
}

/// HTTP status for each error kind
pub fn status_for(error: &TradingError) -> StatusCode {
    match error {
        TradingError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TradingError::Validation(_) => StatusCode::BAD_REQUEST,
        TradingError::Network { .. } => StatusCode::BAD_GATEWAY,
        TradingError::Exchange { .. } => StatusCode::BAD_REQUEST,
        TradingError::Decode(_) => StatusCode::BAD_GATEWAY,
        TradingError::Position(_) => StatusCode::CONFLICT,
    }
}

impl From<TradingError> for ApiError {
    fn from(error: TradingError) -> Self {
        let status = status_for(&error);
        if status.is_server_error() {
            tracing::error!(kind = error.kind(), "{}", error);
        } else {
            tracing::warn!(kind = error.kind(), "{}", error);
        }

        let body = match &error {
            TradingError::Exchange { code, message } => {
                ErrorResponse::new(error.kind(), message.clone()).with_code(code.clone())
            }
            other => ErrorResponse::new(other.kind(), other.detail()),
        };
        ApiError { status, body }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("Rejected query string: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.body.error, self.body.detail)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use okx_helper_core::NetworkFailure;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(TradingError::configuration("missing")).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(TradingError::validation("bad")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(TradingError::network(NetworkFailure::Timeout, "slow")).status,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(TradingError::Decode("HTTP 502: <html>".into())).status,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(TradingError::position("nothing to sell")).status,
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_exchange_error_carries_code() {
        let err = ApiError::from(TradingError::exchange("51008", "Insufficient balance"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.error, "exchange_error");
        assert_eq!(err.body.detail, "Insufficient balance");
        assert_eq!(err.body.code.as_deref(), Some("51008"));
    }
}
