use okx_helper_core::{Result, TradingError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Longest body excerpt carried in a decode error
const BODY_EXCERPT_CHARS: usize = 256;

/// OKX response wrapper `{code, msg, data: [...]}`
#[derive(Debug, Clone)]
pub(crate) struct Envelope {
    pub code: String,
    pub msg: String,
    pub data: Vec<Value>,
    /// Whole response body as received
    pub raw: Value,
}

impl Envelope {
    /// Parse a response body. Only a missing or malformed envelope fails here;
    /// a non-zero `code` is reported by [`Envelope::into_result`].
    pub fn parse(status: StatusCode, text: &str) -> Result<Self> {
        let raw: Value =
            serde_json::from_str(text).map_err(|_| decode_error(status, text))?;

        let code = match raw.get("code") {
            Some(Value::String(code)) => code.clone(),
            Some(Value::Number(code)) => code.to_string(),
            _ => return Err(decode_error(status, text)),
        };
        let msg = raw
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let data = match raw.get("data") {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![other.clone()],
        };

        if code == "0" && !status.is_success() {
            return Err(decode_error(status, text));
        }

        Ok(Envelope {
            code,
            msg,
            data,
            raw,
        })
    }

    pub fn is_ok(&self) -> bool {
        self.code == "0"
    }

    /// Turn a non-zero `code` into an exchange error. An empty `msg` falls
    /// back to the first item's `sMsg`, which is where order rejections land.
    pub fn into_result(self) -> Result<Self> {
        if self.is_ok() {
            return Ok(self);
        }

        let message = if self.msg.is_empty() {
            self.data
                .first()
                .and_then(|item| item.get("sMsg"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        } else {
            self.msg
        };
        Err(TradingError::exchange(self.code, message))
    }

    /// Deserialize every item of `data`
    pub fn items<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.data
            .iter()
            .map(|item| {
                T::deserialize(item).map_err(|e| {
                    TradingError::Decode(format!("Unexpected data item: {}", e))
                })
            })
            .collect()
    }

    /// Deserialize the first item of `data`, failing when there is none
    pub fn first<T: DeserializeOwned>(&self, what: &str) -> Result<T> {
        let item = self
            .data
            .first()
            .ok_or_else(|| TradingError::Decode(format!("Empty {} data", what)))?;
        T::deserialize(item)
            .map_err(|e| TradingError::Decode(format!("Unexpected {} data: {}", what, e)))
    }
}

fn decode_error(status: StatusCode, text: &str) -> TradingError {
    let excerpt: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
    TradingError::Decode(format!("HTTP {}: {}", status.as_u16(), excerpt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Item {
        ts: String,
    }

    #[test]
    fn test_success_envelope() {
        let env = Envelope::parse(
            StatusCode::OK,
            r#"{"code":"0","msg":"","data":[{"ts":"1"},{"ts":"2"}]}"#,
        )
        .unwrap()
        .into_result()
        .unwrap();
        let items: Vec<Item> = env.items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(env.first::<Item>("time").unwrap().ts, "1");
        assert_eq!(env.raw["data"][1]["ts"], "2");
    }

    #[test]
    fn test_numeric_code_is_accepted() {
        let env = Envelope::parse(StatusCode::OK, r#"{"code":0,"msg":"","data":[]}"#).unwrap();
        assert!(env.is_ok());
    }

    #[test]
    fn test_non_zero_code_is_exchange_error() {
        let err = Envelope::parse(
            StatusCode::BAD_REQUEST,
            r#"{"code":"50113","msg":"Invalid Sign","data":[]}"#,
        )
        .unwrap()
        .into_result()
        .unwrap_err();
        assert_eq!(err, TradingError::exchange("50113", "Invalid Sign"));
    }

    #[test]
    fn test_empty_msg_falls_back_to_item_message() {
        let err = Envelope::parse(
            StatusCode::OK,
            r#"{"code":"1","msg":"","data":[{"ordId":"","sCode":"51008","sMsg":"Insufficient balance"}]}"#,
        )
        .unwrap()
        .into_result()
        .unwrap_err();
        assert_eq!(err, TradingError::exchange("1", "Insufficient balance"));
    }

    #[test]
    fn test_non_json_is_decode_error() {
        let err = Envelope::parse(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").unwrap_err();
        match err {
            TradingError::Decode(msg) => {
                assert!(msg.starts_with("HTTP 502"));
                assert!(msg.contains("Bad Gateway"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(10_000);
        let err = Envelope::parse(StatusCode::OK, &body).unwrap_err();
        match err {
            TradingError::Decode(msg) => assert!(msg.len() < 300),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_code_is_decode_error() {
        assert!(matches!(
            Envelope::parse(StatusCode::OK, r#"{"data":[]}"#),
            Err(TradingError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_data_for_first() {
        let env = Envelope::parse(StatusCode::OK, r#"{"code":"0","msg":"","data":[]}"#).unwrap();
        assert!(matches!(
            env.first::<Item>("ticker"),
            Err(TradingError::Decode(_))
        ));
    }
}
