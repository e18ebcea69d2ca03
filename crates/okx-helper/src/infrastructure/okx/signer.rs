//! OKX request authentication
//!
//! OKX uses HMAC-SHA256 signing with Base64 encoding:
//! - Prehash string: timestamp + METHOD + requestPath (+ query) + body
//! - Headers: OK-ACCESS-KEY, OK-ACCESS-SIGN, OK-ACCESS-TIMESTAMP, OK-ACCESS-PASSPHRASE
//!
//! The timestamp in the header must be the one that was signed, and the body
//! must be the exact string sent on the wire.

use base64::Engine;
use chrono::{DateTime, NaiveDateTime, Utc};
use hmac::{Hmac, Mac};
use okx_helper_core::{Result, TradingError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use sha2::Sha256;

use crate::infrastructure::config::Credentials;

// Header names are case-insensitive; HeaderName stores them lowercase
pub const HEADER_ACCESS_KEY: HeaderName = HeaderName::from_static("ok-access-key");
pub const HEADER_ACCESS_SIGN: HeaderName = HeaderName::from_static("ok-access-sign");
pub const HEADER_ACCESS_TIMESTAMP: HeaderName = HeaderName::from_static("ok-access-timestamp");
pub const HEADER_ACCESS_PASSPHRASE: HeaderName = HeaderName::from_static("ok-access-passphrase");

/// ISO 8601 UTC with milliseconds, e.g. `2020-12-08T09:08:57.715Z`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Current time in the format OKX expects
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Check a timestamp string is exactly in [`TIMESTAMP_FORMAT`]
pub fn validate_timestamp(timestamp: &str) -> Result<()> {
    // Length pins exactly three fractional digits
    let well_formed = timestamp.len() == 24
        && NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(TradingError::validation(format!(
            "Malformed request timestamp '{}', expected YYYY-MM-DDTHH:MM:SS.mmmZ",
            timestamp
        )))
    }
}

/// Base64(HMAC-SHA256(secret, timestamp + method + request_path + body))
pub fn sign_payload(
    secret: &str,
    timestamp: &str,
    method: &Method,
    request_path: &str,
    body: &str,
) -> Result<String> {
    let prehash = format!("{}{}{}{}", timestamp, method.as_str(), request_path, body);

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|e| TradingError::configuration(format!("Unusable API secret: {}", e)))?;
    mac.update(prehash.as_bytes());

    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Signs outbound requests with a complete set of credentials
#[derive(Clone)]
pub struct RequestSigner {
    api_key: String,
    api_secret: String,
    passphrase: String,
}

impl RequestSigner {
    /// Fails with a configuration error naming every missing part
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        match (
            credentials.api_key(),
            credentials.api_secret(),
            credentials.passphrase(),
        ) {
            (Some(api_key), Some(api_secret), Some(passphrase)) => Ok(RequestSigner {
                api_key: api_key.to_string(),
                api_secret: api_secret.to_string(),
                passphrase: passphrase.to_string(),
            }),
            _ => Err(TradingError::configuration(format!(
                "OKX credentials not configured: missing {}",
                credentials.missing().join(", ")
            ))),
        }
    }

    /// Sign a GET; `request_path` includes the query string, no body is signed
    pub fn get(&self, request_path: &str) -> Result<SignedRequest> {
        self.get_at(timestamp_now(), request_path)
    }

    /// Sign a POST over the exact body string that will be sent
    pub fn post(&self, request_path: &str, body: &str) -> Result<SignedRequest> {
        self.post_at(timestamp_now(), request_path, body)
    }

    pub fn get_at(&self, timestamp: String, request_path: &str) -> Result<SignedRequest> {
        self.sign(timestamp, Method::GET, request_path, String::new())
    }

    pub fn post_at(
        &self,
        timestamp: String,
        request_path: &str,
        body: &str,
    ) -> Result<SignedRequest> {
        self.sign(timestamp, Method::POST, request_path, body.to_string())
    }

    fn sign(
        &self,
        timestamp: String,
        method: Method,
        request_path: &str,
        body: String,
    ) -> Result<SignedRequest> {
        validate_timestamp(&timestamp)?;
        let signature = sign_payload(&self.api_secret, &timestamp, &method, request_path, &body)?;

        let mut headers = HeaderMap::new();
        insert_header(&mut headers, HEADER_ACCESS_KEY, &self.api_key)?;
        insert_header(&mut headers, HEADER_ACCESS_SIGN, &signature)?;
        insert_header(&mut headers, HEADER_ACCESS_TIMESTAMP, &timestamp)?;
        insert_header(&mut headers, HEADER_ACCESS_PASSPHRASE, &self.passphrase)?;

        Ok(SignedRequest {
            method,
            path: request_path.to_string(),
            timestamp,
            body,
            signature,
            headers,
        })
    }
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value).map_err(|_| {
        TradingError::configuration(format!(
            "Value for {} contains characters not allowed in headers",
            name
        ))
    })?;
    headers.insert(name, value);
    Ok(())
}

/// One signed outbound call. Dropped once the response arrives.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    /// Path plus query string, exactly as signed
    pub path: String,
    pub timestamp: String,
    /// Exact body string that was signed (empty for GET)
    pub body: String,
    pub signature: String,
    pub headers: HeaderMap,
}

impl SignedRequest {
    /// Attach the auth headers and, for POST, the signed body
    pub fn apply(self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.headers(self.headers);
        if self.method == Method::POST {
            builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(self.body)
        } else {
            builder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "22582BD0CFF14C41EDBF1AB98506286D";
    const TS: &str = "2020-12-08T09:08:57.715Z";

    fn signer() -> RequestSigner {
        RequestSigner::from_credentials(&Credentials::new(
            "https://www.okx.com",
            Some("key-1".into()),
            Some(SECRET.into()),
            Some("pass-1".into()),
        ))
        .unwrap()
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = sign_payload(SECRET, TS, &Method::GET, "/api/v5/account/balance", "").unwrap();
        let b = sign_payload(SECRET, TS, &Method::GET, "/api/v5/account/balance", "").unwrap();
        assert_eq!(a, b);
        // Base64 of a 32-byte digest
        assert_eq!(a.len(), 44);
    }

    #[test]
    fn test_every_input_changes_signature() {
        let path = "/api/v5/trade/order";
        let body = r#"{"instId":"BTC-USDT"}"#;
        let base = sign_payload(SECRET, TS, &Method::POST, path, body).unwrap();

        let variants = [
            sign_payload("other-secret", TS, &Method::POST, path, body).unwrap(),
            sign_payload(SECRET, "2020-12-08T09:08:57.716Z", &Method::POST, path, body).unwrap(),
            sign_payload(SECRET, TS, &Method::GET, path, body).unwrap(),
            sign_payload(SECRET, TS, &Method::POST, "/api/v5/trade/orders", body).unwrap(),
            sign_payload(SECRET, TS, &Method::POST, path, r#"{"instId":"ETH-USDT"}"#).unwrap(),
        ];
        for variant in variants {
            assert_ne!(variant, base);
        }
    }

    #[test]
    fn test_prehash_is_plain_concatenation() {
        // Shifting bytes between path and body does not change the prehash
        let a = sign_payload(SECRET, TS, &Method::POST, "/a", "b").unwrap();
        let b = sign_payload(SECRET, TS, &Method::POST, "/ab", "").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_get_excludes_body() {
        let signed = signer().get_at(TS.into(), "/api/v5/account/balance?ccy=BTC").unwrap();
        assert!(signed.body.is_empty());
        assert_eq!(
            signed.signature,
            sign_payload(SECRET, TS, &Method::GET, "/api/v5/account/balance?ccy=BTC", "").unwrap()
        );
    }

    #[test]
    fn test_post_includes_exact_body() {
        let body = r#"{"instId":"BTC-USDT","side":"buy","sz":"10"}"#;
        let signed = signer().post_at(TS.into(), "/api/v5/trade/order", body).unwrap();
        assert_eq!(signed.body, body);
        assert_eq!(
            signed.signature,
            sign_payload(SECRET, TS, &Method::POST, "/api/v5/trade/order", body).unwrap()
        );

        // Same JSON with different whitespace is a different signature
        let spaced = r#"{"instId": "BTC-USDT", "side": "buy", "sz": "10"}"#;
        let other = signer().post_at(TS.into(), "/api/v5/trade/order", spaced).unwrap();
        assert_ne!(signed.signature, other.signature);
    }

    #[test]
    fn test_headers_carry_signed_timestamp() {
        let signed = signer().get_at(TS.into(), "/api/v5/asset/currencies").unwrap();
        assert_eq!(signed.headers["ok-access-key"], "key-1");
        assert_eq!(signed.headers["ok-access-passphrase"], "pass-1");
        assert_eq!(signed.headers["ok-access-timestamp"], TS);
        assert_eq!(signed.headers["ok-access-sign"], signed.signature.as_str());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[19..20], ".");
        assert!(validate_timestamp(&ts).is_ok());
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_malformed_timestamps_rejected() {
        for bad in [
            "",
            "2020-12-08T09:08:57Z",
            "2020-12-08T09:08:57.7Z",
            "2020-12-08T09:08:57.715+00:00",
            "2020-12-08 09:08:57.715Z",
            "1607418537715",
        ] {
            assert!(
                matches!(
                    signer().get_at(bad.to_string(), "/api/v5/public/time"),
                    Err(TradingError::Validation(_))
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_missing_credentials_is_configuration_error() {
        let creds = Credentials::new("https://www.okx.com", Some("key".into()), None, None);
        let err = RequestSigner::from_credentials(&creds).err().unwrap();
        match err {
            TradingError::Configuration(msg) => {
                assert!(msg.contains("OKX_API_SECRET"));
                assert!(msg.contains("OKX_PASSPHRASE"));
                assert!(!msg.contains("OKX_API_KEY"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
