use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange instrument identifier in `BASE-QUOTE` form, e.g. `BTC-USDT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstId {
    value: String,
    split: usize,
}

impl InstId {
    pub fn new(value: impl Into<String>) -> Result<Self, &'static str> {
        let s = value.into().trim().to_uppercase();
        if s.is_empty() {
            return Err("Instrument id cannot be empty");
        }
        if s.len() > 32 {
            return Err("Instrument id too long (max 32 chars)");
        }
        let split = s
            .find('-')
            .ok_or("Instrument id must look like BASE-QUOTE")?;
        let (base, quote) = (&s[..split], &s[split + 1..]);
        if base.is_empty() || quote.is_empty() {
            return Err("Instrument id must look like BASE-QUOTE");
        }
        if !base.chars().all(|c| c.is_ascii_alphanumeric())
            || !quote.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err("Instrument id legs must be alphanumeric");
        }
        Ok(InstId { value: s, split })
    }

    /// Currency being bought or sold (e.g. `BTC`)
    pub fn base(&self) -> &str {
        &self.value[..self.split]
    }

    /// Currency used to price the base (e.g. `USDT`)
    pub fn quote(&self) -> &str {
        &self.value[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Default for InstId {
    fn default() -> Self {
        InstId {
            value: "BTC-USDT".to_string(),
            split: 3,
        }
    }
}

impl fmt::Display for InstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for InstId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<&str> for InstId {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        InstId::new(value)
    }
}

impl TryFrom<String> for InstId {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        InstId::new(value)
    }
}

impl From<InstId> for String {
    fn from(value: InstId) -> Self {
        value.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_base_and_quote() {
        let id = InstId::new("eth-usdc").unwrap();
        assert_eq!(id.as_str(), "ETH-USDC");
        assert_eq!(id.base(), "ETH");
        assert_eq!(id.quote(), "USDC");
    }

    #[test]
    fn test_default_is_btc_usdt() {
        let id = InstId::default();
        assert_eq!(id, InstId::new("BTC-USDT").unwrap());
        assert_eq!(id.base(), "BTC");
        assert_eq!(id.quote(), "USDT");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(InstId::new("").is_err());
        assert!(InstId::new("BTCUSDT").is_err());
        assert!(InstId::new("-USDT").is_err());
        assert!(InstId::new("BTC-").is_err());
        assert!(InstId::new("BTC-US/DT").is_err());
    }

    #[test]
    fn test_serde_validates() {
        let id: InstId = serde_json::from_str("\"sol-usdt\"").unwrap();
        assert_eq!(id.base(), "SOL");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"SOL-USDT\"");
        assert!(serde_json::from_str::<InstId>("\"SOLUSDT\"").is_err());
    }
}
