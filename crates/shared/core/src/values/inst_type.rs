use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument family as the exchange groups them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InstType {
    #[default]
    Spot,
    Margin,
    Swap,
    Futures,
    Option,
}

impl InstType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstType::Spot => "SPOT",
            InstType::Margin => "MARGIN",
            InstType::Swap => "SWAP",
            InstType::Futures => "FUTURES",
            InstType::Option => "OPTION",
        }
    }
}

impl fmt::Display for InstType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for InstType {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_uppercase().as_str() {
            "SPOT" => Ok(InstType::Spot),
            "MARGIN" => Ok(InstType::Margin),
            "SWAP" => Ok(InstType::Swap),
            "FUTURES" => Ok(InstType::Futures),
            "OPTION" => Ok(InstType::Option),
            _ => Err("inst_type must be one of SPOT, MARGIN, SWAP, FUTURES, OPTION"),
        }
    }
}

impl TryFrom<String> for InstType {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        InstType::try_from(value.as_str())
    }
}

impl From<InstType> for String {
    fn from(value: InstType) -> Self {
        value.as_str().to_string()
    }
}
