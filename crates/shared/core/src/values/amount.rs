use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Strictly positive decimal amount (order sizes, notional values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct PositiveAmount(Decimal);

impl PositiveAmount {
    pub fn new(value: Decimal) -> Result<Self, &'static str> {
        if value <= Decimal::ZERO {
            return Err("Amount must be greater than zero");
        }
        Ok(PositiveAmount(value))
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }

    /// Wire representation without trailing zeros (`"10"`, not `"10.000"`)
    pub fn to_wire(&self) -> String {
        self.0.normalize().to_string()
    }
}

impl fmt::Display for PositiveAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for PositiveAmount {
    type Error = &'static str;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        PositiveAmount::new(value)
    }
}

impl From<PositiveAmount> for Decimal {
    fn from(value: PositiveAmount) -> Self {
        value.0
    }
}

/// Wait between the buy and the sell leg of the trade strategy, 1..=60 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct WaitMinutes(u32);

impl WaitMinutes {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 60;
    pub const DEFAULT: u32 = 5;

    pub fn new(minutes: i64) -> Result<Self, &'static str> {
        if minutes < Self::MIN as i64 || minutes > Self::MAX as i64 {
            return Err("wait_minutes must be between 1 and 60");
        }
        Ok(WaitMinutes(minutes as u32))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0) * 60)
    }
}

impl Default for WaitMinutes {
    fn default() -> Self {
        WaitMinutes(Self::DEFAULT)
    }
}

impl TryFrom<i64> for WaitMinutes {
    type Error = &'static str;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        WaitMinutes::new(value)
    }
}

impl From<WaitMinutes> for u32 {
    fn from(value: WaitMinutes) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_amount_bounds() {
        assert!(PositiveAmount::new(dec!(0)).is_err());
        assert!(PositiveAmount::new(dec!(-1.5)).is_err());
        assert_eq!(
            PositiveAmount::new(dec!(0.0001)).unwrap().inner(),
            dec!(0.0001)
        );
    }

    #[test]
    fn test_positive_amount_wire_format() {
        assert_eq!(PositiveAmount::new(dec!(10.000)).unwrap().to_wire(), "10");
        assert_eq!(
            PositiveAmount::new(dec!(0.00012300)).unwrap().to_wire(),
            "0.000123"
        );
    }

    #[test]
    fn test_wait_minutes_range() {
        assert!(WaitMinutes::new(0).is_err());
        assert!(WaitMinutes::new(61).is_err());
        assert!(WaitMinutes::new(-3).is_err());
        assert_eq!(WaitMinutes::new(1).unwrap().minutes(), 1);
        assert_eq!(WaitMinutes::new(60).unwrap().minutes(), 60);
        assert_eq!(WaitMinutes::default().minutes(), 5);
    }

    #[test]
    fn test_wait_minutes_duration() {
        assert_eq!(
            WaitMinutes::new(2).unwrap().as_duration(),
            Duration::from_secs(120)
        );
    }
}
