use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Available balance per currency, as read from the exchange at one instant.
///
/// Snapshots are never cached; trading operations take one before and one
/// after each order and diff them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSnapshot(BTreeMap<String, Decimal>);

impl BalanceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: impl Into<String>, available: Decimal) {
        self.0.insert(currency.into().to_uppercase(), available);
    }

    /// Available amount, zero when the currency is absent
    pub fn available(&self, currency: &str) -> Decimal {
        self.0
            .get(&currency.to_uppercase())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Positive change of `currency` from `before` to `self`, floored at zero
    pub fn gained_since(&self, before: &BalanceSnapshot, currency: &str) -> Decimal {
        (self.available(currency) - before.available(currency)).max(Decimal::ZERO)
    }

    /// Positive decrease of `currency` from `before` to `self`, floored at zero
    pub fn spent_since(&self, before: &BalanceSnapshot, currency: &str) -> Decimal {
        (before.available(currency) - self.available(currency)).max(Decimal::ZERO)
    }

    /// Drop currencies whose available amount is zero
    pub fn non_zero(self) -> Self {
        BalanceSnapshot(
            self.0
                .into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Decimal)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Decimal)> for BalanceSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, Decimal)>>(iter: T) -> Self {
        let mut snapshot = BalanceSnapshot::new();
        for (currency, amount) in iter {
            snapshot.insert(currency, amount);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_currency_is_zero() {
        let snapshot = BalanceSnapshot::new();
        assert_eq!(snapshot.available("BTC"), Decimal::ZERO);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut snapshot = BalanceSnapshot::new();
        snapshot.insert("btc", dec!(0.5));
        assert_eq!(snapshot.available("BTC"), dec!(0.5));
        assert_eq!(snapshot.available("btc"), dec!(0.5));
    }

    #[test]
    fn test_diffs_are_floored() {
        let before: BalanceSnapshot = [("BTC".to_string(), dec!(0.1))].into_iter().collect();
        let after: BalanceSnapshot = [("BTC".to_string(), dec!(0.3))].into_iter().collect();

        assert_eq!(after.gained_since(&before, "BTC"), dec!(0.2));
        assert_eq!(after.spent_since(&before, "BTC"), dec!(0));
        assert_eq!(before.spent_since(&after, "BTC"), dec!(0.2));
        assert_eq!(before.gained_since(&after, "BTC"), dec!(0));
    }

    #[test]
    fn test_non_zero_filters() {
        let snapshot: BalanceSnapshot = [
            ("BTC".to_string(), dec!(0)),
            ("USDT".to_string(), dec!(12.5)),
        ]
        .into_iter()
        .collect();
        let filtered = snapshot.non_zero();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.available("USDT"), dec!(12.5));
    }
}
