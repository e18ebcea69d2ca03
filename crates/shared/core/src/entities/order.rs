use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{InstId, PositiveAmount};

/// Currency a market order size is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    /// Size is an amount of the base currency (e.g. BTC)
    Base,
    /// Size is an amount of the quote currency (e.g. USDT)
    Quote,
}

/// Trigger prices attached to an order. Each one closes the position at
/// market once the last traded price crosses it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitPrices {
    pub take_profit: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
}

impl ExitPrices {
    /// Take profit `take_profit_percent` above `reference`, stop loss
    /// `stop_loss_percent` below it, both rounded to the reference's precision.
    pub fn around(
        reference: Decimal,
        take_profit_percent: Option<PositiveAmount>,
        stop_loss_percent: Option<PositiveAmount>,
    ) -> Self {
        let shifted = |percent: Decimal| {
            (reference * (Decimal::ONE_HUNDRED + percent) / Decimal::ONE_HUNDRED)
                .round_dp(reference.scale())
        };
        ExitPrices {
            take_profit: take_profit_percent.map(|p| shifted(p.inner())),
            stop_loss: stop_loss_percent.map(|p| shifted(-p.inner())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.take_profit.is_none() && self.stop_loss.is_none()
    }
}

/// Spot market order in cash mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOrder {
    pub inst_id: InstId,
    pub side: Side,
    pub size: PositiveAmount,
    pub size_unit: SizeUnit,
    pub exits: ExitPrices,
}

impl MarketOrder {
    /// Buy base currency worth `notional` of the quote currency
    pub fn buy_notional(inst_id: InstId, notional: PositiveAmount) -> Self {
        MarketOrder {
            inst_id,
            side: Side::Buy,
            size: notional,
            size_unit: SizeUnit::Quote,
            exits: ExitPrices::default(),
        }
    }

    /// Sell `quantity` of the base currency
    pub fn sell_quantity(inst_id: InstId, quantity: PositiveAmount) -> Self {
        MarketOrder {
            inst_id,
            side: Side::Sell,
            size: quantity,
            size_unit: SizeUnit::Base,
            exits: ExitPrices::default(),
        }
    }

    pub fn with_exits(mut self, exits: ExitPrices) -> Self {
        self.exits = exits;
        self
    }
}

/// Outcome of an accepted order placement. Fills are not tracked beyond
/// the balance re-read done by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: String,
    pub client_order_id: Option<String>,
    /// Per-order status code reported by the exchange (`"0"` on success)
    pub status_code: String,
    pub message: String,
    /// Envelope exactly as the exchange returned it
    pub raw_response: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_is_sized_in_quote() {
        let order = MarketOrder::buy_notional(
            InstId::default(),
            PositiveAmount::new(dec!(10)).unwrap(),
        );
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.size_unit, SizeUnit::Quote);
    }

    #[test]
    fn test_sell_is_sized_in_base() {
        let order = MarketOrder::sell_quantity(
            InstId::default(),
            PositiveAmount::new(dec!(0.0002)).unwrap(),
        );
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.size_unit, SizeUnit::Base);
    }

    #[test]
    fn test_exit_prices_around_reference() {
        let pct = |v| Some(PositiveAmount::new(v).unwrap());

        let exits = ExitPrices::around(dec!(50000), pct(dec!(5)), pct(dec!(2)));
        assert_eq!(exits.take_profit, Some(dec!(52500)));
        assert_eq!(exits.stop_loss, Some(dec!(49000)));

        // Rounded to one decimal like the reference
        let exits = ExitPrices::around(dec!(41006.8), pct(dec!(5)), None);
        assert_eq!(exits.take_profit, Some(dec!(43057.1)));
        assert_eq!(exits.stop_loss, None);
        assert!(!exits.is_empty());

        assert!(ExitPrices::around(dec!(100), None, None).is_empty());
    }
}
