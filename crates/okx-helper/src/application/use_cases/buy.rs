use crate::application::ports::ExchangeGateway;
use okx_helper_core::{
    ExitPrices, InstId, MarketOrder, OrderResult, PositiveAmount, Result, TradingError,
};
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BuyCommand {
    pub inst_id: String,
    /// Quote currency to spend
    pub buy_amount: Decimal,
    /// Take-profit trigger, in percent above the last price
    pub take_profit_percent: Option<Decimal>,
    /// Stop-loss trigger, in percent below the last price
    pub stop_loss_percent: Option<Decimal>,
}

/// Requested exit distances, checked before any exchange call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ExitPlan {
    take_profit: Option<PositiveAmount>,
    stop_loss: Option<PositiveAmount>,
}

impl ExitPlan {
    pub(crate) fn from_request(
        take_profit_percent: Option<Decimal>,
        stop_loss_percent: Option<Decimal>,
    ) -> Result<Self> {
        let take_profit = take_profit_percent
            .map(|pct| {
                PositiveAmount::new(pct).map_err(|_| {
                    TradingError::validation("take_profit_percent must be greater than zero")
                })
            })
            .transpose()?;
        let stop_loss = stop_loss_percent
            .map(|pct| match PositiveAmount::new(pct) {
                Ok(pct) if pct.inner() < Decimal::ONE_HUNDRED => Ok(pct),
                _ => Err(TradingError::validation(
                    "stop_loss_percent must be between 0 and 100",
                )),
            })
            .transpose()?;
        Ok(ExitPlan {
            take_profit,
            stop_loss,
        })
    }

    fn is_empty(&self) -> bool {
        self.take_profit.is_none() && self.stop_loss.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct BuyResult {
    pub inst_id: InstId,
    pub buy_amount: PositiveAmount,
    pub order: OrderResult,
    /// Base balance after the order minus base balance before it. `None` when
    /// the order went through but the balance could not be re-read.
    pub base_acquired: Option<Decimal>,
    /// Last traded price the exits were computed from
    pub reference_price: Option<Decimal>,
    pub exits: ExitPrices,
}

/// Market buy of a quote-currency notional, bracketed by balance reads
pub struct BuyUseCase<G>
where
    G: ExchangeGateway,
{
    gateway: Arc<G>,
}

impl<G> BuyUseCase<G>
where
    G: ExchangeGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, command: BuyCommand) -> Result<BuyResult> {
        let inst_id = InstId::new(&command.inst_id).map_err(TradingError::validation)?;
        let buy_amount = PositiveAmount::new(command.buy_amount)
            .map_err(|_| TradingError::validation("buy_amount must be greater than zero"))?;
        let plan = ExitPlan::from_request(command.take_profit_percent, command.stop_loss_percent)?;

        self.execute_validated(inst_id, buy_amount, plan).await
    }

    pub(crate) async fn execute_validated(
        &self,
        inst_id: InstId,
        buy_amount: PositiveAmount,
        plan: ExitPlan,
    ) -> Result<BuyResult> {
        let base = inst_id.base().to_string();

        // Signed first, so missing credentials fail before any public call
        let before = self.gateway.balances(&[base.as_str()]).await?;

        let (reference_price, exits) = if plan.is_empty() {
            (None, ExitPrices::default())
        } else {
            let ticker = self.gateway.ticker(&inst_id).await?;
            let last: Decimal = ticker.last.parse().map_err(|_| {
                TradingError::Decode(format!("Invalid last price '{}'", ticker.last))
            })?;
            let exits = ExitPrices::around(last, plan.take_profit, plan.stop_loss);
            (Some(last), exits)
        };

        tracing::info!(
            inst_id = %inst_id,
            amount = %buy_amount,
            take_profit = ?exits.take_profit,
            stop_loss = ?exits.stop_loss,
            "Placing market buy for {} {}",
            buy_amount,
            inst_id.quote()
        );
        let order = self
            .gateway
            .place_market_order(
                &MarketOrder::buy_notional(inst_id.clone(), buy_amount).with_exits(exits),
            )
            .await?;

        // The order is live from here on; a failed re-read must not hide it
        let base_acquired = match self.gateway.balances(&[base.as_str()]).await {
            Ok(after) => Some(after.gained_since(&before, &base)),
            Err(e) => {
                tracing::warn!(
                    buy_order_id = %order.order_id,
                    error = %e,
                    "Market buy accepted but the {} balance could not be re-read",
                    base
                );
                None
            }
        };

        tracing::info!(
            order_id = %order.order_id,
            acquired = ?base_acquired,
            "Market buy accepted for {} {}",
            buy_amount,
            inst_id.quote()
        );

        Ok(BuyResult {
            inst_id,
            buy_amount,
            order,
            base_acquired,
            reference_price,
            exits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exit_plan_is_optional() {
        assert_eq!(ExitPlan::from_request(None, None).unwrap(), ExitPlan::default());
        assert!(ExitPlan::from_request(None, None).unwrap().is_empty());
        assert!(!ExitPlan::from_request(Some(dec!(5)), None).unwrap().is_empty());
    }

    #[test]
    fn test_exit_plan_bounds() {
        assert!(ExitPlan::from_request(Some(dec!(5)), Some(dec!(2))).is_ok());
        assert!(ExitPlan::from_request(Some(dec!(250)), Some(dec!(99.9))).is_ok());

        for (tp, sl) in [
            (Some(dec!(0)), None),
            (Some(dec!(-1)), None),
            (None, Some(dec!(0))),
            (None, Some(dec!(100))),
        ] {
            assert!(matches!(
                ExitPlan::from_request(tp, sl),
                Err(TradingError::Validation(_))
            ));
        }
    }
}
