use crate::application::ports::ExchangeGateway;
use crate::application::use_cases::buy::{BuyResult, BuyUseCase, ExitPlan};
use crate::application::use_cases::sell::{SellResult, SellSize, SellUseCase};
use okx_helper_core::{InstId, PositiveAmount, Result, TradingError, WaitMinutes};
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TradeStrategyCommand {
    pub inst_id: String,
    pub wait_minutes: i64,
    /// Quote currency to spend on the buy leg
    pub buy_amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct TradeStrategyResult {
    pub wait_minutes: WaitMinutes,
    pub buy: BuyResult,
    pub sell: SellResult,
}

impl TradeStrategyResult {
    pub fn base_sold(&self) -> Decimal {
        self.sell.base_sold
    }
}

/// Buy, hold for a fixed number of minutes, then sell the whole base balance.
///
/// The wait holds the calling request open. There is no compensation when the
/// sell leg fails after the buy went through: the sell error is returned and
/// the bought position stays on the account. Finding no base balance to sell
/// at that point is a position error, not a validation error.
pub struct TradeStrategyUseCase<G>
where
    G: ExchangeGateway,
{
    buy: BuyUseCase<G>,
    sell: SellUseCase<G>,
}

impl<G> TradeStrategyUseCase<G>
where
    G: ExchangeGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            buy: BuyUseCase::new(Arc::clone(&gateway)),
            sell: SellUseCase::new(gateway),
        }
    }

    pub async fn execute(&self, command: TradeStrategyCommand) -> Result<TradeStrategyResult> {
        // All input is checked before the first exchange call
        let inst_id = InstId::new(&command.inst_id).map_err(TradingError::validation)?;
        let wait_minutes =
            WaitMinutes::new(command.wait_minutes).map_err(TradingError::validation)?;
        let buy_amount = PositiveAmount::new(command.buy_amount)
            .map_err(|_| TradingError::validation("buy_amount must be greater than zero"))?;

        tracing::info!(
            inst_id = %inst_id,
            wait_minutes = wait_minutes.minutes(),
            buy_amount = %buy_amount,
            "Starting trade strategy"
        );

        let buy = self
            .buy
            .execute_validated(inst_id.clone(), buy_amount, ExitPlan::default())
            .await?;

        tracing::info!(
            order_id = %buy.order.order_id,
            "Holding position for {} minute(s)",
            wait_minutes.minutes()
        );
        tokio::time::sleep(wait_minutes.as_duration()).await;

        let sell = match self.sell.execute_validated(inst_id, SellSize::All).await {
            Ok(sell) => sell,
            Err(e) => {
                let e = match e {
                    TradingError::Validation(message) => TradingError::position(format!(
                        "{} after buy order {}",
                        message, buy.order.order_id
                    )),
                    other => other,
                };
                tracing::warn!(
                    buy_order_id = %buy.order.order_id,
                    error = %e,
                    "Sell leg failed after buy executed; position left open"
                );
                return Err(e);
            }
        };

        tracing::info!(
            buy_order_id = %buy.order.order_id,
            sell_order_id = %sell.order.order_id,
            sold = %sell.base_sold,
            "Trade strategy completed"
        );

        Ok(TradeStrategyResult {
            wait_minutes,
            buy,
            sell,
        })
    }
}
