use crate::application::ports::ExchangeGateway;
use okx_helper_core::{InstId, MarketOrder, OrderResult, PositiveAmount, Result, TradingError};
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SellCommand {
    pub inst_id: String,
    /// Sell the whole available base balance
    pub sell_all: bool,
    /// Base quantity to sell, required when `sell_all` is false
    pub sell_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SellSize {
    All,
    Exact(PositiveAmount),
}

impl SellSize {
    pub(crate) fn from_request(sell_all: bool, sell_amount: Option<Decimal>) -> Result<Self> {
        if sell_all {
            return Ok(SellSize::All);
        }
        let amount = sell_amount.ok_or_else(|| {
            TradingError::validation("sell_amount is required when sell_all is false")
        })?;
        PositiveAmount::new(amount)
            .map(SellSize::Exact)
            .map_err(|_| TradingError::validation("sell_amount must be greater than zero"))
    }
}

#[derive(Debug, Clone)]
pub struct SellResult {
    pub inst_id: InstId,
    pub order: OrderResult,
    /// Base balance before the order minus base balance after it
    pub base_sold: Decimal,
    /// Quote balance after the order minus quote balance before it
    pub quote_received: Decimal,
}

/// Market sell of base currency, bracketed by balance reads
pub struct SellUseCase<G>
where
    G: ExchangeGateway,
{
    gateway: Arc<G>,
}

impl<G> SellUseCase<G>
where
    G: ExchangeGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, command: SellCommand) -> Result<SellResult> {
        let inst_id = InstId::new(&command.inst_id).map_err(TradingError::validation)?;
        let size = SellSize::from_request(command.sell_all, command.sell_amount)?;

        self.execute_validated(inst_id, size).await
    }

    pub(crate) async fn execute_validated(
        &self,
        inst_id: InstId,
        size: SellSize,
    ) -> Result<SellResult> {
        let base = inst_id.base().to_string();
        let quote = inst_id.quote().to_string();

        let before = self
            .gateway
            .balances(&[base.as_str(), quote.as_str()])
            .await?;

        let quantity = match size {
            SellSize::Exact(amount) => amount,
            SellSize::All => {
                let available = before.available(&base);
                PositiveAmount::new(available).map_err(|_| {
                    TradingError::validation(format!("No {} balance available to sell", base))
                })?
            }
        };

        tracing::info!(
            inst_id = %inst_id,
            quantity = %quantity,
            "Placing market sell for {} {}",
            quantity,
            base
        );
        let order = self
            .gateway
            .place_market_order(&MarketOrder::sell_quantity(inst_id.clone(), quantity))
            .await?;

        let after = self
            .gateway
            .balances(&[base.as_str(), quote.as_str()])
            .await?;
        let base_sold = after.spent_since(&before, &base);
        let quote_received = after.gained_since(&before, &quote);

        tracing::info!(
            order_id = %order.order_id,
            sold = %base_sold,
            received = %quote_received,
            "Market sell accepted, sold {} {} for {} {}",
            base_sold,
            base,
            quote_received,
            quote
        );

        Ok(SellResult {
            inst_id,
            order,
            base_sold,
            quote_received,
        })
    }
}
