use crate::application::ports::ExchangeGateway;
use okx_helper_core::{BalanceSnapshot, Result};
use std::sync::Arc;

/// Fresh read of every non-zero available balance
pub struct GetBalanceUseCase<G>
where
    G: ExchangeGateway,
{
    gateway: Arc<G>,
}

impl<G> GetBalanceUseCase<G>
where
    G: ExchangeGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self) -> Result<BalanceSnapshot> {
        let snapshot = self.gateway.balances(&[]).await?.non_zero();
        tracing::debug!(currencies = snapshot.len(), "Balance snapshot read");
        Ok(snapshot)
    }
}
