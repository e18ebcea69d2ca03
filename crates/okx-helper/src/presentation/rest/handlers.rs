use axum::{Json, extract::State};
use std::sync::Arc;

use crate::application::{
    BuyUseCase, ConnectionReport, DiagnosticsUseCase, ExchangeGateway, GetBalanceUseCase,
    HealthReport, MarketDataUseCase, SellUseCase, TradeStrategyUseCase,
};
use crate::presentation::rest::{ApiError, ApiJson, ApiQuery, dto::*};

use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

const OKX_API_DOCS: &str = "https://www.okx.com/docs-v5/en/";

/// GET /
pub async fn root<G: ExchangeGateway>(State(state): State<Arc<AppState<G>>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} is running", state.app_name),
        version: state.app_version.clone(),
        docs: OKX_API_DOCS,
        health: "/api/v1/health",
    })
}

// ============================================================================
// Trading
// ============================================================================

/// POST /api/v1/trade
pub async fn trade<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiJson(req): ApiJson<TradeRequest>,
) -> ApiResult<TradeResponse> {
    run_trade(&state, req).await
}

/// GET /api/v1/trade
pub async fn trade_query<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiQuery(req): ApiQuery<TradeRequest>,
) -> ApiResult<TradeResponse> {
    run_trade(&state, req).await
}

async fn run_trade<G: ExchangeGateway>(
    state: &AppState<G>,
    req: TradeRequest,
) -> ApiResult<TradeResponse> {
    tracing::info!(
        inst_id = %req.inst_id,
        wait_minutes = req.wait_minutes,
        buy_amount = %req.buy_amount,
        "Trade strategy requested"
    );

    let use_case = TradeStrategyUseCase::new(Arc::clone(&state.gateway));
    let result = use_case.execute(req.into()).await?;

    Ok(Json(result.into()))
}

/// POST /api/v1/buy
pub async fn buy<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiJson(req): ApiJson<BuyRequest>,
) -> ApiResult<BuyResponse> {
    run_buy(&state, req).await
}

/// GET /api/v1/buy
pub async fn buy_query<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiQuery(req): ApiQuery<BuyRequest>,
) -> ApiResult<BuyResponse> {
    run_buy(&state, req).await
}

async fn run_buy<G: ExchangeGateway>(state: &AppState<G>, req: BuyRequest) -> ApiResult<BuyResponse> {
    tracing::info!(
        inst_id = %req.inst_id,
        buy_amount = %req.buy_amount,
        take_profit_percent = ?req.take_profit_percent,
        stop_loss_percent = ?req.stop_loss_percent,
        "Buy requested"
    );

    let use_case = BuyUseCase::new(Arc::clone(&state.gateway));
    let result = use_case.execute(req.into()).await?;

    Ok(Json(result.into()))
}

/// POST /api/v1/sell
pub async fn sell<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiJson(req): ApiJson<SellRequest>,
) -> ApiResult<SellResponse> {
    run_sell(&state, req).await
}

/// GET /api/v1/sell
pub async fn sell_query<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiQuery(req): ApiQuery<SellRequest>,
) -> ApiResult<SellResponse> {
    run_sell(&state, req).await
}

async fn run_sell<G: ExchangeGateway>(
    state: &AppState<G>,
    req: SellRequest,
) -> ApiResult<SellResponse> {
    tracing::info!(
        inst_id = %req.inst_id,
        sell_all = req.sell_all,
        sell_amount = ?req.sell_amount,
        "Sell requested"
    );

    let use_case = SellUseCase::new(Arc::clone(&state.gateway));
    let result = use_case.execute(req.into()).await?;

    Ok(Json(result.into()))
}

/// GET /api/v1/balance
pub async fn balance<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
) -> ApiResult<BalanceResponse> {
    let use_case = GetBalanceUseCase::new(Arc::clone(&state.gateway));
    let snapshot = use_case.execute().await?;

    Ok(Json(snapshot.into()))
}

// ============================================================================
// Market data
// ============================================================================

/// POST /api/v1/market-data
pub async fn market_data<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiJson(req): ApiJson<MarketDataRequest>,
) -> ApiResult<MarketDataResponse> {
    run_market_data(&state, req).await
}

/// GET /api/v1/market-data
pub async fn market_data_query<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiQuery(req): ApiQuery<MarketDataRequest>,
) -> ApiResult<MarketDataResponse> {
    run_market_data(&state, req).await
}

async fn run_market_data<G: ExchangeGateway>(
    state: &AppState<G>,
    req: MarketDataRequest,
) -> ApiResult<MarketDataResponse> {
    tracing::info!(inst_id = %req.inst_id, "Market data requested");

    let use_case = MarketDataUseCase::new(Arc::clone(&state.gateway));
    let result = use_case.snapshot(req.into()).await?;

    Ok(Json(result.into()))
}

/// POST /api/v1/tickers
pub async fn tickers<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiJson(req): ApiJson<TickersRequest>,
) -> ApiResult<TickersResponse> {
    run_tickers(&state, req).await
}

/// GET /api/v1/tickers
pub async fn tickers_query<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
    ApiQuery(req): ApiQuery<TickersRequest>,
) -> ApiResult<TickersResponse> {
    run_tickers(&state, req).await
}

async fn run_tickers<G: ExchangeGateway>(
    state: &AppState<G>,
    req: TickersRequest,
) -> ApiResult<TickersResponse> {
    tracing::info!(inst_type = %req.inst_type, "Tickers requested");

    let use_case = MarketDataUseCase::new(Arc::clone(&state.gateway));
    let result = use_case.tickers(&req.inst_type).await?;

    Ok(Json(result.into()))
}

/// GET /api/v1/currencies
pub async fn currencies<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
) -> ApiResult<CurrenciesResponse> {
    let use_case = MarketDataUseCase::new(Arc::clone(&state.gateway));
    let currencies = use_case.currencies().await?;

    Ok(Json(CurrenciesResponse { currencies }))
}

// ============================================================================
// Diagnostics
// ============================================================================

/// GET /api/v1/health
pub async fn health<G: ExchangeGateway>(State(state): State<Arc<AppState<G>>>) -> Json<HealthReport> {
    Json(DiagnosticsUseCase::new(Arc::clone(&state.gateway)).health())
}

/// GET /api/v1/test-connection
pub async fn test_connection<G: ExchangeGateway>(
    State(state): State<Arc<AppState<G>>>,
) -> ApiResult<ConnectionReport> {
    let report = DiagnosticsUseCase::new(Arc::clone(&state.gateway))
        .test_connection()
        .await?;
    tracing::info!(status = ?report.status, latency_ms = report.latency_ms, "Connection test finished");

    Ok(Json(report))
}
