use axum::{
    Router,
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::application::ExchangeGateway;

pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Application state shared across handlers
pub struct AppState<G: ExchangeGateway> {
    pub gateway: Arc<G>,
    pub app_name: String,
    pub app_version: String,
}

impl<G: ExchangeGateway> AppState<G> {
    pub fn new(gateway: Arc<G>, app_name: impl Into<String>, app_version: impl Into<String>) -> Self {
        AppState {
            gateway,
            app_name: app_name.into(),
            app_version: app_version.into(),
        }
    }
}

/// Create the REST API router
pub fn create_router<G: ExchangeGateway + 'static>(state: Arc<AppState<G>>) -> Router {
    let api = Router::new()
        // Trading
        .route(
            "/trade",
            get(handlers::trade_query::<G>).post(handlers::trade::<G>),
        )
        .route(
            "/buy",
            get(handlers::buy_query::<G>).post(handlers::buy::<G>),
        )
        .route(
            "/sell",
            get(handlers::sell_query::<G>).post(handlers::sell::<G>),
        )
        .route("/balance", get(handlers::balance::<G>))
        // Market data
        .route(
            "/market-data",
            get(handlers::market_data_query::<G>).post(handlers::market_data::<G>),
        )
        .route(
            "/tickers",
            get(handlers::tickers_query::<G>).post(handlers::tickers::<G>),
        )
        .route("/currencies", get(handlers::currencies::<G>))
        // Diagnostics
        .route("/health", get(handlers::health::<G>))
        .route("/test-connection", get(handlers::test_connection::<G>));

    Router::new()
        .route("/", get(handlers::root::<G>))
        .nest("/api/v1", api)
        // Middleware
        .layer(middleware::from_fn(process_time))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Wall-clock handling time in seconds on every response
async fn process_time(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(request).await;

    let elapsed = format!("{:.6}", started.elapsed().as_secs_f64());
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    response
}
