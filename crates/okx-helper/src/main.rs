use anyhow::Context;
use okx_helper::{AppConfig, HelperService};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"OKX Helper - REST façade over the OKX v5 API (demo trading)

USAGE:
    okx-helper [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES (a .env file in the working directory is read first):
    OKX_API_KEY                 API key
    OKX_API_SECRET              API secret
    OKX_PASSPHRASE              API passphrase
    OKX_BASE_URL                Exchange base URL (default: https://www.okx.com)
    OKX_REQUEST_TIMEOUT_SECS    Per-request timeout (default: 30)
    HOST                        Server host (default: 0.0.0.0)
    PORT                        Server port (default: 8000)
    APP_NAME                    Name reported by GET /
    APP_VERSION                 Version reported by GET /
    DEBUG                       Verbose logging (default: false)
    RUST_LOG                    Log level filter, overrides DEBUG
    LOG_FORMAT                  "json" for JSON log lines

EXAMPLES:
    # Run with defaults and credentials from .env
    okx-helper

    # Run with config file
    okx-helper --config config.json

    # Run with custom port
    PORT=9000 okx-helper
"#
    );
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "okx_helper=debug,tower_http=debug"
    } else {
        "okx_helper=info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i]));
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    init_tracing(config.debug);

    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }
    if let Some(path) = &config_path {
        tracing::info!("Loaded configuration from {}", path.display());
    }

    let credentials = config.okx.credentials();
    let missing = credentials.missing();
    if !missing.is_empty() {
        tracing::warn!(
            "OKX credentials incomplete, signed endpoints will fail: missing {}",
            missing.join(", ")
        );
    }

    tracing::info!("Starting {} v{}", config.app_name, config.app_version);
    tracing::info!("Exchange: {} (demo trading)", credentials.base_url());
    tracing::info!("REST API: http://{}/api/v1/", config.bind_addr());
    tracing::info!("Available endpoints:");
    tracing::info!("  GET/POST /api/v1/trade");
    tracing::info!("  GET/POST /api/v1/buy");
    tracing::info!("  GET/POST /api/v1/sell");
    tracing::info!("  GET      /api/v1/balance");
    tracing::info!("  GET/POST /api/v1/market-data");
    tracing::info!("  GET/POST /api/v1/tickers");
    tracing::info!("  GET      /api/v1/currencies");
    tracing::info!("  GET      /api/v1/health");
    tracing::info!("  GET      /api/v1/test-connection");

    let service = HelperService::from_config(config).context("Failed to build OKX client")?;
    service.run().await.context("Server error")
}
