//! IoT Report Export Server
//!
//! Compiles report definitions built in the reporting UI into Word documents.
//! Provides REST API endpoints for:
//!
//! - Word export (`.docx`)
//! - Document outline preview
//! - Health check
//!
//! ## Architecture
//!
//! The server is a thin HTTP layer over docx-engine, adding:
//!
//! - Rate limiting via tower-governor
//! - Generation timeout on the blocking pool
//! - Report lifecycle logging

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use docx_engine::compiler::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
use docx_engine::RenderOptions;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_generate, handle_health, handle_outline};

/// Command-line arguments for the report server
#[derive(Parser, Debug)]
#[command(name = "report-server")]
#[command(about = "IoT report export server producing Word documents")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "REPORT_SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "REPORT_SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Generation timeout in milliseconds
    #[arg(long, env = "REPORT_TIMEOUT_MS", default_value = "10000")]
    timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "REPORT_RATE_LIMIT", default_value = "10")]
    rate_limit: u32,

    /// Fixed seed for sample data, for reproducible exports
    #[arg(long, env = "REPORT_SEED")]
    seed: Option<u64>,

    /// strftime pattern for dates in headers, footers and tables
    #[arg(long, env = "REPORT_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// strftime pattern for times in headers, footers and tables
    #[arg(long, env = "REPORT_TIME_FORMAT", default_value = DEFAULT_TIME_FORMAT)]
    time_format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Generation timeout in milliseconds
    pub timeout_ms: u64,
    /// Template for each render; the clock is taken per request
    pub options: Arc<RenderOptions>,
}

impl AppState {
    pub fn new(timeout_ms: u64, options: RenderOptions) -> Self {
        Self {
            timeout_ms,
            options: Arc::new(options),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        (*self.options).clone()
    }
}

/// Routes without the rate limiter, which needs peer addresses
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/reports/generate", post(handle_generate))
        .route("/api/reports/outline", post(handle_outline))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting report server on {}:{}", args.host, args.port);

    let options = RenderOptions {
        seed: args.seed,
        generated_at: None,
        date_format: args.date_format,
        time_format: args.time_format,
    };
    options.validate().context("Invalid date/time format")?;

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .context("Failed to create rate limiter config")?,
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Apply middleware
    let app = router(AppState::new(args.timeout_ms, options))
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Generation timeout: {}ms", args.timeout_ms);
    if let Some(seed) = args.seed {
        info!("Sample data seed: {}", seed);
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
