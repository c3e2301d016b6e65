//! # Trailcrumb - Breadcrumb Server
//!
//! The main binary for the Trailcrumb breadcrumb engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for resolving trails against a site fixture
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │               apps/trailcrumb (THE BINARY)            │
//! │                                                       │
//! │   ┌─────────────┐              ┌─────────────┐        │
//! │   │    CLI      │              │  HTTP API   │        │
//! │   │   (clap)    │              │   (axum)    │        │
//! │   └──────┬──────┘              └──────┬──────┘        │
//! │          │                            │               │
//! │          └─────────────┬──────────────┘               │
//! │                        ▼                              │
//! │               ┌─────────────────┐                     │
//! │               │ trailcrumb-core │                     │
//! │               │   (THE LOGIC)   │                     │
//! │               └─────────────────┘                     │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! trailcrumb --site site.json --settings trailcrumb.toml serve --port 8080
//!
//! # CLI operations
//! trailcrumb check
//! trailcrumb trail --kind singular --item 12
//! trailcrumb --json-mode trail --request request.json
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // TRAILCRUMB_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("TRAILCRUMB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trailcrumb=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Banner only where it cannot corrupt machine-readable output
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Trailcrumb startup banner.
fn print_banner() {
    println!(
        r#"
  Home › Trailcrumb › v{}

  Deterministic • Privacy-aware • Hookable
"#,
        env!("CARGO_PKG_VERSION")
    );
}
