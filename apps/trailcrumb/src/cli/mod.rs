//! # Trailcrumb CLI Module
//!
//! This module implements the CLI interface for Trailcrumb.
//!
//! ## Available Commands
//!
//! - `trail` - Print the trail for one request
//! - `check` - Load the site and report what it contains
//! - `serve` - Start the HTTP server

mod commands;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trailcrumb_core::TrailError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Trailcrumb - breadcrumb trails for hierarchical content
///
/// Loads a site fixture and settings, then composes and resolves the
/// breadcrumb trail for a classified page request.
#[derive(Parser, Debug)]
#[command(name = "trailcrumb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the JSON site fixture
    #[arg(short = 'S', long, global = true, default_value = "site.json")]
    pub site: PathBuf,

    /// Path to the TOML settings file (defaults apply when missing)
    #[arg(short = 'C', long, global = true, default_value = "trailcrumb.toml")]
    pub settings: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the breadcrumb trail for a request
    Trail(TrailArgs),

    /// Load the site and settings and report counts
    Check,

    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Page kinds accepted by `trail --kind`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Home,
    BlogIndex,
    Singular,
    Archive,
    Term,
    Day,
    Month,
    Year,
    Author,
    Search,
    NotFound,
}

/// Request description for the `trail` command.
#[derive(Args, Debug, Default)]
pub struct TrailArgs {
    /// JSON file holding a request context; overrides the inline flags
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// Page kind
    #[arg(short, long, value_enum)]
    pub kind: Option<PageKind>,

    /// Current item id
    #[arg(short, long)]
    pub item: Option<u64>,

    /// Term id (term archives)
    #[arg(long)]
    pub term: Option<u64>,

    /// Taxonomy name (term archives)
    #[arg(long)]
    pub taxonomy: Option<String>,

    /// Content type name (content type archives)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Date as YYYY-MM-DD (day archives)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Year (month and year archives)
    #[arg(long)]
    pub year: Option<i32>,

    /// Month number (month archives)
    #[arg(long)]
    pub month: Option<u32>,

    /// Author display name
    #[arg(long)]
    pub author: Option<String>,

    /// Search query
    #[arg(long)]
    pub query: Option<String>,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), TrailError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Trail(args)) => {
            cmd_trail(&cli.site, &cli.settings, json_mode, cli.verbose, &args)
        }
        Some(Commands::Check) => cmd_check(&cli.site, &cli.settings, json_mode),
        Some(Commands::Serve { host, port }) => {
            cmd_serve(&cli.site, &cli.settings, &host, port).await
        }
        None => {
            // No subcommand - check the site by default
            cmd_check(&cli.site, &cli.settings, json_mode)
        }
    }
}
