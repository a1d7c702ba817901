//! # Ticket Desk Library
//!
//! Counter application around `ticket-core`: configuration, the current
//! batch, and the commands an operator runs.
//!
//! ## Module Organization
//! ```text
//! ticket_desk/
//! ├── lib.rs          ◄─── You are here (logging, config, dispatch)
//! ├── cli.rs          ◄─── clap subcommands and form flags
//! ├── shell.rs        ◄─── Interactive session over one BatchSession
//! ├── render.rs       ◄─── Plain-text ticket layout
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Current batch slot
//! │   └── config.rs   ◄─── Event, currency and id scheme
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── batch.rs    ◄─── Preview / generate / print / export / clear
//! │   └── config.rs   ◄─── Config and class catalogue
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use state::ConfigState;

/// Runs the counter application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO (debug for ticket crates), override with RUST_LOG   │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • TICKET_* environment variables over defaults                      │
/// │     • Invalid values stop startup                                       │
/// │                                                                         │
/// │  3. Parse Command Line & Dispatch ────────────────────────────────────► │
/// │     • Results to stdout, logs to stderr                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = ConfigState::from_env().context("invalid configuration")?;
    info!(
        event = %config.event.name,
        code = %config.event.code,
        scheme = %config.id_scheme,
        "Starting Ticket Desk"
    );

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli.run(&config, &mut out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ticket_core=trace` - Trace the engine only
/// - Default: INFO, DEBUG for the ticket crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ticket_core=debug,ticket_desk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
