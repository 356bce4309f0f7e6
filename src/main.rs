//! Interactive WebSocket debug console.
//!
//! Connects to `ws://127.0.0.1:8080/ws` and reads commands from stdin:
//!
//!   send <text>        send text verbatim
//!   sendJSON <json>    send a JSON value
//!   close              close the connection
//!
//! Exits once the connection is closed or stdin ends. Stdin is read on its
//! own thread, so a pending read at the terminal does not delay the exit.
//!
//! Usage:
//!   cargo run
//!   RUST_LOG=ws_debug_client=debug cargo run

// ============================================================================
// Imports
// ============================================================================

use tracing_subscriber::EnvFilter;
use ws_debug_client::console::{run_session, spawn_stdin_reader};
use ws_debug_client::{DebugSocketClient, Result};

// ============================================================================
// Constants
// ============================================================================

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "ws_debug_client=info";

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let lines = spawn_stdin_reader()?;
    let client = DebugSocketClient::connect();

    run_session(&client, lines).await;

    Ok(())
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
