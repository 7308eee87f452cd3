// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod render;
pub mod types;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{ensure_supported_platform, load_and_validate};
use crate::engine::{Runtime, RuntimeEvent, Termination};
use crate::errors::Result;
use crate::exec::ProcessExecutor;
use crate::exec::shell::ProcessorLookup;
use crate::render::TerminalDisplay;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the platform gate
/// - argument validation and command resolution
/// - process executor and terminal display
/// - the scheduling runtime
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<Termination> {
    ensure_supported_platform(std::env::consts::OS)?;

    let (config, command) = load_and_validate(&args, &ProcessorLookup::system())?;
    info!(
        command = %command.display_line(),
        interval = %config.interval_label(),
        "watching command"
    );

    let runtime = Runtime::new(config, command, ProcessExecutor::new(), TerminalDisplay::stdout());

    // Ctrl-C → graceful shutdown.
    {
        let tx = runtime.event_sender();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    runtime.run().await
}
