//! Developer CLI for the LockKit engine.
//!
//! Not shipped to users: this drives the same engine the mobile app embeds,
//! against a JSON-file preference store, so lock policy changes can be
//! exercised without a device build.

use std::sync::Arc;

use clap::Parser;

mod commands;
mod sim;
mod store;

use commands::Cli;
use lockkit_core::logger::{LogLevel, Logger};

/// Forwards engine log records into the CLI's `tracing` output.
struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "lockkit", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "lockkit", "{message}"),
            LogLevel::Info => tracing::info!(target: "lockkit", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "lockkit", "{message}"),
            LogLevel::Error => tracing::error!(target: "lockkit", "{message}"),
        }
    }
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
    lockkit_core::logger::set_logger(Arc::new(TracingLogger));

    commands::run(Cli::parse())
}
