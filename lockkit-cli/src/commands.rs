//! CLI command definitions and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lockkit_core::{
    timeout_options, AutoLockTimeout, CredentialManager, LockController, PreferenceStore,
};

use crate::sim;
use crate::store::JsonFileStore;

/// LockKit developer CLI.
#[derive(Parser)]
#[command(name = "lockkit")]
#[command(about = "Drive the LockKit lock engine from a terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the JSON preference store
    #[arg(long, env = "LOCKKIT_STORE", global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored credential and preference state
    Status,

    /// PIN management
    #[command(subcommand)]
    Pin(PinCommands),

    /// Auto-lock timeout preference
    #[command(subcommand)]
    Timeout(TimeoutCommands),

    /// Interactive lifecycle simulation with a controlled clock
    Simulate,
}

#[derive(Subcommand)]
enum PinCommands {
    /// Store the first PIN
    Set {
        /// The PIN (4-6 characters)
        pin: String,
    },

    /// Replace the stored PIN
    Change {
        /// The current PIN
        current: String,
        /// The replacement PIN (4-6 characters)
        new_pin: String,
    },

    /// Remove the stored PIN (also disables biometric unlock)
    Clear {
        /// The current PIN
        current: String,
    },

    /// Toggle biometric unlock
    Biometrics {
        /// `on` or `off`
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

#[derive(Subcommand)]
enum TimeoutCommands {
    /// Print the active auto-lock timeout
    Get,

    /// Persist a new auto-lock timeout by its seconds encoding
    Set {
        /// One of: 0, 15, 60, 300, 900, -1
        seconds: i64,
    },

    /// List the available choices
    List,
}

/// Run the parsed CLI invocation.
pub fn run(cli: Cli) -> eyre::Result<()> {
    let store: Arc<dyn PreferenceStore> = Arc::new(JsonFileStore::open(cli.store)?);

    match cli.command {
        Commands::Status => {
            let credentials = CredentialManager::new(Arc::clone(&store));
            let controller = LockController::new(Arc::clone(&store));
            let timeout = controller.auto_lock_timeout();
            println!(
                "pin set:           {}",
                if credentials.has_pin() { "yes" } else { "no" }
            );
            println!(
                "biometric unlock:  {}",
                if credentials.biometric_unlock_enabled() {
                    "on"
                } else {
                    "off"
                }
            );
            println!(
                "auto-lock timeout: {} ({}s)",
                timeout.label(),
                timeout.as_seconds()
            );
        }

        Commands::Pin(command) => {
            let credentials = CredentialManager::new(store);
            match command {
                PinCommands::Set { pin } => {
                    credentials.set_pin(pin)?;
                    println!("pin stored");
                }
                PinCommands::Change { current, new_pin } => {
                    credentials.change_pin(current, new_pin)?;
                    println!("pin changed");
                }
                PinCommands::Clear { current } => {
                    credentials.clear_pin(current)?;
                    println!("pin removed, biometric unlock disabled");
                }
                PinCommands::Biometrics { state } => {
                    let enabled = state == "on";
                    credentials.set_biometric_unlock_enabled(enabled);
                    println!(
                        "biometric unlock {}",
                        if enabled { "enabled" } else { "disabled" }
                    );
                }
            }
        }

        Commands::Timeout(command) => {
            let controller = LockController::new(store);
            match command {
                TimeoutCommands::Get => {
                    let timeout = controller.auto_lock_timeout();
                    println!("{} ({}s)", timeout.label(), timeout.as_seconds());
                }
                TimeoutCommands::Set { seconds } => {
                    let timeout = AutoLockTimeout::from_seconds(seconds).ok_or_else(|| {
                        eyre::eyre!(
                            "{seconds} is not a valid choice; run `lockkit timeout list`"
                        )
                    })?;
                    controller.set_auto_lock_timeout(timeout);
                    println!("auto-lock timeout set to {}", timeout.label());
                }
                TimeoutCommands::List => {
                    for option in timeout_options() {
                        println!("{:>5}  {}", option.seconds, option.label);
                    }
                }
            }
        }

        Commands::Simulate => sim::run(store)?,
    }

    Ok(())
}
