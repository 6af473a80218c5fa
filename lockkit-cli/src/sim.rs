//! Interactive lifecycle simulation.
//!
//! Drives a full engine (controller + unlock flow) with a manual clock, so
//! auto-lock behavior can be exercised without waiting out real grace
//! periods. Reads one command per stdin line; `help` lists them.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use lockkit_core::{
    AppLifecycleState, AutoLockTimeout, BiometricAuthenticator, BiometricError, Clock,
    CredentialManager, LockController, LockStateListener, PreferenceStore, SessionStatus,
    UnlockFlow,
};

const SIM_EPOCH: u64 = 1_700_000_000;

struct SimClock {
    now: AtomicU64,
}

impl SimClock {
    const fn new() -> Self {
        Self {
            now: AtomicU64::new(SIM_EPOCH),
        }
    }

    fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for SimClock {
    fn now_unix_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Biometrics with always-present hardware and a scriptable next outcome.
struct SimBiometrics {
    fail_next: Mutex<Option<BiometricError>>,
}

impl SimBiometrics {
    const fn new() -> Self {
        Self {
            fail_next: Mutex::new(None),
        }
    }

    fn cancel_next(&self) {
        *self
            .fail_next
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(BiometricError::Canceled);
    }
}

impl BiometricAuthenticator for SimBiometrics {
    fn is_hardware_available(&self) -> bool {
        true
    }

    fn is_enrolled(&self) -> bool {
        true
    }

    fn authenticate(&self, _reason: String) -> Result<(), BiometricError> {
        match self
            .fail_next
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

struct PrintListener;

impl LockStateListener for PrintListener {
    fn on_lock_changed(&self, locked: bool) {
        println!("== {}", if locked { "LOCKED" } else { "unlocked" });
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SimCommand {
    Login,
    Logout,
    Background(u64),
    Foreground,
    Advance(u64),
    Gate,
    Pin(String),
    Biometric,
    CancelNextBiometric,
    Timeout(i64),
    Status,
    Help,
    Quit,
}

fn parse(line: &str) -> Result<SimCommand, String> {
    let mut parts = line.split_whitespace();
    let command = parts.next().ok_or_else(String::new)?;
    let argument = parts.next();
    let parsed = match (command, argument) {
        ("login", None) => SimCommand::Login,
        ("logout", None) => SimCommand::Logout,
        ("bg", secs) => SimCommand::Background(parse_secs(secs.unwrap_or("0"))?),
        ("fg", None) => SimCommand::Foreground,
        ("advance", Some(secs)) => SimCommand::Advance(parse_secs(secs)?),
        ("gate", None) => SimCommand::Gate,
        ("pin", Some(pin)) => SimCommand::Pin(pin.to_string()),
        ("bio", None) => SimCommand::Biometric,
        ("bio-cancel", None) => SimCommand::CancelNextBiometric,
        ("timeout", Some(secs)) => SimCommand::Timeout(
            secs.parse::<i64>()
                .map_err(|_| format!("not a seconds value: {secs}"))?,
        ),
        ("status", None) => SimCommand::Status,
        ("help", None) => SimCommand::Help,
        ("quit" | "exit", None) => SimCommand::Quit,
        _ => return Err(format!("unknown command: {line} (try `help`)")),
    };
    Ok(parsed)
}

fn parse_secs(value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("not a seconds value: {value}"))
}

fn print_help() {
    println!("commands:");
    println!("  login            sign the session in");
    println!("  logout           sign the session out");
    println!("  bg [secs]        background the app, then advance the clock");
    println!("  fg               foreground the app (evaluates auto-lock)");
    println!("  advance <secs>   advance the clock without a transition");
    println!("  gate             mount the lock screen (no-PIN escape hatch)");
    println!("  pin <value>      attempt a PIN unlock");
    println!("  bio              attempt a biometric unlock");
    println!("  bio-cancel       make the next biometric prompt cancel");
    println!("  timeout <secs>   set auto-lock (0, 15, 60, 300, 900, -1)");
    println!("  status           show the engine state");
    println!("  quit             leave the simulation");
}

/// Run the simulation loop until `quit` or end of input.
pub fn run(store: Arc<dyn PreferenceStore>) -> eyre::Result<()> {
    let clock = Arc::new(SimClock::new());
    let biometrics = Arc::new(SimBiometrics::new());
    let controller = Arc::new(LockController::with_clock(
        Arc::clone(&store),
        Arc::clone(&clock) as Arc<dyn Clock>,
    ));
    controller.set_listener(Arc::new(PrintListener));
    let credentials = CredentialManager::new(Arc::clone(&store));
    let flow = UnlockFlow::new(
        Arc::clone(&store),
        Arc::clone(&biometrics) as Arc<dyn BiometricAuthenticator>,
        Arc::clone(&controller),
    );

    println!("lockkit simulation; `help` lists commands");
    let stdin = io::stdin();
    loop {
        print!("sim> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match command {
            SimCommand::Login => controller.session_changed(SessionStatus::SignedIn),
            SimCommand::Logout => controller.session_changed(SessionStatus::SignedOut),
            SimCommand::Background(secs) => {
                controller.report_lifecycle(AppLifecycleState::Background);
                clock.advance(secs);
            }
            SimCommand::Foreground => {
                controller.report_lifecycle(AppLifecycleState::Active);
            }
            SimCommand::Advance(secs) => clock.advance(secs),
            SimCommand::Gate => println!("gate: {:?}", flow.begin()),
            SimCommand::Pin(pin) => match flow.unlock_with_pin(pin) {
                Ok(()) => println!("pin accepted"),
                Err(err) => println!("{err}"),
            },
            SimCommand::Biometric => match flow.unlock_with_biometrics() {
                Ok(()) => println!("biometric accepted"),
                Err(err) => println!("{err}"),
            },
            SimCommand::CancelNextBiometric => biometrics.cancel_next(),
            SimCommand::Timeout(seconds) => match AutoLockTimeout::from_seconds(seconds) {
                Some(timeout) => controller.set_auto_lock_timeout(timeout),
                None => println!("{seconds} is not a valid choice"),
            },
            SimCommand::Status => {
                let timeout = controller.auto_lock_timeout();
                println!(
                    "locked: {} | pin set: {} | timeout: {} | clock: +{}s",
                    controller.is_locked(),
                    credentials.has_pin(),
                    timeout.label(),
                    clock.now_unix_secs() - SIM_EPOCH,
                );
            }
            SimCommand::Help => print_help(),
            SimCommand::Quit => break,
        }
    }
    Ok(())
}
