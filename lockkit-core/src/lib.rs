//! Device lock-state engine for the LockKit mobile wallet.
//!
//! The wallet app must re-challenge the user (PIN or biometrics) after
//! being backgrounded past a configurable grace period, and always on a
//! fresh launch while a session is present. This crate owns that policy;
//! the host app owns the screens and the platform.
//!
//! # Architecture
//!
//! - [`LockController`] — the state machine. Consumes the session signal
//!   and the platform lifecycle stream, exposes the lock flag, an
//!   `unlock()` operation and the auto-lock preference.
//! - [`UnlockFlow`] — drives the lock screen: PIN verification and the
//!   biometric challenge, with the no-PIN escape hatch.
//! - [`CredentialManager`] — PIN lifecycle and the biometric opt-in,
//!   driven by the security settings screen.
//! - [`timeout_options`] — the closed catalog the settings screen renders.
//!
//! # Platform integration
//!
//! Everything platform-specific is injected by the host through
//! foreign-implemented traits:
//!
//! - [`PreferenceStore`] — key-value persistence (three flat keys)
//! - [`BiometricAuthenticator`] — hardware query, enrollment query and the
//!   modal challenge prompt
//! - [`LockStateListener`] — lock-flag observation for the root UI
//! - [`logger::Logger`] — the app's log sink
//!
//! The host forwards its lifecycle notifications
//! ([`AppLifecycleState`]) and session changes ([`SessionStatus`]) into
//! the controller; nothing here polls.

mod clock;
mod controller;
mod credentials;
mod error;
mod lifecycle;
pub mod logger;
mod settings;
mod store;
mod unlock;

pub use clock::{Clock, SystemClock};
pub use controller::{LockController, LockStateListener, SessionStatus};
pub use credentials::{CredentialManager, MAX_PIN_LEN, MIN_PIN_LEN};
pub use error::{BiometricError, CredentialError, StoreError, StoreResult, UnlockError};
pub use lifecycle::AppLifecycleState;
pub use settings::{timeout_options, AutoLockTimeout, TimeoutOption};
pub use store::PreferenceStore;
pub use unlock::{BiometricAuthenticator, UnlockFlow, UnlockGate};

#[cfg(test)]
pub(crate) mod test_support;

uniffi::setup_scaffolding!("lockkit_core");
