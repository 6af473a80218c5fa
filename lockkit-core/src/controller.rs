//! Lock state controller.
//!
//! Owns the locked/unlocked flag and derives it from three inputs: the
//! session signal, lifecycle edges, and explicit unlock calls. The flag is
//! never persisted. A fresh controller while signed in always starts
//! locked, which is what makes "always challenge on a fresh launch" hold
//! even when the host is a web view and "launch" is a page refresh.
//!
//! Transitions:
//!
//! - signed-out (or loading): unlocked; there is nothing to protect
//! - session appearing: locked, unconditionally
//! - foreground edge: locked when the measured time away satisfies the
//!   persisted auto-lock preference (re-read from the store at that edge)
//! - [`LockController::unlock`]: unlocked; the only way out while signed in
//!
//! The timeout is evaluated only at the foreground edge. A foregrounded,
//! unlocked app never re-locks on its own.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clock::{Clock, SystemClock};
use crate::lifecycle::{AppLifecycleState, BackgroundMonitor, LifecycleEdge};
use crate::settings::AutoLockTimeout;
use crate::store::{PreferenceStore, Preferences};

/// Authentication signal consumed from the session subsystem.
///
/// The lock engine only reads presence; the token and user profile stay
/// opaque to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum SessionStatus {
    /// Session restore is still in flight; lock state is not evaluated.
    Loading,
    /// No session is present.
    SignedOut,
    /// A session is present.
    SignedIn,
}

/// Callback interface for observing lock-state changes.
///
/// Implemented by the host so the root UI can swap between the app and the
/// lock screen without polling. Invoked only on actual changes. One slot:
/// the root UI registers on mount and clears on unmount, and a re-register
/// replaces rather than duplicates.
#[uniffi::export(with_foreign)]
pub trait LockStateListener: Send + Sync {
    /// Invoked after the lock flag changes, with the new value.
    fn on_lock_changed(&self, locked: bool);
}

struct ControllerState {
    session: SessionStatus,
    locked: bool,
    monitor: BackgroundMonitor,
}

/// The lock state machine.
#[derive(uniffi::Object)]
pub struct LockController {
    preferences: Preferences,
    clock: Arc<dyn Clock>,
    state: Mutex<ControllerState>,
    listener: Mutex<Option<Arc<dyn LockStateListener>>>,
}

#[uniffi::export]
impl LockController {
    /// Creates a controller over the host's preference store.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Current lock flag.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state_guard().locked
    }

    /// Registers the lock-state observer, replacing any previous one.
    pub fn set_listener(&self, listener: Arc<dyn LockStateListener>) {
        *self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    /// Drops the lock-state observer. Call on unmount so no callback
    /// reaches a view that no longer exists.
    pub fn clear_listener(&self) {
        *self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Reports a session change from the authentication subsystem.
    ///
    /// A session appearing forces the locked state (fresh launch and fresh
    /// login both challenge); a session disappearing clears it, so no
    /// leftover lock screen can block a logged-out app.
    pub fn session_changed(&self, session: SessionStatus) {
        let change = {
            let mut state = self.state_guard();
            let previous = state.session;
            state.session = session;
            let target = match session {
                SessionStatus::SignedIn if previous != SessionStatus::SignedIn => Some(true),
                SessionStatus::SignedOut => Some(false),
                _ => None,
            };
            match target {
                Some(locked) if state.locked != locked => {
                    state.locked = locked;
                    Some(locked)
                }
                _ => None,
            }
        };
        if let Some(locked) = change {
            if locked {
                log::debug!("session appeared; locking until credential check");
            }
            self.notify(locked);
        }
    }

    /// Forwards one platform lifecycle notification.
    ///
    /// The auto-lock preference is read back from the store here, so a
    /// choice made on the settings screen takes effect on the very next
    /// trip through the background.
    pub fn report_lifecycle(&self, state: AppLifecycleState) {
        let now = self.clock.now_unix_secs();
        // Read outside the state lock: the store is a foreign callback.
        let timeout = self.preferences.auto_lock();
        let newly_locked = {
            let mut guard = self.state_guard();
            match guard.monitor.observe(state, now) {
                LifecycleEdge::Resumed { elapsed_secs }
                    if guard.session == SessionStatus::SignedIn
                        && !guard.locked
                        && should_lock(timeout, elapsed_secs) =>
                {
                    log::debug!(
                        "re-locking after {elapsed_secs}s backgrounded (timeout {}s)",
                        timeout.as_seconds()
                    );
                    guard.locked = true;
                    true
                }
                _ => false,
            }
        };
        if newly_locked {
            self.notify(true);
        }
    }

    /// Clears the lock flag after a successful credential check.
    ///
    /// Idempotent: calling this while already unlocked changes nothing and
    /// notifies nobody.
    pub fn unlock(&self) {
        let changed = {
            let mut state = self.state_guard();
            let was_locked = state.locked;
            state.locked = false;
            was_locked
        };
        if changed {
            self.notify(false);
        }
    }

    /// The persisted auto-lock preference.
    #[must_use]
    pub fn auto_lock_timeout(&self) -> AutoLockTimeout {
        self.preferences.auto_lock()
    }

    /// Persists a new auto-lock preference. Takes effect at the next
    /// foreground edge.
    pub fn set_auto_lock_timeout(&self, timeout: AutoLockTimeout) {
        self.preferences.set_auto_lock(timeout);
    }
}

impl LockController {
    /// Creates a controller with an explicit time source.
    #[must_use]
    pub fn with_clock(store: Arc<dyn PreferenceStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            preferences: Preferences::new(store),
            clock,
            state: Mutex::new(ControllerState {
                session: SessionStatus::Loading,
                locked: false,
                monitor: BackgroundMonitor::new(),
            }),
            listener: Mutex::new(None),
        }
    }

    fn state_guard(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // The listener is invoked outside the state lock so a callback may
    // call back into the controller.
    fn notify(&self, locked: bool) {
        let listener = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(listener) = listener {
            listener.on_lock_changed(locked);
        }
    }
}

/// Lock predicate evaluated at the foreground edge.
pub(crate) const fn should_lock(timeout: AutoLockTimeout, elapsed_secs: u64) -> bool {
    match timeout.as_seconds() {
        0 => true,
        secs if secs < 0 => false,
        secs => elapsed_secs >= secs.unsigned_abs(),
    }
}
