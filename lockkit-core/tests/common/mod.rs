//! Common test utilities shared across integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use lockkit_core::{
    BiometricAuthenticator, BiometricError, Clock, LockController, PreferenceStore, StoreResult,
    UnlockFlow,
};

pub struct InMemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: String) -> StoreResult<Option<String>> {
        let guard = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(&key).cloned())
    }

    fn set(&self, key: String, value: String) -> StoreResult<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
        Ok(())
    }

    fn remove(&self, key: String) -> StoreResult<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        Ok(())
    }
}

pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_unix_secs: u64) -> Self {
        Self {
            now: AtomicU64::new(start_unix_secs),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A biometric authenticator that always succeeds.
pub struct AlwaysPassBiometrics;

impl BiometricAuthenticator for AlwaysPassBiometrics {
    fn is_hardware_available(&self) -> bool {
        true
    }

    fn is_enrolled(&self) -> bool {
        true
    }

    fn authenticate(&self, _reason: String) -> Result<(), BiometricError> {
        Ok(())
    }
}

/// A fully wired engine over shared fakes.
pub struct TestApp {
    pub store: Arc<InMemoryPreferenceStore>,
    pub clock: Arc<ManualClock>,
    pub controller: Arc<LockController>,
    pub flow: UnlockFlow,
}

impl TestApp {
    pub fn launch() -> Self {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let controller = Arc::new(LockController::with_clock(
            Arc::clone(&store) as Arc<dyn PreferenceStore>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        ));
        let flow = UnlockFlow::new(
            Arc::clone(&store) as Arc<dyn PreferenceStore>,
            Arc::new(AlwaysPassBiometrics),
            Arc::clone(&controller),
        );
        Self {
            store,
            clock,
            controller,
            flow,
        }
    }

    /// Relaunches over the same store: fresh controller and flow, fresh
    /// in-memory state, persisted preferences intact.
    pub fn relaunch(self) -> Self {
        let controller = Arc::new(LockController::with_clock(
            Arc::clone(&self.store) as Arc<dyn PreferenceStore>,
            Arc::clone(&self.clock) as Arc<dyn Clock>,
        ));
        let flow = UnlockFlow::new(
            Arc::clone(&self.store) as Arc<dyn PreferenceStore>,
            Arc::new(AlwaysPassBiometrics),
            Arc::clone(&controller),
        );
        Self {
            store: self.store,
            clock: self.clock,
            controller,
            flow,
        }
    }
}
