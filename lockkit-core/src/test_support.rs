//! In-memory fakes for exercising the engine without a host platform.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::clock::Clock;
use crate::controller::LockStateListener;
use crate::error::{BiometricError, StoreError, StoreResult};
use crate::store::PreferenceStore;
use crate::unlock::BiometricAuthenticator;

pub struct InMemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }

    /// Seeds a value directly, bypassing the trait surface.
    pub fn insert(&self, key: &str, value: &str) -> &Self {
        self.guard().insert(key.to_string(), value.to_string());
        self
    }

    /// Deletes a value directly, bypassing the trait surface.
    pub fn remove_key(&self, key: &str) {
        self.guard().remove(key);
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: String) -> StoreResult<Option<String>> {
        Ok(self.guard().get(&key).cloned())
    }

    fn set(&self, key: String, value: String) -> StoreResult<()> {
        self.guard().insert(key, value);
        Ok(())
    }

    fn remove(&self, key: String) -> StoreResult<()> {
        self.guard().remove(&key);
        Ok(())
    }
}

/// A store whose every operation fails, for the fail-open paths.
pub struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn get(&self, _key: String) -> StoreResult<Option<String>> {
        Err(StoreError::Read("store unavailable".to_string()))
    }

    fn set(&self, _key: String, _value: String) -> StoreResult<()> {
        Err(StoreError::Write("store unavailable".to_string()))
    }

    fn remove(&self, _key: String) -> StoreResult<()> {
        Err(StoreError::Write("store unavailable".to_string()))
    }
}

/// A clock advanced by hand.
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

/// A biometric authenticator with scripted availability and outcomes.
pub struct ScriptedBiometrics {
    hardware_available: AtomicBool,
    enrolled: AtomicBool,
    next_error: Mutex<Option<BiometricError>>,
}

impl ScriptedBiometrics {
    /// Hardware present, user enrolled, challenges succeed.
    pub fn ready() -> Self {
        Self {
            hardware_available: AtomicBool::new(true),
            enrolled: AtomicBool::new(true),
            next_error: Mutex::new(None),
        }
    }

    pub fn set_hardware_available(&self, available: bool) {
        self.hardware_available.store(available, Ordering::SeqCst);
    }

    pub fn set_enrolled(&self, enrolled: bool) {
        self.enrolled.store(enrolled, Ordering::SeqCst);
    }

    /// Makes the next challenge resolve with `error`.
    pub fn fail_next(&self, error: BiometricError) {
        *self
            .next_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
    }
}

impl BiometricAuthenticator for ScriptedBiometrics {
    fn is_hardware_available(&self) -> bool {
        self.hardware_available.load(Ordering::SeqCst)
    }

    fn is_enrolled(&self) -> bool {
        self.enrolled.load(Ordering::SeqCst)
    }

    fn authenticate(&self, _reason: String) -> Result<(), BiometricError> {
        match self
            .next_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Records every lock-state callback it receives.
pub struct RecordingListener {
    events: Mutex<Vec<bool>>,
}

impl Default for RecordingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingListener {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<bool> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LockStateListener for RecordingListener {
    fn on_lock_changed(&self, locked: bool) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(locked);
    }
}
