//! Preference and credential persistence.
//!
//! The engine does not own a storage engine. The host app implements
//! [`PreferenceStore`] over whatever key-value facility the platform
//! provides and hands it in at construction time. Three flat keys are used,
//! all values are plain strings, and there is no schema versioning or
//! migration path.
//!
//! Storage trouble must never take down the host UI: reads that fail fall
//! back to the safe default (no PIN stored, biometrics off, immediate
//! lock), and writes that fail are logged and swallowed.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::error::StoreResult;
use crate::settings::AutoLockTimeout;

pub(crate) const PIN_KEY: &str = "lockkit.pin";
pub(crate) const BIOMETRIC_ENABLED_KEY: &str = "lockkit.biometric_enabled";
pub(crate) const AUTO_LOCK_SECONDS_KEY: &str = "lockkit.auto_lock_seconds";

/// Host-provided key-value storage.
///
/// Expected to be durable until explicitly overwritten or cleared by the
/// OS/user. No encryption is assumed beyond whatever sandboxing the
/// platform storage provides.
#[uniffi::export(with_foreign)]
pub trait PreferenceStore: Send + Sync {
    /// Reads the value stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get(&self, key: String) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&self, key: String, value: String) -> StoreResult<()>;

    /// Deletes the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn remove(&self, key: String) -> StoreResult<()>;
}

/// Typed, fail-open view over the raw store.
#[derive(Clone)]
pub(crate) struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// The stored PIN, if one is set. The returned buffer is zeroized on
    /// drop; the persisted value is the PIN verbatim.
    pub fn pin(&self) -> Option<Zeroizing<String>> {
        self.read(PIN_KEY).map(Zeroizing::new)
    }

    pub fn set_pin(&self, pin: &str) {
        self.write(PIN_KEY, pin);
    }

    pub fn clear_pin(&self) {
        if let Err(err) = self.store.remove(PIN_KEY.to_string()) {
            log::warn!("preference remove failed for {PIN_KEY}: {err}");
        }
    }

    pub fn biometric_enabled(&self) -> bool {
        self.read(BIOMETRIC_ENABLED_KEY)
            .is_some_and(|value| value == "true")
    }

    pub fn set_biometric_enabled(&self, enabled: bool) {
        self.write(BIOMETRIC_ENABLED_KEY, if enabled { "true" } else { "false" });
    }

    /// The persisted auto-lock preference. Absent, unreadable, or
    /// out-of-catalog values all fall back to the default (immediate lock).
    pub fn auto_lock(&self) -> AutoLockTimeout {
        self.read(AUTO_LOCK_SECONDS_KEY)
            .and_then(|value| value.parse::<i64>().ok())
            .and_then(AutoLockTimeout::from_seconds)
            .unwrap_or_default()
    }

    pub fn set_auto_lock(&self, timeout: AutoLockTimeout) {
        self.write(AUTO_LOCK_SECONDS_KEY, &timeout.as_seconds().to_string());
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key.to_string()) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("preference read failed for {key}: {err}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key.to_string(), value.to_string()) {
            log::warn!("preference write failed for {key}: {err}");
        }
    }
}
