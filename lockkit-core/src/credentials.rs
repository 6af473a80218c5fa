//! PIN credential and biometric opt-in management.
//!
//! The PIN is persisted verbatim and compared for exact equality. That is
//! the contract existing installs rely on, not a recommendation; see the
//! security notes in DESIGN.md. In-memory copies are zeroized on drop and
//! the comparison is constant-time over the byte contents, neither of which
//! changes observable behavior.

use std::sync::Arc;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::CredentialError;
use crate::store::{PreferenceStore, Preferences};

/// Shortest accepted PIN, in characters.
pub const MIN_PIN_LEN: u8 = 4;
/// Longest accepted PIN, in characters.
pub const MAX_PIN_LEN: u8 = 6;

/// Manages the stored PIN and the biometric opt-in flag.
///
/// Driven by the app's security settings screen. The unlock path itself
/// lives in [`UnlockFlow`](crate::UnlockFlow).
#[derive(uniffi::Object)]
pub struct CredentialManager {
    preferences: Preferences,
}

#[uniffi::export]
impl CredentialManager {
    /// Creates a manager over the host's preference store.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            preferences: Preferences::new(store),
        }
    }

    /// Whether a PIN credential is currently stored.
    #[must_use]
    pub fn has_pin(&self) -> bool {
        self.preferences.pin().is_some()
    }

    /// Stores the first PIN. Replacing an existing one goes through
    /// [`Self::change_pin`] so the current PIN is always verified first.
    ///
    /// # Errors
    ///
    /// [`CredentialError::InvalidLength`] for a PIN outside 4–6 characters,
    /// [`CredentialError::AlreadySet`] if one is already stored.
    pub fn set_pin(&self, pin: String) -> Result<(), CredentialError> {
        let pin = Zeroizing::new(pin);
        validate_pin(&pin)?;
        if self.preferences.pin().is_some() {
            return Err(CredentialError::AlreadySet);
        }
        self.preferences.set_pin(&pin);
        log::info!("pin credential stored");
        Ok(())
    }

    /// Replaces the stored PIN after verifying the current one.
    ///
    /// # Errors
    ///
    /// [`CredentialError::NotSet`] when no PIN exists,
    /// [`CredentialError::IncorrectPin`] when `current` does not match,
    /// [`CredentialError::InvalidLength`] for an invalid replacement.
    pub fn change_pin(&self, current: String, new_pin: String) -> Result<(), CredentialError> {
        let current = Zeroizing::new(current);
        let new_pin = Zeroizing::new(new_pin);
        validate_pin(&new_pin)?;
        self.verify(&current)?;
        self.preferences.set_pin(&new_pin);
        log::info!("pin credential changed");
        Ok(())
    }

    /// Removes the stored PIN after verifying the current one. Also clears
    /// the biometric opt-in: biometrics gate nothing without a PIN.
    ///
    /// # Errors
    ///
    /// [`CredentialError::NotSet`] when no PIN exists,
    /// [`CredentialError::IncorrectPin`] when `current` does not match.
    pub fn clear_pin(&self, current: String) -> Result<(), CredentialError> {
        let current = Zeroizing::new(current);
        self.verify(&current)?;
        self.preferences.clear_pin();
        self.preferences.set_biometric_enabled(false);
        log::info!("pin credential removed");
        Ok(())
    }

    /// Whether the user opted in to biometric unlock.
    #[must_use]
    pub fn biometric_unlock_enabled(&self) -> bool {
        self.preferences.biometric_enabled()
    }

    /// Persists the biometric opt-in flag.
    pub fn set_biometric_unlock_enabled(&self, enabled: bool) {
        self.preferences.set_biometric_enabled(enabled);
    }
}

impl CredentialManager {
    fn verify(&self, candidate: &str) -> Result<(), CredentialError> {
        let stored = self.preferences.pin().ok_or(CredentialError::NotSet)?;
        if pin_matches(&stored, candidate) {
            Ok(())
        } else {
            Err(CredentialError::IncorrectPin)
        }
    }
}

/// Exact-equality PIN comparison, constant-time over the byte contents.
/// Differing lengths compare unequal.
pub(crate) fn pin_matches(stored: &str, candidate: &str) -> bool {
    stored.as_bytes().ct_eq(candidate.as_bytes()).into()
}

fn validate_pin(pin: &str) -> Result<(), CredentialError> {
    let length = pin.chars().count();
    if length < usize::from(MIN_PIN_LEN) || length > usize::from(MAX_PIN_LEN) {
        return Err(CredentialError::InvalidLength {
            min: MIN_PIN_LEN,
            max: MAX_PIN_LEN,
        });
    }
    Ok(())
}
