//! Engine-side logic for the lock screen.
//!
//! The host renders the PIN pad and (optionally) a biometric button; this
//! module decides which of those to present and verifies the credentials,
//! unlocking the controller on success. Every failure here is recoverable:
//! the user stays on the lock screen with both paths still open, and an
//! account with no PIN can never be locked out at all.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::controller::LockController;
use crate::credentials::pin_matches;
use crate::error::{BiometricError, UnlockError};
use crate::store::{PreferenceStore, Preferences};

/// Platform biometric capability, implemented by the host.
#[uniffi::export(with_foreign)]
pub trait BiometricAuthenticator: Send + Sync {
    /// Whether the device has compatible biometric hardware.
    fn is_hardware_available(&self) -> bool;

    /// Whether the user has enrolled biometrics with the platform.
    fn is_enrolled(&self) -> bool;

    /// Presents the platform biometric prompt and blocks until it resolves.
    /// The prompt is modal, so at most one challenge is in flight.
    ///
    /// # Errors
    ///
    /// Returns the platform outcome when the challenge does not succeed:
    /// cancellation, failure, or unavailability.
    fn authenticate(&self, reason: String) -> Result<(), BiometricError>;
}

/// What the lock screen must present, decided at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum UnlockGate {
    /// No PIN is stored; the flow already unlocked the controller and the
    /// lock screen should dismiss itself without prompting.
    NoCredential,
    /// A PIN is stored and must be verified.
    PinRequired {
        /// Whether the biometric path may be offered alongside the PIN pad.
        biometric_available: bool,
    },
}

/// Drives the lock screen.
#[derive(uniffi::Object)]
pub struct UnlockFlow {
    preferences: Preferences,
    biometrics: Arc<dyn BiometricAuthenticator>,
    controller: Arc<LockController>,
}

#[uniffi::export]
impl UnlockFlow {
    /// Creates a flow over the same store the controller uses.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        biometrics: Arc<dyn BiometricAuthenticator>,
        controller: Arc<LockController>,
    ) -> Self {
        Self {
            preferences: Preferences::new(store),
            biometrics,
            controller,
        }
    }

    /// Entry point for the lock screen's mount.
    ///
    /// An account with no PIN cannot be locked out: when nothing is stored
    /// the controller is unlocked on the spot and the gate says so. This is
    /// also what lets a first-time user reach the app to set a PIN at all.
    pub fn begin(&self) -> UnlockGate {
        if self.preferences.pin().is_none() {
            log::debug!("no pin credential stored; unlocking without challenge");
            self.controller.unlock();
            return UnlockGate::NoCredential;
        }
        UnlockGate::PinRequired {
            biometric_available: self.biometric_available(),
        }
    }

    /// Whether biometric unlock can be offered right now: compatible
    /// hardware, platform enrollment, and the user's opt-in all present.
    #[must_use]
    pub fn biometric_available(&self) -> bool {
        self.preferences.biometric_enabled()
            && self.biometrics.is_hardware_available()
            && self.biometrics.is_enrolled()
    }

    /// Verifies a PIN entry against the stored credential and unlocks on a
    /// match.
    ///
    /// # Errors
    ///
    /// [`UnlockError::IncorrectPin`] on mismatch. The lock screen clears
    /// the input and the user may retry; no attempt limit is enforced.
    pub fn unlock_with_pin(&self, pin: String) -> Result<(), UnlockError> {
        let pin = Zeroizing::new(pin);
        match self.preferences.pin() {
            // The escape hatch again: a PIN cleared while the lock screen
            // was up must not strand the user.
            None => {
                self.controller.unlock();
                Ok(())
            }
            Some(stored) if pin_matches(&stored, &pin) => {
                self.controller.unlock();
                Ok(())
            }
            Some(_) => {
                log::debug!("pin mismatch on unlock attempt");
                Err(UnlockError::IncorrectPin)
            }
        }
    }

    /// Runs the platform biometric challenge and unlocks on success.
    ///
    /// # Errors
    ///
    /// [`UnlockError::BiometricUnavailable`] when the path cannot be
    /// offered, otherwise the mapped platform outcome. All recoverable; the
    /// PIN path stays open.
    pub fn unlock_with_biometrics(&self) -> Result<(), UnlockError> {
        if !self.biometric_available() {
            return Err(UnlockError::BiometricUnavailable);
        }
        self.biometrics
            .authenticate("Unlock your wallet".to_string())?;
        self.controller.unlock();
        Ok(())
    }
}
