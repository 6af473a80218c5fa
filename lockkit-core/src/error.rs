//! Error taxonomy for the lock engine.
//!
//! Every error here is recoverable by design: store trouble degrades to
//! safe defaults, and unlock failures leave the user on the lock screen
//! with a retry path. Nothing in this crate may strand the user without a
//! way back into the app.

use thiserror::Error;

/// Result type for preference store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the host's preference store.
#[derive(Debug, Error, uniffi::Error)]
pub enum StoreError {
    /// A read from the backing storage failed.
    #[error("store read failed: {0}")]
    Read(String),

    /// A write to the backing storage failed.
    #[error("store write failed: {0}")]
    Write(String),

    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for StoreError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}

/// Errors raised while managing the PIN credential.
#[derive(Debug, Error, uniffi::Error)]
pub enum CredentialError {
    /// The supplied PIN is outside the accepted length range.
    #[error("pin must be {min} to {max} characters")]
    InvalidLength {
        /// Shortest accepted length.
        min: u8,
        /// Longest accepted length.
        max: u8,
    },

    /// A PIN is already stored; replacing it requires the current one.
    #[error("a pin is already set")]
    AlreadySet,

    /// The supplied current PIN does not match the stored one.
    #[error("incorrect pin")]
    IncorrectPin,

    /// No PIN is currently stored.
    #[error("no pin is set")]
    NotSet,
}

/// Outcomes of a platform biometric challenge, reported by the host.
#[derive(Debug, Error, uniffi::Error)]
pub enum BiometricError {
    /// The device has no compatible biometric hardware.
    #[error("biometric hardware unavailable")]
    Unavailable,

    /// The user has not enrolled any biometrics with the platform.
    #[error("no biometrics enrolled")]
    NotEnrolled,

    /// The user dismissed the platform prompt.
    #[error("biometric prompt canceled")]
    Canceled,

    /// The platform reported a failure.
    #[error("biometric challenge failed: {0}")]
    Failed(String),

    /// Unexpected `UniFFI` callback error.
    #[error("unexpected uniffi callback error: {0}")]
    UnexpectedUniFFICallbackError(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for BiometricError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFFICallbackError(error.reason)
    }
}

/// Errors surfaced by the unlock flow.
///
/// All variants are recoverable: the lock screen shows a transient message
/// and the user may retry or switch to the other verification path.
#[derive(Debug, Error, uniffi::Error)]
pub enum UnlockError {
    /// The entered PIN does not match the stored one. The lock screen
    /// clears the input; no attempt limit is enforced.
    #[error("incorrect pin")]
    IncorrectPin,

    /// Biometric unlock cannot be offered right now (hardware, enrollment,
    /// or opt-in missing).
    #[error("biometric unlock unavailable")]
    BiometricUnavailable,

    /// The user dismissed the biometric prompt.
    #[error("biometric prompt canceled")]
    BiometricCanceled,

    /// The biometric challenge failed.
    #[error("biometric challenge failed: {0}")]
    BiometricFailed(String),
}

impl From<BiometricError> for UnlockError {
    fn from(error: BiometricError) -> Self {
        match error {
            BiometricError::Unavailable | BiometricError::NotEnrolled => {
                Self::BiometricUnavailable
            }
            BiometricError::Canceled => Self::BiometricCanceled,
            BiometricError::Failed(reason)
            | BiometricError::UnexpectedUniFFICallbackError(reason) => {
                Self::BiometricFailed(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biometric_error_maps_to_recoverable_unlock_error() {
        assert!(matches!(
            UnlockError::from(BiometricError::Unavailable),
            UnlockError::BiometricUnavailable
        ));
        assert!(matches!(
            UnlockError::from(BiometricError::NotEnrolled),
            UnlockError::BiometricUnavailable
        ));
        assert!(matches!(
            UnlockError::from(BiometricError::Canceled),
            UnlockError::BiometricCanceled
        ));
        match UnlockError::from(BiometricError::Failed("sensor busy".to_string())) {
            UnlockError::BiometricFailed(reason) => assert_eq!(reason, "sensor busy"),
            other => panic!("unexpected mapping: {other}"),
        }
    }
}
