//! Auto-lock timeout preference.

use strum::{EnumIter, IntoEnumIterator};

/// How long the app may stay backgrounded before it re-locks.
///
/// A closed set: the settings screen renders exactly these choices, so no
/// validation path for arbitrary durations exists. The stored encoding is
/// the seconds value ([`Self::as_seconds`]); `Never` only disables the
/// background timeout, a fresh launch while signed in still locks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, uniffi::Enum, EnumIter)]
pub enum AutoLockTimeout {
    /// Re-lock as soon as the app was backgrounded at all.
    #[default]
    Immediately,
    /// 15-second grace period.
    FifteenSeconds,
    /// 1-minute grace period.
    OneMinute,
    /// 5-minute grace period.
    FiveMinutes,
    /// 15-minute grace period.
    FifteenMinutes,
    /// Never re-lock while backgrounded.
    Never,
}

impl AutoLockTimeout {
    /// Seconds encoding used in the preference store: `0` locks
    /// immediately, a positive value is the grace period, `-1` never locks.
    #[must_use]
    pub const fn as_seconds(self) -> i64 {
        match self {
            Self::Immediately => 0,
            Self::FifteenSeconds => 15,
            Self::OneMinute => 60,
            Self::FiveMinutes => 300,
            Self::FifteenMinutes => 900,
            Self::Never => -1,
        }
    }

    /// Decodes a stored seconds value. Returns `None` for anything outside
    /// the closed set.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Option<Self> {
        match seconds {
            0 => Some(Self::Immediately),
            15 => Some(Self::FifteenSeconds),
            60 => Some(Self::OneMinute),
            300 => Some(Self::FiveMinutes),
            900 => Some(Self::FifteenMinutes),
            -1 => Some(Self::Never),
            _ => None,
        }
    }

    /// Label shown by the settings screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediately => "Immediately",
            Self::FifteenSeconds => "15 seconds",
            Self::OneMinute => "1 minute",
            Self::FiveMinutes => "5 minutes",
            Self::FifteenMinutes => "15 minutes",
            Self::Never => "Never",
        }
    }
}

/// One row of the settings screen's timeout picker.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TimeoutOption {
    /// The choice itself.
    pub timeout: AutoLockTimeout,
    /// Stored seconds encoding.
    pub seconds: i64,
    /// Human-readable label.
    pub label: String,
}

/// Returns the full timeout catalog in display order.
#[uniffi::export]
#[must_use]
pub fn timeout_options() -> Vec<TimeoutOption> {
    AutoLockTimeout::iter()
        .map(|timeout| TimeoutOption {
            timeout,
            seconds: timeout.as_seconds(),
            label: timeout.label().to_string(),
        })
        .collect()
}
