//! Application lifecycle observation.
//!
//! The host app forwards its platform lifecycle notifications into the
//! controller; this module reduces that stream to the two edges the lock
//! policy cares about: leaving the foreground, and returning to it with a
//! measured time away. No polling happens anywhere; the engine is entirely
//! event-driven.

/// Application lifecycle states as reported by the host platform.
///
/// `Background` and `Inactive` are treated identically: both mean the app
/// stopped being the foreground-visible process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum AppLifecycleState {
    /// The app is foregrounded and interactive.
    Active,
    /// The app is fully backgrounded.
    Background,
    /// The app is obscured or transitioning (system sheet, app switcher).
    Inactive,
}

impl AppLifecycleState {
    pub(crate) const fn is_hidden(self) -> bool {
        matches!(self, Self::Background | Self::Inactive)
    }
}

/// Edge produced by feeding one reported state into the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleEdge {
    /// No relevant change (e.g. inactive to background, or a repeat).
    None,
    /// The app left the foreground.
    Hidden,
    /// The app returned to the foreground after `elapsed_secs` away.
    Resumed {
        /// Wall-clock seconds between the hidden edge and this one.
        elapsed_secs: u64,
    },
}

/// Tracks when the app left the foreground.
///
/// The timestamp is in-memory only. A cold start always finds it absent, so
/// the first resume reads as zero elapsed; the fresh-launch lock challenge
/// is the session edge's job, not this one's.
#[derive(Debug)]
pub(crate) struct BackgroundMonitor {
    current: AppLifecycleState,
    backgrounded_at: Option<u64>,
}

impl BackgroundMonitor {
    pub const fn new() -> Self {
        Self {
            current: AppLifecycleState::Active,
            backgrounded_at: None,
        }
    }

    /// Feeds the next reported state and returns the resulting edge.
    ///
    /// Only the active->hidden edge records a timestamp; hidden->hidden
    /// moves (iOS reports inactive before background) must not reset it,
    /// or the grace period would restart mid-trip.
    pub fn observe(&mut self, next: AppLifecycleState, now_unix_secs: u64) -> LifecycleEdge {
        let previous = self.current;
        self.current = next;

        if previous == AppLifecycleState::Active && next.is_hidden() {
            self.backgrounded_at = Some(now_unix_secs);
            return LifecycleEdge::Hidden;
        }
        if previous.is_hidden() && next == AppLifecycleState::Active {
            let elapsed_secs = self
                .backgrounded_at
                .take()
                .map_or(0, |at| now_unix_secs.saturating_sub(at));
            return LifecycleEdge::Resumed { elapsed_secs };
        }
        LifecycleEdge::None
    }
}
