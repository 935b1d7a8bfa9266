//! Alarm boundary: desktop notification plus looped bell audio.
//!
//! The dispatcher is the single place an expiration turns into side effects.
//! It fires at most once per expiration; the engine decides *when* that
//! moment is (immediately, or deferred to the visibility resume).

mod audio;
mod notify;

pub use audio::{BellAudio, BellLoop};
pub use notify::DesktopNotifier;

use tracing::{debug, warn};

use crate::error::Result;
use crate::timer::Mode;

/// One-shot system notification channel.
pub trait Notifier {
    /// Whether notification permission is currently granted.
    fn is_granted(&self) -> bool;

    fn show(&self, title: &str, body: &str) -> Result<()>;
}

/// Looped alarm playback channel.
pub trait AlarmAudio {
    fn play_looped(&mut self) -> Result<()>;

    /// Halt playback and reset its position. Must be idempotent.
    fn stop(&mut self);

    /// Whether the host allows starting playback right now.
    fn playback_allowed(&self) -> bool;
}

/// Fires the alarm for an expiration exactly once.
///
/// The two channels are attempted independently: a failure in one is logged
/// and never blocks the other. Denied notification permission and blocked
/// playback are expected degraded conditions, not failures.
pub struct AlarmDispatcher<N, A> {
    notifier: N,
    audio: A,
    fired: bool,
}

impl<N: Notifier, A: AlarmAudio> AlarmDispatcher<N, A> {
    pub fn new(notifier: N, audio: A) -> Self {
        Self {
            notifier,
            audio,
            fired: false,
        }
    }

    pub fn dispatch(&mut self, mode: Mode) {
        if self.fired {
            debug!("alarm already fired for this expiration");
            return;
        }
        self.fired = true;

        if self.notifier.is_granted() {
            let title = format!("{} finished", mode.label());
            if let Err(e) = self.notifier.show(&title, "Time is up.") {
                warn!("notification failed: {e}");
            }
        }

        if self.audio.playback_allowed() {
            if let Err(e) = self.audio.play_looped() {
                warn!("alarm playback failed: {e}");
            }
        }
    }

    /// Halt looped playback. Safe to call in any state.
    pub fn stop(&mut self) {
        self.audio.stop();
    }

    /// Clear the fired flag ahead of the next expiration.
    pub fn rearm(&mut self) {
        self.fired = false;
    }
}
