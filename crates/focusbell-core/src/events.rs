use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every effective engine transition produces an Event.
/// No-op guards (pausing while paused, resuming while not pending) produce none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Started {
        mode: Mode,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    Reset {
        mode: Mode,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: Mode,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and the alarm fires now. Emitted exactly once
    /// per expiration, either at the expiring tick or at the deferred resume.
    AlarmRaised {
        mode: Mode,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero while the host was hidden; dispatch is deferred
    /// until the host becomes visible again.
    AlarmDeferred {
        mode: Mode,
        at: DateTime<Utc>,
    },
    /// The user stopped the alarm; the timer is back at rest.
    AlarmAcknowledged {
        mode: Mode,
        at: DateTime<Utc>,
    },
    FocusDurationChanged {
        minutes: u64,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
}
