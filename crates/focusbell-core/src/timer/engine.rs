//! Countdown engine implementation.
//!
//! The engine is a wall-clock-anchored state machine. It owns no thread and
//! never reads the clock -- the caller passes the current time into every
//! transition, and `tick()` must be invoked periodically while running.
//!
//! While running, remaining time is always derived as
//! `anchor_deadline - now`. A tick that arrives late, bunched with others, or
//! not at all costs nothing but display freshness; the countdown itself
//! cannot drift.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | AlarmPending | AlarmActive) -> Idle
//! ```
//!
//! An expiration observed while the host is hidden lands in `AlarmPending`;
//! the alarm is raised later, at `resume_visible()`, exactly once.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{DurationTable, Mode};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    /// Expired while the host was hidden; the alarm is deferred until the
    /// host becomes visible again.
    AlarmPending,
    /// Alarm dispatched, waiting for the user to acknowledge it.
    AlarmActive,
}

/// Read-only view for presentation layers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub mode: Mode,
    pub remaining_ms: u64,
}

/// Core countdown state machine.
///
/// Operates on caller-supplied wall-clock instants -- no internal thread,
/// no internal clock. All guard violations are no-ops, never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    mode: Mode,
    durations: DurationTable,
    phase: Phase,
    /// Remaining time in milliseconds. Authoritative only while not running.
    remaining_ms: u64,
    /// Wall-clock instant (epoch ms) at which the running countdown reaches
    /// zero. Set exactly while `phase == Running`, cleared everywhere else.
    anchor_deadline_ms: Option<u64>,
    /// True once the current expiration's alarm has been raised.
    alarm_raised: bool,
}

impl CountdownEngine {
    /// Create an engine at rest in focus mode.
    pub fn new(durations: DurationTable) -> Self {
        let remaining_ms = durations.duration_ms(Mode::Focus);
        Self {
            mode: Mode::Focus,
            durations,
            phase: Phase::Idle,
            remaining_ms,
            anchor_deadline_ms: None,
            alarm_raised: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn durations(&self) -> &DurationTable {
        &self.durations
    }

    pub fn alarm_raised(&self) -> bool {
        self.alarm_raised
    }

    /// Remaining time at `now_ms`. While running this is derived from the
    /// anchor deadline; otherwise the stored value is returned as-is.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.anchor_deadline_ms {
            Some(deadline) => deadline.saturating_sub(now_ms),
            None => self.remaining_ms,
        }
    }

    pub fn snapshot(&self, now_ms: u64) -> Snapshot {
        Snapshot {
            phase: self.phase,
            mode: self.mode,
            remaining_ms: self.remaining_ms(now_ms),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op while running or alarmed.
    pub fn start(&mut self, now_ms: u64) -> Option<Event> {
        match self.phase {
            Phase::Idle | Phase::Paused => {
                self.phase = Phase::Running;
                self.alarm_raised = false;
                self.anchor_deadline_ms = Some(now_ms.saturating_add(self.remaining_ms));
                Some(Event::Started {
                    mode: self.mode,
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            Phase::Running | Phase::AlarmPending | Phase::AlarmActive => None,
        }
    }

    /// Stop the countdown, retaining the remaining time. No-op unless running.
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }
        self.remaining_ms = self.remaining_ms(now_ms);
        self.anchor_deadline_ms = None;
        self.phase = Phase::Paused;
        Some(Event::Paused {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    /// Periodic callback. `foreground` reflects host visibility at call time.
    ///
    /// Returns `AlarmRaised` when the deadline has passed and the host is
    /// visible, `AlarmDeferred` when it passed while hidden, `None` otherwise.
    pub fn tick(&mut self, now_ms: u64, foreground: bool) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }
        let Some(deadline) = self.anchor_deadline_ms else {
            return None;
        };
        if now_ms < deadline {
            // Still counting down; display reads `remaining_ms(now)` directly.
            return None;
        }
        self.remaining_ms = 0;
        self.anchor_deadline_ms = None;
        if foreground {
            self.phase = Phase::AlarmActive;
            self.alarm_raised = true;
            Some(Event::AlarmRaised {
                mode: self.mode,
                at: Utc::now(),
            })
        } else {
            self.phase = Phase::AlarmPending;
            Some(Event::AlarmDeferred {
                mode: self.mode,
                at: Utc::now(),
            })
        }
    }

    /// Host became visible. Raises a deferred alarm; no-op in every other
    /// phase, and never raises twice for the same expiration.
    pub fn resume_visible(&mut self) -> Option<Event> {
        if self.phase != Phase::AlarmPending {
            return None;
        }
        self.phase = Phase::AlarmActive;
        if self.alarm_raised {
            return None;
        }
        self.alarm_raised = true;
        Some(Event::AlarmRaised {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    /// User stopped the alarm. Re-homes to the current mode's full duration.
    pub fn acknowledge(&mut self) -> Option<Event> {
        match self.phase {
            Phase::AlarmPending | Phase::AlarmActive => {
                self.rehome(self.mode);
                Some(Event::AlarmAcknowledged {
                    mode: self.mode,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Switch modes. Unconditionally cancels any run or alarm in flight and
    /// discards partial progress.
    pub fn set_mode(&mut self, mode: Mode) -> Event {
        self.rehome(mode);
        Event::ModeChanged {
            mode,
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        }
    }

    /// Return to rest at the current mode's full duration, cancelling any
    /// run or alarm in flight.
    pub fn reset(&mut self) -> Event {
        self.rehome(self.mode);
        Event::Reset {
            mode: self.mode,
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        }
    }

    /// Change the focus duration preset. Rejected (no-op) outside the
    /// allow-list. Takes effect immediately only when idle in focus mode;
    /// otherwise at the next re-home of that mode.
    pub fn set_focus_minutes(&mut self, minutes: u64) -> Option<Event> {
        if !self.durations.set_focus_minutes(minutes) {
            return None;
        }
        if self.phase == Phase::Idle && self.mode == Mode::Focus {
            self.remaining_ms = self.durations.duration_ms(Mode::Focus);
        }
        Some(Event::FocusDurationChanged {
            minutes,
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn rehome(&mut self, mode: Mode) {
        self.mode = mode;
        self.phase = Phase::Idle;
        self.anchor_deadline_ms = None;
        self.alarm_raised = false;
        self.remaining_ms = self.durations.duration_ms(mode);
    }
}
