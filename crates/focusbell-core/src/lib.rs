//! # Focusbell Core Library
//!
//! This library provides the core logic for Focusbell, a focus/break interval
//! countdown timer. All timing behavior lives here; hosts (such as the CLI
//! binary) supply the periodic ticks, the visibility signal, and the terminal
//! or GUI presentation.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: A wall-clock-anchored state machine. Remaining time
//!   is always recomputed from the anchor deadline, never accumulated per
//!   tick, so delayed or missed ticks cannot drift the countdown
//! - **Alarm Dispatcher**: Fires the desktop notification and the looped bell
//!   exactly once per expiration, deferring the alarm while the host is
//!   hidden
//! - **Storage**: TOML-based configuration holding the focus-duration
//!   preference and notification settings
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: Core countdown state machine
//! - [`TimerController`]: Clock, visibility, and alarm wiring around the engine
//! - [`AlarmDispatcher`]: Exactly-once alarm boundary
//! - [`Config`]: Application configuration management

pub mod alert;
pub mod clock;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use alert::{AlarmAudio, AlarmDispatcher, BellAudio, DesktopNotifier, Notifier};
pub use clock::{Clock, SystemClock};
pub use error::{AudioError, ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use timer::{
    CountdownEngine, DurationTable, Mode, Phase, Snapshot, TimerController, FOCUS_PRESETS_MIN,
};
