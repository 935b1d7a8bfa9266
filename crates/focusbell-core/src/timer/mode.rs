use serde::{Deserialize, Serialize};

/// The focus durations a user may pick from. Anything else is rejected.
pub const FOCUS_PRESETS_MIN: [u64; 3] = [25, 45, 60];

const DEFAULT_FOCUS_MIN: u64 = 25;
const SHORT_BREAK_MIN: u64 = 5;
const LONG_BREAK_MIN: u64 = 10;

/// Named countdown profile. Exactly one mode is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short break",
            Mode::LongBreak => "Long break",
        }
    }
}

/// Maps each mode to its configured duration.
///
/// Break durations are fixed. The focus duration may be overridden, but only
/// with one of the values in [`FOCUS_PRESETS_MIN`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationTable {
    focus_min: u64,
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            focus_min: DEFAULT_FOCUS_MIN,
        }
    }
}

impl DurationTable {
    /// Build a table from a stored preference. An out-of-list value falls
    /// back to the default focus duration.
    pub fn new(focus_min: u64) -> Self {
        if FOCUS_PRESETS_MIN.contains(&focus_min) {
            Self { focus_min }
        } else {
            Self::default()
        }
    }

    pub fn focus_minutes(&self) -> u64 {
        self.focus_min
    }

    pub fn minutes(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Focus => self.focus_min,
            Mode::ShortBreak => SHORT_BREAK_MIN,
            Mode::LongBreak => LONG_BREAK_MIN,
        }
    }

    /// Duration of `mode` in milliseconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_ms(&self, mode: Mode) -> u64 {
        self.minutes(mode).saturating_mul(60).saturating_mul(1000)
    }

    /// Update the focus duration. Returns false, leaving the table unchanged,
    /// when `minutes` is not one of the allowed presets.
    pub fn set_focus_minutes(&mut self, minutes: u64) -> bool {
        if !FOCUS_PRESETS_MIN.contains(&minutes) {
            return false;
        }
        self.focus_min = minutes;
        true
    }
}
