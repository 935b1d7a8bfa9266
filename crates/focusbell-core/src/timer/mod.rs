mod controller;
mod engine;
mod mode;

pub use controller::TimerController;
pub use engine::{CountdownEngine, Phase, Snapshot};
pub use mode::{DurationTable, Mode, FOCUS_PRESETS_MIN};
