//! Foreground countdown session.
//!
//! A 250 ms ticker drives the controller. A terminal has no visibility event,
//! but it has the same failure mode: process or system suspension freezes the
//! ticker while the wall clock keeps moving. A tick arriving long after its
//! predecessor means the countdown may have expired while nobody was
//! watching, so that tick is delivered hidden and immediately followed by the
//! visibility resume, deferring the alarm through the same path a hidden GUI
//! would take.

use std::io::Write;
use std::time::Duration;

use clap::ValueEnum;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use focusbell_core::{
    AlarmDispatcher, BellAudio, Clock, Config, DesktopNotifier, Mode, Phase, SystemClock,
    TimerController,
};

const TICK_MS: u64 = 250;
/// A tick this late means the host was suspended in between.
const SUSPEND_GAP_MS: u64 = 5_000;

type Controller = TimerController<SystemClock, DesktopNotifier, BellAudio>;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Focus,
    ShortBreak,
    LongBreak,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Focus => Mode::Focus,
            ModeArg::ShortBreak => Mode::ShortBreak,
            ModeArg::LongBreak => Mode::LongBreak,
        }
    }
}

pub fn run(mode: ModeArg) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let dispatcher = AlarmDispatcher::new(
        DesktopNotifier::new(config.notifications.enabled),
        BellAudio::new(config.notifications.volume),
    );
    let mut controller = TimerController::new(config.duration_table(), SystemClock, dispatcher);

    controller.set_mode(mode.into());
    controller.start();
    info!(?mode, "session started");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(session_loop(&mut controller))
}

async fn session_loop(controller: &mut Controller) -> Result<(), Box<dyn std::error::Error>> {
    let clock = SystemClock;
    let mut ticker = interval(Duration::from_millis(TICK_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick_ms = clock.now_ms();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = clock.now_ms();
                let suspended = now.saturating_sub(last_tick_ms) > SUSPEND_GAP_MS;
                last_tick_ms = now;

                if suspended {
                    info!("wake-up detected, reconciling elapsed time");
                    controller.host_hidden();
                }
                controller.tick();
                if suspended {
                    controller.resume_visible();
                }

                render(controller);
                if controller.phase() == Phase::AlarmActive {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                controller.pause();
                println!();
                return Ok(());
            }
        }
    }

    println!("\nTime is up! Press Enter to stop the alarm.");
    wait_for_ack().await;
    controller.acknowledge();
    Ok(())
}

async fn wait_for_ack() {
    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    tokio::select! {
        _ = reader.read_line(&mut line) => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}

fn render(controller: &Controller) {
    let secs = controller.remaining_ms() / 1000;
    print!(
        "\r{}  {:02}:{:02}  ",
        controller.mode().label(),
        secs / 60,
        secs % 60
    );
    let _ = std::io::stdout().flush();
}
