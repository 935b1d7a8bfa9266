//! Timer controller: the surface presentation layers talk to.
//!
//! Wraps the pure engine with a real clock, the host-visibility flag, and
//! the alarm dispatcher. Every alarm-raising transition is forwarded to the
//! dispatcher here, and every transition that begins a new countdown or
//! changes mode re-arms it.

use tracing::{debug, info};

use super::engine::{CountdownEngine, Phase, Snapshot};
use super::mode::{DurationTable, Mode};
use crate::alert::{AlarmAudio, AlarmDispatcher, Notifier};
use crate::clock::Clock;
use crate::events::Event;

pub struct TimerController<C, N, A> {
    engine: CountdownEngine,
    dispatcher: AlarmDispatcher<N, A>,
    clock: C,
    foreground: bool,
}

impl<C: Clock, N: Notifier, A: AlarmAudio> TimerController<C, N, A> {
    pub fn new(durations: DurationTable, clock: C, dispatcher: AlarmDispatcher<N, A>) -> Self {
        Self {
            engine: CountdownEngine::new(durations),
            dispatcher,
            clock,
            foreground: true,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot(self.clock.now_ms())
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn remaining_ms(&self) -> u64 {
        self.engine.remaining_ms(self.clock.now_ms())
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start(self.clock.now_ms());
        if event.is_some() {
            self.dispatcher.rearm();
            info!(mode = ?self.engine.mode(), "countdown started");
        }
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause(self.clock.now_ms());
        if event.is_some() {
            debug!(remaining_ms = self.engine.remaining_ms(self.clock.now_ms()), "paused");
        }
        event
    }

    pub fn reset(&mut self) -> Event {
        self.dispatcher.stop();
        self.dispatcher.rearm();
        self.engine.reset()
    }

    pub fn set_mode(&mut self, mode: Mode) -> Event {
        self.dispatcher.stop();
        self.dispatcher.rearm();
        info!(?mode, "mode changed");
        self.engine.set_mode(mode)
    }

    pub fn acknowledge(&mut self) -> Option<Event> {
        let event = self.engine.acknowledge();
        if event.is_some() {
            self.dispatcher.stop();
            self.dispatcher.rearm();
            info!("alarm acknowledged");
        }
        event
    }

    pub fn set_focus_minutes(&mut self, minutes: u64) -> Option<Event> {
        self.engine.set_focus_minutes(minutes)
    }

    /// Periodic callback; dispatches the alarm on a foreground expiration.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick(self.clock.now_ms(), self.foreground);
        if let Some(Event::AlarmRaised { mode, .. }) = &event {
            self.dispatcher.dispatch(*mode);
        }
        event
    }

    /// The host went to the background; expirations from here on are deferred.
    pub fn host_hidden(&mut self) {
        self.foreground = false;
    }

    /// The host became visible; a deferred alarm is dispatched now.
    pub fn resume_visible(&mut self) -> Option<Event> {
        self.foreground = true;
        let event = self.engine.resume_visible();
        if let Some(Event::AlarmRaised { mode, .. }) = &event {
            info!(?mode, "deferred alarm dispatched on resume");
            self.dispatcher.dispatch(*mode);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ManualClock(Rc<Cell<u64>>);

    impl ManualClock {
        fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    #[derive(Clone, Default)]
    struct CountingNotifier {
        shows: Rc<Cell<u32>>,
    }

    impl Notifier for CountingNotifier {
        fn is_granted(&self) -> bool {
            true
        }

        fn show(&self, _title: &str, _body: &str) -> Result<()> {
            self.shows.set(self.shows.get() + 1);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CountingAudio {
        plays: Rc<Cell<u32>>,
        playing: Rc<Cell<bool>>,
    }

    impl AlarmAudio for CountingAudio {
        fn play_looped(&mut self) -> Result<()> {
            self.plays.set(self.plays.get() + 1);
            self.playing.set(true);
            Ok(())
        }

        fn stop(&mut self) {
            self.playing.set(false);
        }

        fn playback_allowed(&self) -> bool {
            true
        }
    }

    struct Harness {
        controller: TimerController<ManualClock, CountingNotifier, CountingAudio>,
        clock: ManualClock,
        plays: Rc<Cell<u32>>,
        playing: Rc<Cell<bool>>,
        shows: Rc<Cell<u32>>,
    }

    fn harness() -> Harness {
        let clock = ManualClock::default();
        let notifier = CountingNotifier::default();
        let audio = CountingAudio::default();
        let plays = audio.plays.clone();
        let playing = audio.playing.clone();
        let shows = notifier.shows.clone();
        let controller = TimerController::new(
            DurationTable::default(),
            clock.clone(),
            AlarmDispatcher::new(notifier, audio),
        );
        Harness {
            controller,
            clock,
            plays,
            playing,
            shows,
        }
    }

    #[test]
    fn foreground_expiration_dispatches_once() {
        let mut h = harness();
        h.controller.set_mode(Mode::ShortBreak);
        h.controller.start();
        h.clock.advance(300_000);
        h.controller.tick();
        // Stray ticks and resumes after the expiration change nothing.
        h.controller.tick();
        h.controller.resume_visible();
        assert_eq!(h.plays.get(), 1);
        assert_eq!(h.shows.get(), 1);
        assert_eq!(h.controller.phase(), Phase::AlarmActive);
    }

    #[test]
    fn hidden_expiration_defers_dispatch_to_resume() {
        let mut h = harness();
        h.controller.set_mode(Mode::ShortBreak);
        h.controller.start();
        h.controller.host_hidden();
        h.clock.advance(300_000);
        h.controller.tick();
        assert_eq!(h.plays.get(), 0);
        assert_eq!(h.controller.phase(), Phase::AlarmPending);

        h.controller.resume_visible();
        assert_eq!(h.plays.get(), 1);
        assert_eq!(h.shows.get(), 1);
        assert_eq!(h.controller.phase(), Phase::AlarmActive);
    }

    #[test]
    fn acknowledge_stops_playback_and_rearms() {
        let mut h = harness();
        h.controller.set_mode(Mode::ShortBreak);
        h.controller.start();
        h.clock.advance(300_000);
        h.controller.tick();
        assert!(h.playing.get());

        h.controller.acknowledge();
        assert!(!h.playing.get());
        assert_eq!(h.controller.phase(), Phase::Idle);
        assert_eq!(h.controller.remaining_ms(), 300_000);

        // A fresh run can alarm again.
        h.controller.start();
        h.clock.advance(300_000);
        h.controller.tick();
        assert_eq!(h.plays.get(), 2);
    }

    #[test]
    fn mode_switch_cancels_a_pending_alarm() {
        let mut h = harness();
        h.controller.set_mode(Mode::ShortBreak);
        h.controller.start();
        h.controller.host_hidden();
        h.clock.advance(300_000);
        h.controller.tick();
        assert_eq!(h.controller.phase(), Phase::AlarmPending);

        h.controller.set_mode(Mode::Focus);
        // The deferred alarm never fires.
        h.controller.resume_visible();
        assert_eq!(h.plays.get(), 0);
        assert_eq!(h.controller.phase(), Phase::Idle);
        assert_eq!(h.controller.remaining_ms(), 25 * 60 * 1000);
    }

    #[test]
    fn snapshot_tracks_the_running_anchor() {
        let mut h = harness();
        h.controller.start();
        h.clock.advance(90_000);
        let snap = h.controller.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.mode, Mode::Focus);
        assert_eq!(snap.remaining_ms, 25 * 60 * 1000 - 90_000);
    }
}
