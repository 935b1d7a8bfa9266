//! Alarm bell playback.
//!
//! rodio's output stream is not `Send`, so a dedicated thread owns it and the
//! rest of the crate talks to it over a channel. The thread is spawned lazily
//! on the first play; stopping drops the sink, so a later play starts the
//! bell from the beginning.

use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use rodio::{OutputStream, Sink, Source};
use tracing::warn;

use super::AlarmAudio;
use crate::error::{AudioError, Result};

const SAMPLE_RATE: u32 = 44_100;
const STRIKE_PERIOD_SECS: f32 = 2.0;
const BELL_FREQ_HZ: f32 = 880.0;

/// Endless bell: an 880 Hz strike with an exponential decay, repeating every
/// two seconds until the sink is stopped.
#[derive(Debug, Clone)]
pub struct BellLoop {
    num_sample: usize,
    volume: f32,
}

impl BellLoop {
    pub fn new(volume: f32) -> Self {
        Self {
            num_sample: 0,
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

impl Iterator for BellLoop {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.num_sample = self.num_sample.wrapping_add(1);

        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        let phase = t % STRIKE_PERIOD_SECS;
        let envelope = (-4.0 * phase).exp();
        let sample = (2.0 * std::f32::consts::PI * BELL_FREQ_HZ * phase).sin();

        // Lower amplitude to prevent clipping
        Some(sample * envelope * 0.2 * self.volume)
    }
}

impl Source for BellLoop {
    fn current_frame_len(&self) -> Option<usize> {
        None // Infinite stream
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

enum AudioCommand {
    Play,
    Stop,
}

/// Looped alarm playback on a dedicated audio thread.
pub struct BellAudio {
    tx: Option<Sender<AudioCommand>>,
    volume: f32,
}

impl BellAudio {
    /// `volume_pct` is the configured 0..=100 notification volume.
    pub fn new(volume_pct: u32) -> Self {
        Self {
            tx: None,
            volume: volume_pct.min(100) as f32 / 100.0,
        }
    }

    fn ensure_thread(&mut self) -> Result<Sender<AudioCommand>> {
        if let Some(tx) = &self.tx {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let volume = self.volume;

        thread::Builder::new()
            .name("focusbell-audio".to_string())
            .spawn(move || {
                // The stream must outlive the sink; both live on this thread.
                let mut stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            stream = None;
                            match OutputStream::try_default() {
                                Ok((s, handle)) => match Sink::try_new(&handle) {
                                    Ok(new_sink) => {
                                        new_sink.append(BellLoop::new(volume));
                                        stream = Some(s);
                                        sink = Some(new_sink);
                                    }
                                    Err(e) => warn!("audio sink unavailable: {e}"),
                                },
                                Err(e) => warn!("audio output unavailable: {e}"),
                            }
                        }
                        AudioCommand::Stop => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            stream = None;
                        }
                    }
                }
            })
            .map_err(|e| AudioError::ThreadSpawn(e.to_string()))?;

        self.tx = Some(tx.clone());
        Ok(tx)
    }
}

impl AlarmAudio for BellAudio {
    fn play_looped(&mut self) -> Result<()> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Play)
            .map_err(|_| AudioError::ThreadGone)?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(AudioCommand::Stop);
        }
    }

    fn playback_allowed(&self) -> bool {
        // A terminal host has no autoplay policy; playback is always allowed
        // while the process is alive.
        true
    }
}
