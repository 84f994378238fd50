//! The heart-rate recording session controller.
//!
//! Owns the per-session state: the append-only hue buffer, the per-second
//! sample batch, the session clock, and the estimator. All frames for one
//! session are processed in strict arrival order on one logical path;
//! observers read published values through [`LiveMonitor`] and the event
//! channel.

use std::mem;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use pulsecam_signals::{BpmEstimator, EstimatorConfig, Hsv};

use crate::buffer::SignalBuffer;
use crate::clock::SessionClock;
use crate::config::{ConfigError, RecorderConfig};
use crate::domain::{dt_us, HeartRateSample, PixelSample, RecorderError, RecorderEvent, SessionId};
use crate::monitor::{observation_channel, EventSender, LiveMonitor};

/// Hue sentinel recorded for frames where the lens is not covered.
const NO_SIGNAL: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Running,
    Stopping,
    Finished,
    Failed,
}

/// Counters for one session, snapshot at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderMetrics {
    pub frames_processed: u64,
    pub estimates_computed: u64,
    pub events_dropped: u64,
}

/// Session controller for camera-based heart-rate recording.
pub struct HeartRateRecorder {
    config: RecorderConfig,
    estimator: BpmEstimator,
    state: RecorderState,
    session_id: SessionId,
    clock: SessionClock,
    buffer: SignalBuffer,
    batch: Vec<HeartRateSample>,
    lens_covered: bool,
    last_bpm: Option<u32>,
    last_estimate_us: Option<i64>,
    frames_processed: u64,
    estimates_computed: u64,
    monitor: Arc<LiveMonitor>,
    events: EventSender,
}

impl HeartRateRecorder {
    /// Create a recorder and the receiving half of its event channel.
    pub fn new(config: RecorderConfig) -> Result<(Self, Receiver<RecorderEvent>), ConfigError> {
        config.validate()?;
        let estimator = BpmEstimator::with_config(EstimatorConfig {
            frame_rate: config.frame_rate,
            settle_seconds: config.settle_seconds,
            window_seconds: config.window_seconds,
            min_bpm: config.min_bpm,
        });
        let (monitor, events, rx) = observation_channel(config.event_capacity);
        let batch_capacity = config.frame_rate as usize;
        let recorder = HeartRateRecorder {
            config,
            estimator,
            state: RecorderState::Idle,
            session_id: SessionId::new(),
            clock: SessionClock::new(),
            buffer: SignalBuffer::new(),
            batch: Vec::with_capacity(batch_capacity),
            lens_covered: false,
            last_bpm: None,
            last_estimate_us: None,
            frames_processed: 0,
            estimates_computed: 0,
            monitor,
            events,
        };
        Ok((recorder, rx))
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Shared handle for reading the latest BPM and lens coverage from
    /// another thread.
    pub fn monitor(&self) -> Arc<LiveMonitor> {
        Arc::clone(&self.monitor)
    }

    pub fn last_bpm(&self) -> Option<u32> {
        self.last_bpm
    }

    /// Number of hue samples buffered this session.
    pub fn buffered_samples(&self) -> usize {
        self.buffer.len()
    }

    pub fn metrics(&self) -> RecorderMetrics {
        RecorderMetrics {
            frames_processed: self.frames_processed,
            estimates_computed: self.estimates_computed,
            events_dropped: self.events.dropped(),
        }
    }

    /// Begin a new session at `ts_us`.
    ///
    /// Resets the buffer and records the start timestamp. A no-op when the
    /// session is already running: the buffer is not reset a second time.
    pub fn start(&mut self, ts_us: i64) {
        match self.state {
            RecorderState::Idle | RecorderState::Finished => {
                self.session_id = SessionId::new();
                self.clock.start(ts_us);
                self.buffer.reset();
                self.batch.clear();
                self.lens_covered = false;
                self.last_bpm = None;
                self.last_estimate_us = None;
                self.frames_processed = 0;
                self.estimates_computed = 0;
                self.monitor.reset();
                self.state = RecorderState::Running;
                self.events.publish(RecorderEvent::SessionStarted {
                    session_id: self.session_id,
                    ts_us,
                });
                log::info!("session started");
            }
            RecorderState::Running | RecorderState::Stopping => {
                log::debug!("start ignored: session already running");
            }
            RecorderState::Failed => {
                log::warn!("start ignored: recorder failed, create a fresh session");
            }
        }
    }

    /// Process one camera frame.
    ///
    /// Frames arriving outside a running session are ignored. A timestamp
    /// regression rejects the frame but leaves the session alive; a
    /// degenerate (near-gray) color is a normal "lens not covered" outcome
    /// and the sample is still logged with a sentinel hue.
    pub fn process_frame(&mut self, frame: PixelSample) -> Result<(), RecorderError> {
        if self.state != RecorderState::Running {
            log::debug!("frame ignored: session not running");
            return Ok(());
        }

        let rel_sec = self.clock.observe(frame.ts_us)?;
        let hsv = Hsv::from_rgb(frame.red, frame.green, frame.blue);

        let covered = hsv.is_some();
        if covered != self.lens_covered {
            self.lens_covered = covered;
            self.monitor.publish_coverage(covered);
            self.events
                .publish(RecorderEvent::LensCoverageChanged { covered });
            log::info!("lens coverage changed: covered={covered}");
        }

        self.buffer.push(hsv.map_or(NO_SIGNAL, |h| h.hue));
        self.batch.push(HeartRateSample {
            ts_us: frame.ts_us,
            rel_sec,
            red: frame.red,
            green: frame.green,
            blue: frame.blue,
            hue: hsv.map(|h| h.hue),
            saturation: hsv.map(|h| h.saturation),
            brightness: hsv.map(|h| h.brightness),
            is_covered: covered,
            bpm: None,
        });
        self.frames_processed += 1;

        if self.batch.len() >= self.config.frame_rate as usize {
            self.close_batch(frame.ts_us);
        }
        Ok(())
    }

    /// Stop the session, flushing any partial batch.
    ///
    /// The partial batch is flushed without a fresh BPM computation and
    /// carries the last known BPM unchanged. A no-op unless running.
    pub fn stop(&mut self, ts_us: i64) {
        match self.state {
            RecorderState::Running => {
                self.state = RecorderState::Stopping;
                if let Some(last) = self.batch.last_mut() {
                    last.bpm = self.last_bpm;
                }
                self.flush_batch();
                self.events.publish(RecorderEvent::SessionEnded {
                    session_id: self.session_id,
                    ts_us,
                });
                self.state = RecorderState::Finished;
                log::info!(
                    "session ended after {:.1}s, {} frames",
                    self.clock.session_duration(ts_us),
                    self.frames_processed
                );
            }
            _ => log::debug!("stop ignored: session not running"),
        }
    }

    /// Record an unrecoverable sensor failure.
    ///
    /// The session moves to the terminal `Failed` state and the error is
    /// returned for the caller to surface. There is no partial recovery:
    /// a fresh session must be created.
    pub fn fail(&mut self, reason: impl Into<String>) -> RecorderError {
        let reason = reason.into();
        if self.state != RecorderState::Failed {
            self.state = RecorderState::Failed;
            self.batch.clear();
            self.events.publish(RecorderEvent::SessionFailed {
                reason: reason.clone(),
            });
            log::warn!("session failed: {reason}");
        }
        RecorderError::SensorUnavailable(reason)
    }

    /// A full second of frames has accumulated: run the periodic
    /// estimation if warmed up and due, then flush the batch.
    fn close_batch(&mut self, now_us: i64) {
        let warmed = self.buffer.len() >= self.estimator.min_samples();
        // Batches land on one-second boundaries; allow one frame of
        // timestamp jitter when deciding whether a full second elapsed.
        let min_dt = 1_000_000 - 1_000_000 / u64::from(self.config.frame_rate);
        let due = self
            .last_estimate_us
            .map_or(true, |last| dt_us(now_us, last) >= min_dt);

        if warmed && due {
            self.estimates_computed += 1;
            self.last_estimate_us = Some(now_us);
            match self.estimator.estimate(self.buffer.as_slice()) {
                Some(bpm) => {
                    self.last_bpm = Some(bpm);
                    self.monitor.publish_bpm(bpm);
                    self.events.publish(RecorderEvent::BpmUpdated { bpm, ts_us: now_us });
                    log::debug!("estimated {bpm} bpm over {} samples", self.buffer.len());
                }
                None => log::debug!("no plausible estimate this cycle"),
            }
            if let Some(last) = self.batch.last_mut() {
                last.bpm = self.last_bpm;
            }
        }
        self.flush_batch();
    }

    fn flush_batch(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let samples = mem::take(&mut self.batch);
        self.events.publish(RecorderEvent::SamplesFlushed { samples });
    }
}
