//! Live observation surface for a recording session.
//!
//! The recorder runs on its own sequential processing path; a display
//! layer observes it from another thread. Two mechanisms cover that
//! boundary: a pair of atomics holding the latest published BPM and lens
//! coverage (single writer, last-write-wins, readers tolerate staleness),
//! and a bounded event channel. Critical lifecycle events use a blocking
//! send and are never dropped; high-frequency events are shed under
//! backpressure with the drop counted for visibility.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{EventPriority, RecorderEvent};

/// Latest published values, readable from any thread.
#[derive(Debug, Default)]
pub struct LiveMonitor {
    /// Latest BPM; 0 means no estimate has been published yet.
    bpm: AtomicU32,
    lens_covered: AtomicBool,
}

impl LiveMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_bpm(&self) -> Option<u32> {
        match self.bpm.load(Ordering::Relaxed) {
            0 => None,
            bpm => Some(bpm),
        }
    }

    pub fn is_lens_covered(&self) -> bool {
        self.lens_covered.load(Ordering::Relaxed)
    }

    pub(crate) fn publish_bpm(&self, bpm: u32) {
        self.bpm.store(bpm, Ordering::Relaxed);
    }

    pub(crate) fn publish_coverage(&self, covered: bool) {
        self.lens_covered.store(covered, Ordering::Relaxed);
    }

    pub(crate) fn reset(&self) {
        self.bpm.store(0, Ordering::Relaxed);
        self.lens_covered.store(false, Ordering::Relaxed);
    }
}

/// Sending half of the recorder's event channel.
pub(crate) struct EventSender {
    tx: Sender<RecorderEvent>,
    dropped: AtomicU64,
}

impl EventSender {
    /// Publish an event according to its priority class.
    pub(crate) fn publish(&self, event: RecorderEvent) {
        match event.priority() {
            EventPriority::Critical => {
                // Blocking send: lifecycle events must not drop. A closed
                // channel means the observer is gone, which is fine.
                let _ = self.tx.send(event);
            }
            EventPriority::HighFreq => {
                if let Err(TrySendError::Full(_)) = self.tx.try_send(event) {
                    let n = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                    log::warn!("observer backpressure: {n} events dropped so far");
                }
            }
        }
    }

    pub(crate) fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Create the monitor and event channel for one recorder.
pub(crate) fn observation_channel(
    capacity: usize,
) -> (Arc<LiveMonitor>, EventSender, Receiver<RecorderEvent>) {
    let (tx, rx) = bounded(capacity);
    let sender = EventSender {
        tx,
        dropped: AtomicU64::new(0),
    };
    (Arc::new(LiveMonitor::new()), sender, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn monitor_reads_from_another_thread() {
        let (monitor, sender, _rx) = observation_channel(8);
        monitor.publish_bpm(72);
        monitor.publish_coverage(true);

        let reader = Arc::clone(&monitor);
        let handle = thread::spawn(move || (reader.current_bpm(), reader.is_lens_covered()));
        assert_eq!(handle.join().unwrap(), (Some(72), true));
        assert_eq!(sender.dropped(), 0);
    }

    #[test]
    fn unpublished_bpm_reads_as_none() {
        let (monitor, _sender, _rx) = observation_channel(8);
        assert_eq!(monitor.current_bpm(), None);
        monitor.publish_bpm(65);
        assert_eq!(monitor.current_bpm(), Some(65));
        monitor.reset();
        assert_eq!(monitor.current_bpm(), None);
    }

    #[test]
    fn high_freq_events_drop_when_full() {
        let (_monitor, sender, rx) = observation_channel(2);
        for _ in 0..5 {
            sender.publish(RecorderEvent::BpmUpdated { bpm: 70, ts_us: 0 });
        }
        assert_eq!(sender.dropped(), 3);
        drop(rx);
    }

    #[test]
    fn critical_events_survive_when_receiver_closed() {
        let (_monitor, sender, rx) = observation_channel(2);
        drop(rx);
        // Must not panic or block forever.
        sender.publish(RecorderEvent::SessionFailed {
            reason: "camera permission denied".into(),
        });
    }
}
