//! Frame ticker: dedicated thread pacing the rotator loop.
//!
//! The orchestrator is driven by the clock, so something has to wake the
//! loop regularly to poll it and push a frame. Ticks are dropped rather
//! than queued when the loop falls behind.

use super::messages::{LoopEvent, Tick};
use crossbeam_channel::Sender;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Thread emitting [`LoopEvent::Frame`] at a fixed interval.
pub struct FrameTicker {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl FrameTicker {
    /// Spawn a ticker sending a frame every `interval` into `sender`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(sender: Sender<LoopEvent>, interval: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("wordwheel-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, interval);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<LoopEvent>, shutdown: &Arc<AtomicBool>, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        while !shutdown.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now < next_tick {
                thread::sleep((next_tick - now).min(Duration::from_millis(1)));
                continue;
            }

            let tick = Tick {
                frame,
                elapsed: now - start,
            };
            // Full channel: the loop is busy, skip this frame.
            if let Err(err) = sender.try_send(LoopEvent::Frame(tick)) {
                if err.is_disconnected() {
                    break;
                }
            }

            frame += 1;
            next_tick += interval;
            if next_tick < now {
                next_tick = now + interval;
            }
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn test_ticker_sends_frames() {
        let (tx, rx) = bounded(4);
        let ticker = FrameTicker::spawn(tx, Duration::from_millis(5)).unwrap();

        let first = rx.recv_timeout(Duration::from_millis(200)).unwrap();
        assert!(matches!(first, LoopEvent::Frame(Tick { frame: 0, .. })));
        let second = rx.recv_timeout(Duration::from_millis(200)).unwrap();
        assert!(matches!(second, LoopEvent::Frame(_)));

        ticker.join();
    }

    #[test]
    fn test_ticker_exits_when_receiver_dropped() {
        let (tx, rx) = bounded(1);
        let ticker = FrameTicker::spawn(tx, Duration::from_millis(1)).unwrap();
        drop(rx);
        thread::sleep(Duration::from_millis(20));
        ticker.join();
    }
}
