use super::Sequencer;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Running,
    Stopped,
}

/// Polls the backend and advances the playlist when a track runs out.
///
/// Exits on its own once the sequencer has been shut down; the delay is
/// at most one polling interval.
pub struct Watcher {
    stopped: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Watcher {
    pub fn spawn(sequencer: Sequencer, interval: Duration) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let stopped_clone = Arc::clone(&stopped);

        let handle = thread::spawn(move || {
            debug!("End-of-track watcher polling every {interval:?}");

            loop {
                thread::sleep(interval);

                if !sequencer.is_running() {
                    break;
                }
                if sequencer.advance_if_ended() {
                    debug!("Track ended, advanced playlist");
                }
            }

            stopped_clone.store(true, Ordering::SeqCst);
            debug!("End-of-track watcher stopped");
        });

        Watcher {
            stopped,
            handle: Some(handle),
        }
    }

    pub fn state(&self) -> WatcherState {
        match self.stopped.load(Ordering::SeqCst) {
            true => WatcherState::Stopped,
            false => WatcherState::Running,
        }
    }

    /// Block until the polling thread has exited
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("End-of-track watcher panicked");
            }
        }
    }
}
