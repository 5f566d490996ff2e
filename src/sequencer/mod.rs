//! Playlist cursor and transport control.
//!
//! The [`Sequencer`] is a cloneable handle over one mutex holding both the
//! playback state and the media backend, so the UI thread and the
//! [`Watcher`] thread can drive it concurrently without tearing the cursor.

mod state;
mod watcher;

pub use watcher::{Watcher, WatcherState};

use crate::{
    domain::{RawEntry, TrackChange, TrackEntry, TrackError},
    player::{MediaBackend, PlayerStatus},
};
use state::PlaybackState;
use std::{
    collections::HashSet,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tracing::{debug, error, info, warn};

pub type ChangeCallback = Arc<dyn Fn(&TrackChange) + Send + Sync>;

struct Shared {
    state: PlaybackState,
    backend: Box<dyn MediaBackend>,
}

#[derive(Clone)]
pub struct Sequencer {
    shared: Arc<Mutex<Shared>>,
    running: Arc<AtomicBool>,
    on_change: Option<ChangeCallback>,
}

/// Snapshot for progress displays
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    pub elapsed: Duration,
    pub duration: Option<Duration>,
    pub fraction: f32,
}

impl Sequencer {
    pub fn new(backend: Box<dyn MediaBackend>) -> Self {
        Sequencer {
            shared: Arc::new(Mutex::new(Shared {
                state: PlaybackState::default(),
                backend,
            })),
            running: Arc::new(AtomicBool::new(true)),
            on_change: None,
        }
    }

    /// Register the function called whenever a new track starts.
    ///
    /// The callback runs on whichever thread caused the change, after the
    /// sequencer lock has been released.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&TrackChange) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, change: Option<TrackChange>) {
        if let (Some(change), Some(callback)) = (change, &self.on_change) {
            callback(&change);
        }
    }
}

// ===================
//   PLAYLIST LOADING
// ===================
impl Sequencer {
    /// Replace the playlist and start playing its first entry
    pub fn load(&self, entries: Vec<TrackEntry>) {
        self.load_from(entries, 0)
    }

    /// Replace the playlist and start at `start`, or at the first entry
    /// when `start` is out of range.
    pub fn load_from(&self, entries: Vec<TrackEntry>, start: usize) {
        let change = {
            let mut shared = self.lock();

            if shared.state.current.is_some() || !entries.is_empty() {
                shared.backend.stop();
            }
            shared.state.replace(entries);

            let len = shared.state.len();
            if len == 0 {
                info!("Loaded an empty playlist");
                return;
            }

            info!("Loaded playlist with {len} entries");
            shared.state.current = Some(if start < len { start } else { 0 });
            shared.play_current()
        };

        self.notify(change);
    }

    /// Validate raw rows, then load them. Nothing changes if any row is malformed.
    pub fn load_raw(&self, rows: Vec<RawEntry>) -> Result<(), TrackError> {
        let entries = rows
            .into_iter()
            .map(TrackEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| error!("Refusing to load playlist: {e}"))?;

        self.load(entries);
        Ok(())
    }
}

// ==================
//   TRANSPORT
// ==================
impl Sequencer {
    /// Jump to `index`. Out of range indices are ignored and reported as `false`.
    pub fn play_at(&self, index: usize) -> bool {
        let change = {
            let mut shared = self.lock();
            if index >= shared.state.len() {
                debug!("Ignoring play_at({index}), playlist has {}", shared.state.len());
                return false;
            }
            shared.state.current = Some(index);
            shared.play_current()
        };

        self.notify(change);
        true
    }

    pub fn next(&self) {
        let change = {
            let mut shared = self.lock();
            if shared.state.is_empty() {
                return;
            }
            shared.state.advance();
            shared.play_current()
        };

        self.notify(change);
    }

    pub fn prev(&self) {
        let change = {
            let mut shared = self.lock();
            if shared.state.is_empty() {
                return;
            }
            shared.state.retreat();
            shared.play_current()
        };

        self.notify(change);
    }

    /// Pause or resume, returning the new paused flag
    pub fn toggle_pause(&self) -> bool {
        let mut shared = self.lock();
        if shared.state.current.is_none() {
            return shared.state.paused;
        }

        // Trust the transport over our own flag when they disagree
        let paused = match shared.backend.status() {
            PlayerStatus::Paused => true,
            PlayerStatus::Playing => false,
            _ => shared.state.paused,
        };

        match paused {
            true => shared.backend.play(),
            false => shared.backend.pause(),
        }
        shared.state.paused = !paused;
        shared.state.paused
    }

    /// Flip shuffle mode and forget what has been played. Returns the new mode.
    pub fn toggle_shuffle(&self) -> bool {
        let mut shared = self.lock();
        shared.state.shuffle = !shared.state.shuffle;
        shared.state.played.clear();

        info!(
            "Shuffle {}",
            if shared.state.shuffle { "enabled" } else { "disabled" }
        );
        shared.state.shuffle
    }

    /// Set output volume in percent. Values are clamped to `0..=100`.
    pub fn set_volume(&self, volume: f64) {
        let volume = match volume.is_nan() {
            true => 0,
            false => volume.clamp(0.0, 100.0) as u8,
        };
        self.lock().backend.set_volume(volume);
    }

    /// Seek to a fraction of the current track when the media allows it
    pub fn set_position(&self, fraction: f32) {
        let mut shared = self.lock();
        if !shared.backend.is_seekable() {
            return;
        }

        let fraction = match fraction.is_nan() {
            true => 0.0,
            false => fraction.clamp(0.0, 1.0),
        };
        if let Err(e) = shared.backend.set_position(fraction) {
            warn!("Seek failed: {e}");
        }
    }

    /// Stop output and signal the watcher to wind down
    pub fn shutdown(&self) {
        self.lock().backend.stop();
        self.running.store(false, Ordering::SeqCst);
        info!("Sequencer shut down");
    }

    /// Advance if the current track finished on its own. Checked and acted
    /// on under one lock so a concurrent `next` cannot slip in between.
    pub fn advance_if_ended(&self) -> bool {
        let change = {
            let mut shared = self.lock();
            if shared.state.paused
                || shared.state.is_empty()
                || shared.backend.status() != PlayerStatus::Ended
            {
                return false;
            }
            shared.state.advance();
            shared.play_current()
        };

        self.notify(change);
        true
    }
}

// ===============
//    ACCESSORS
// ===============
impl Sequencer {
    pub fn current_index(&self) -> Option<usize> {
        self.lock().state.current
    }

    pub fn current_entry(&self) -> Option<TrackEntry> {
        self.lock().state.current_entry().map(|(_, e)| e.clone())
    }

    /// Whether `change` still describes the active track. Callbacks run
    /// outside the lock, so two racing changes can arrive out of order;
    /// consumers use this to drop the stale one.
    pub fn is_current(&self, change: &TrackChange) -> bool {
        let shared = self.lock();
        shared
            .state
            .current_entry()
            .is_some_and(|(idx, entry)| idx == change.index && entry.file_path == change.file_path)
    }

    pub fn entries(&self) -> Vec<TrackEntry> {
        self.lock().state.entries.clone()
    }

    pub fn played_indices(&self) -> HashSet<usize> {
        self.lock().state.played.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().state.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.lock().state.paused
    }

    pub fn is_shuffle_enabled(&self) -> bool {
        self.lock().state.shuffle
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn volume(&self) -> u8 {
        self.lock().backend.volume()
    }

    pub fn status(&self) -> PlayerStatus {
        self.lock().backend.status()
    }

    pub fn progress(&self) -> Progress {
        let shared = self.lock();
        Progress {
            elapsed: shared.backend.elapsed(),
            duration: shared.backend.duration(),
            fraction: shared.backend.position(),
        }
    }
}

impl Shared {
    /// The single place a track is handed to the backend.
    ///
    /// Unplayable entries are skipped with the forward policy. Each entry is
    /// tried at most once; when none of them plays, playback stops.
    fn play_current(&mut self) -> Option<TrackChange> {
        let len = self.state.len();
        let mut tried = HashSet::with_capacity(len);

        loop {
            let (idx, entry) = self
                .state
                .current_entry()
                .map(|(i, e)| (i, e.clone()))?;
            tried.insert(idx);
            self.state.mark_played(idx);

            match self.start(&entry) {
                Ok(()) => {
                    self.state.paused = false;
                    info!("Now playing [{idx}] {}", entry.display_name());
                    return Some(TrackChange::new(&entry, idx));
                }
                Err(e) => warn!("Skipping [{idx}] {}: {e}", entry.title),
            }

            if tried.len() >= len {
                break;
            }
            self.state.advance_past(&tried);
        }

        warn!("No playable entries among {len}, stopping");
        self.backend.stop();
        None
    }

    fn start(&mut self, entry: &TrackEntry) -> anyhow::Result<()> {
        if !entry.path().exists() {
            return Err(TrackError::MissingFile(entry.file_path.clone()).into());
        }

        self.backend.load(entry.path())?;
        self.backend.play();
        Ok(())
    }
}

#[cfg(test)]
mod tests;
