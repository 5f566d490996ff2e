use crate::player::PlayerStatus;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering},
    },
    time::Duration,
};

const NO_DURATION: u64 = u64::MAX;

/// Lock-free view of the audio thread, readable from any thread.
pub struct PlaybackMetrics {
    status: AtomicU8,
    elapsed_ms: AtomicU64,
    duration_ms: AtomicU64,
    volume: AtomicU8,
    seekable: AtomicBool,
}

impl PlaybackMetrics {
    pub fn new(volume: u8) -> Arc<Self> {
        Arc::new(PlaybackMetrics {
            status: AtomicU8::new(PlayerStatus::Idle.into()),
            elapsed_ms: AtomicU64::new(0),
            duration_ms: AtomicU64::new(NO_DURATION),
            volume: AtomicU8::new(volume.min(100)),
            seekable: AtomicBool::new(false),
        })
    }

    pub fn get_status(&self) -> PlayerStatus {
        self.status
            .load(Ordering::Relaxed)
            .try_into()
            .unwrap_or(PlayerStatus::Error)
    }

    pub fn set_status(&self, status: PlayerStatus) {
        self.status.store(status.into(), Ordering::Relaxed);
    }

    pub fn get_elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::Relaxed))
    }

    pub fn set_elapsed(&self, d: Duration) {
        self.elapsed_ms
            .store(d.as_millis() as u64, Ordering::Relaxed)
    }

    pub fn get_duration(&self) -> Option<Duration> {
        match self.duration_ms.load(Ordering::Relaxed) {
            NO_DURATION => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn set_duration(&self, d: Option<Duration>) {
        let ms = d.map_or(NO_DURATION, |d| d.as_millis() as u64);
        self.duration_ms.store(ms, Ordering::Relaxed);
        self.seekable.store(d.is_some(), Ordering::Relaxed);
    }

    pub fn get_volume(&self) -> u8 {
        self.volume.load(Ordering::Relaxed)
    }

    pub fn set_volume(&self, volume: u8) {
        self.volume.store(volume.min(100), Ordering::Relaxed)
    }

    pub fn is_seekable(&self) -> bool {
        self.seekable.load(Ordering::Relaxed)
    }

    /// Fraction of the current track already played
    pub fn get_position(&self) -> f32 {
        match self.get_duration() {
            Some(d) if !d.is_zero() => {
                (self.get_elapsed().as_secs_f32() / d.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn reset(&self) {
        self.set_elapsed(Duration::ZERO);
        self.set_duration(None);
    }
}
