mod backend_rodio;
mod core;
mod metrics;

pub use backend_rodio::RodioBackend;
pub use metrics::PlaybackMetrics;

use anyhow::Result;
use crossbeam_channel::Sender;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// The transport layer the sequencer drives.
///
/// Implementations are expected to answer quickly; the sequencer calls
/// into them while holding its state lock.
pub trait MediaBackend: Send {
    /// Open `path` and prepare it for playback without starting it
    fn load(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);

    fn is_playing(&self) -> bool;
    fn is_seekable(&self) -> bool;

    /// Seek to a fraction of the current track, `0.0..=1.0`
    fn set_position(&mut self, fraction: f32) -> Result<()>;
    fn position(&self) -> f32;
    fn elapsed(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;

    /// Volume in percent, `0..=100`
    fn set_volume(&mut self, volume: u8);
    fn volume(&self) -> u8;

    fn status(&self) -> PlayerStatus;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum PlayerStatus {
    Idle = 0,
    Playing = 1,
    Paused = 2,
    Stopped = 3,
    Ended = 4,
    Error = 5,
}

impl From<PlayerStatus> for u8 {
    fn from(status: PlayerStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for PlayerStatus {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(PlayerStatus::Idle),
            1 => Ok(PlayerStatus::Playing),
            2 => Ok(PlayerStatus::Paused),
            3 => Ok(PlayerStatus::Stopped),
            4 => Ok(PlayerStatus::Ended),
            5 => Ok(PlayerStatus::Error),
            _ => Err(()),
        }
    }
}

pub(crate) enum PlayerCommand {
    Load(PathBuf, Sender<Result<()>>),
    Play,
    Pause,
    Stop,
    Seek(Duration),
    SetVolume(u8),
    Quit,
}
