use crate::player::{
    MediaBackend, PlaybackMetrics, PlayerCommand, PlayerStatus, core::AudioCore,
};
use anyhow::{Result, anyhow};
use crossbeam_channel::{Sender, bounded, unbounded};
use std::{
    path::Path,
    sync::Arc,
    thread::JoinHandle,
    time::Duration,
};

const LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// `MediaBackend` backed by a rodio sink running on a dedicated audio thread.
pub struct RodioBackend {
    commands: Sender<PlayerCommand>,
    metrics: Arc<PlaybackMetrics>,
    thread: Option<JoinHandle<()>>,
}

impl RodioBackend {
    pub fn new(volume: u8) -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);
        let metrics = PlaybackMetrics::new(volume);

        let thread = AudioCore::spawn(cmd_rx, Arc::clone(&metrics), ready_tx);
        ready_rx
            .recv()
            .map_err(|_| anyhow!("Audio thread exited during startup"))??;

        Ok(Self {
            commands: cmd_tx,
            metrics,
            thread: Some(thread),
        })
    }

    fn send(&self, cmd: PlayerCommand) {
        if self.commands.send(cmd).is_err() {
            self.metrics.set_status(PlayerStatus::Error);
        }
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<()> {
        let (reply_tx, reply_rx) = bounded(1);
        self.commands
            .send(PlayerCommand::Load(path.to_path_buf(), reply_tx))
            .map_err(|_| anyhow!("Audio thread is gone"))?;

        reply_rx
            .recv_timeout(LOAD_TIMEOUT)
            .map_err(|_| anyhow!("Audio thread did not answer load of {}", path.display()))?
    }

    fn play(&mut self) {
        self.send(PlayerCommand::Play);
    }

    fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
    }

    fn stop(&mut self) {
        self.send(PlayerCommand::Stop);
    }

    fn is_playing(&self) -> bool {
        self.metrics.get_status() == PlayerStatus::Playing
    }

    fn is_seekable(&self) -> bool {
        self.metrics.is_seekable()
    }

    fn set_position(&mut self, fraction: f32) -> Result<()> {
        let duration = self
            .metrics
            .get_duration()
            .ok_or_else(|| anyhow!("Current track has no known duration"))?;

        self.commands
            .send(PlayerCommand::Seek(duration.mul_f32(fraction.clamp(0.0, 1.0))))
            .map_err(|_| anyhow!("Audio thread is gone"))?;
        Ok(())
    }

    fn position(&self) -> f32 {
        self.metrics.get_position()
    }

    fn elapsed(&self) -> Duration {
        self.metrics.get_elapsed()
    }

    fn duration(&self) -> Option<Duration> {
        self.metrics.get_duration()
    }

    fn set_volume(&mut self, volume: u8) {
        // Readers see the new level before the audio thread gets to it
        self.metrics.set_volume(volume);
        self.send(PlayerCommand::SetVolume(volume));
    }

    fn volume(&self) -> u8 {
        self.metrics.get_volume()
    }

    fn status(&self) -> PlayerStatus {
        self.metrics.get_status()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.commands.send(PlayerCommand::Quit);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
