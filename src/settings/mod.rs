use crate::{APP_DIRECTORY, expand_tilde};
use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

const CONFIG_FILENAME: &str = "config.toml";
const DATABASE_FILENAME: &str = "tapedeck.db";
const LOG_FILENAME: &str = "tapedeck.log";

/// User configuration, read from `<config dir>/tapedeck/config.toml`.
///
/// Every field is optional in the file; missing ones fall back to defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// SQLite file holding songs and playlists
    pub database_path: Option<PathBuf>,
    /// Base directory for cover images stored with relative paths
    pub covers_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,

    /// How often the end-of-track watcher polls the player
    pub poll_interval_ms: u64,
    /// UI redraw / progress refresh tick
    pub refresh_rate_ms: u64,

    pub initial_volume: u8,
    pub volume_step: u8,
    /// Fraction of the track skipped by one seek keypress
    pub seek_step: f32,
    pub start_shuffled: bool,

    pub cover_size: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_path: None,
            covers_dir: None,
            log_file: None,

            poll_interval_ms: 1000,
            refresh_rate_ms: 100,

            initial_volume: 80,
            volume_step: 5,
            seek_step: 0.05,
            start_shuffled: false,

            cover_size: (300, 300),
        }
    }
}

impl Settings {
    /// Load from the default location, or defaults when the file is absent
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(CONFIG_FILENAME);
        match path.exists() {
            true => Self::load_from_file(&path),
            false => {
                info!("No config at {}, using defaults", path.display());
                Ok(Settings::default())
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&file_str)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let mut settings = toml::from_str::<Settings>(s)?;
        settings.normalize()?;
        Ok(settings)
    }

    fn normalize(&mut self) -> Result<()> {
        for path in [
            &mut self.database_path,
            &mut self.covers_dir,
            &mut self.log_file,
        ]
        .into_iter()
        .flatten()
        {
            *path = expand_tilde(&path)?;
        }

        self.initial_volume = self.initial_volume.min(100);
        self.seek_step = self.seek_step.clamp(0.0, 1.0);

        if self.poll_interval_ms == 0 {
            return Err(anyhow!("poll_interval_ms must be at least 1"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn refresh_rate(&self) -> Duration {
        Duration::from_millis(self.refresh_rate_ms.max(1))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(p) => Ok(p.clone()),
            None => Ok(data_dir()?.join(DATABASE_FILENAME)),
        }
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(p) => Ok(p.clone()),
            None => Ok(data_dir()?.join(LOG_FILENAME)),
        }
    }

    /// Resolve a cover path against `covers_dir` when it is relative
    pub fn resolve_cover(&self, cover: &Path) -> PathBuf {
        match (&self.covers_dir, cover.is_relative()) {
            (Some(base), true) => base.join(cover),
            _ => cover.to_path_buf(),
        }
    }
}

fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIRECTORY))
        .ok_or_else(|| anyhow!("Config folder not present on system!"))
}

fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIRECTORY))
        .ok_or_else(|| anyhow!("Data folder not present on system!"))
}
