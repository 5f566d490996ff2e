use anyhow::{Result, anyhow};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod artwork;
pub mod database;
pub mod domain;
pub mod key_handler;
pub mod logging;
pub mod player;
pub mod sequencer;
pub mod settings;
pub mod tui;
pub mod ui_state;

pub use database::Database;
pub use sequencer::Sequencer;
pub use settings::Settings;

// ~30fps
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

pub const APP_DIRECTORY: &str = "tapedeck";

/// `m:ss`, as shown next to the progress bar
pub fn get_readable_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;

    match path_str.as_ref() {
        "~" => Ok(home),
        s if s.starts_with("~/") || s.starts_with("~\\") => Ok(home.join(&s[2..])),
        _ => Err(anyhow!("Cannot expand {path_str}: only ~/ paths are supported")),
    }
}
