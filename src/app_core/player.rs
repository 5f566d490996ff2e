use crate::{app_core::Tapedeck, ui_state::Pane};
use anyhow::{Context, Result};
use tracing::info;

impl Tapedeck {
    pub(crate) fn refresh_playlists(&mut self) -> Result<()> {
        let playlists = self
            .db
            .get_playlists()
            .context("Could not read playlists")?;
        info!("Found {} playlists", playlists.len());
        self.ui.set_playlists(playlists);
        Ok(())
    }

    /// Show the highlighted playlist's tracks and move focus to them
    pub(crate) fn open_selected_playlist(&mut self) -> Result<()> {
        let Some(id) = self.ui.selected_playlist().map(|p| p.id) else {
            return Ok(());
        };

        let entries = self
            .db
            .get_playlist_entries(id)
            .with_context(|| format!("Could not read playlist {id}"))?;

        self.ui.open_playlist(id, entries);
        self.ui.set_pane(Pane::TrackList);
        Ok(())
    }

    /// Play the highlighted row, handing the whole playlist to the
    /// sequencer first when it is not the one already loaded.
    pub(crate) fn play_selected_track(&mut self) {
        let Some(idx) = self.ui.selected_track() else {
            return;
        };

        match self.ui.opened_is_loaded() {
            true => {
                self.sequencer.play_at(idx);
            }
            false => {
                self.sequencer.load_from(self.ui.tracks.clone(), idx);
                self.ui.mark_opened_as_loaded();
            }
        }
    }

    pub(crate) fn step_volume(&mut self, up: bool) {
        let step = self.settings.volume_step;
        let volume = match up {
            true => self.ui.volume.saturating_add(step).min(100),
            false => self.ui.volume.saturating_sub(step),
        };

        self.sequencer.set_volume(f64::from(volume));
        self.ui.volume = volume;
    }

    pub(crate) fn seek(&mut self, forward: bool) {
        let step = match forward {
            true => self.settings.seek_step,
            false => -self.settings.seek_step,
        };
        let target = self.sequencer.progress().fraction + step;
        self.sequencer.set_position(target.clamp(0.0, 1.0));
    }
}
