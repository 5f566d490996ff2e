use crate::{
    Database, Sequencer, Settings,
    artwork,
    domain::TrackChange,
    key_handler,
    player::MediaBackend,
    sequencer::Watcher,
    tui,
    ui_state::{Mode, NowPlaying, UiState},
};
use anyhow::Result;
use crossbeam_channel::Receiver;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event, KeyEventKind},
};
use tracing::{debug, error, info};

pub struct Tapedeck {
    pub(crate) settings: Settings,
    pub(crate) db: Database,
    pub(crate) sequencer: Sequencer,
    pub(crate) ui: UiState,
    changes: Receiver<TrackChange>,
    watcher: Option<Watcher>,
}

impl Tapedeck {
    pub fn new(settings: Settings, db: Database, backend: Box<dyn MediaBackend>) -> Self {
        let (change_tx, changes) = crossbeam_channel::unbounded();

        // Fired from the UI thread and the watcher thread alike
        let sequencer = Sequencer::new(backend).with_callback(move |change| {
            let _ = change_tx.send(change.clone());
        });

        sequencer.set_volume(f64::from(settings.initial_volume));
        if settings.start_shuffled {
            sequencer.toggle_shuffle();
        }

        let watcher = Watcher::spawn(sequencer.clone(), settings.poll_interval());

        let mut ui = UiState::new(settings.initial_volume);
        ui.shuffle = sequencer.is_shuffle_enabled();

        Tapedeck {
            settings,
            db,
            sequencer,
            ui,
            changes,
            watcher: Some(watcher),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        if let Err(e) = self.refresh_playlists() {
            self.ui.set_error(e);
        }

        let mut terminal = ratatui::init();
        terminal.clear()?;

        let result = self.main_loop(&mut terminal);

        ratatui::restore();
        self.shutdown();

        result
    }

    fn main_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            self.drain_track_changes();
            self.sync_transport();

            terminal.draw(|f| tui::render(f, &mut self.ui))?;

            match key_handler::next_event(self.settings.refresh_rate())? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(key, &self.ui) {
                        if let Err(e) = self.handle_action(action) {
                            error!("{e:#}");
                            self.ui.set_error(e);
                        }
                    }
                }
                _ => (),
            }

            if self.ui.get_mode() == Mode::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Stop playback and wait for the watcher to notice
    pub fn shutdown(&mut self) {
        self.sequencer.shutdown();
        if let Some(watcher) = self.watcher.take() {
            watcher.join();
        }
        info!("Shut down cleanly");
    }

    pub(crate) fn drain_track_changes(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            self.apply_track_change(change);
        }
    }

    /// Show `change` as now playing unless a later change already replaced it.
    /// Returns whether the view was updated.
    pub(crate) fn apply_track_change(&mut self, change: TrackChange) -> bool {
        if !self.sequencer.is_current(&change) {
            debug!("Dropping stale track change for [{}]", change.index);
            return false;
        }

        let cover_path = change
            .cover_path
            .as_deref()
            .map(|cover| self.settings.resolve_cover(cover));
        let cover = artwork::load_cover(cover_path.as_deref(), self.settings.cover_size);

        self.ui.set_now_playing(NowPlaying::new(change, &cover));
        true
    }

    pub(crate) fn sync_transport(&mut self) {
        self.ui.progress = self.sequencer.progress();
        self.ui.paused = self.sequencer.is_paused();
        self.ui.shuffle = self.sequencer.is_shuffle_enabled();
    }
}

impl Drop for Tapedeck {
    fn drop(&mut self) {
        if self.watcher.is_some() {
            self.shutdown();
        }
    }
}
