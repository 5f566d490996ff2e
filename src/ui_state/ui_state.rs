use crate::{
    domain::{Playlist, TrackEntry},
    key_handler::Director,
    sequencer::Progress,
    ui_state::{Mode, NowPlaying, Pane},
};
use anyhow::Error;
use ratatui::widgets::{ListState, TableState};

pub struct UiState {
    // View models
    pub(crate) playlists: Vec<Playlist>,
    pub(crate) playlist_pos: ListState,
    pub(crate) tracks: Vec<TrackEntry>,
    pub(crate) table_pos: TableState,

    // Playlist shown in the table, and the one handed to the sequencer
    opened: Option<i64>,
    loaded: Option<i64>,

    pane: Pane,
    mode: Mode,
    error: Option<String>,

    // Mirrors of the sequencer, refreshed every tick
    pub(crate) now_playing: Option<NowPlaying>,
    pub(crate) progress: Progress,
    pub(crate) paused: bool,
    pub(crate) shuffle: bool,
    pub(crate) volume: u8,
}

impl UiState {
    pub fn new(volume: u8) -> Self {
        UiState {
            playlists: Vec::new(),
            playlist_pos: ListState::default(),
            tracks: Vec::new(),
            table_pos: TableState::default(),
            opened: None,
            loaded: None,
            pane: Pane::default(),
            mode: Mode::default(),
            error: None,
            now_playing: None,
            progress: Progress::default(),
            paused: false,
            shuffle: false,
            volume,
        }
    }
}

// =============
//   PLAYLISTS
// =============
impl UiState {
    pub fn set_playlists(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;

        let selection = match self.playlists.len() {
            0 => None,
            len => Some(self.playlist_pos.selected().unwrap_or(0).min(len - 1)),
        };
        self.playlist_pos.select(selection);
    }

    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.playlist_pos
            .selected()
            .and_then(|idx| self.playlists.get(idx))
    }

    pub fn opened_playlist(&self) -> Option<&Playlist> {
        let id = self.opened?;
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Show `entries` in the track table
    pub fn open_playlist(&mut self, id: i64, entries: Vec<TrackEntry>) {
        self.tracks = entries;
        self.opened = Some(id);

        let selection = match self.now_playing_row() {
            Some(row) => Some(row),
            None => (!self.tracks.is_empty()).then_some(0),
        };
        self.table_pos.select(selection);
    }

    /// Whether the table shows the playlist the sequencer is playing
    pub fn opened_is_loaded(&self) -> bool {
        self.opened.is_some() && self.opened == self.loaded
    }

    pub fn loaded_playlist_id(&self) -> Option<i64> {
        self.loaded
    }

    pub fn mark_opened_as_loaded(&mut self) {
        self.loaded = self.opened;
    }

    pub fn selected_track(&self) -> Option<usize> {
        self.table_pos
            .selected()
            .filter(|&idx| idx < self.tracks.len())
    }
}

// ============
//   PLAYBACK
// ============
impl UiState {
    pub fn set_now_playing(&mut self, now_playing: NowPlaying) {
        self.now_playing = Some(now_playing);
        if let Some(row) = self.now_playing_row() {
            self.table_pos.select(Some(row));
        }
    }

    /// Table row of the current track, if the table shows the loaded playlist
    pub fn now_playing_row(&self) -> Option<usize> {
        match self.opened_is_loaded() {
            true => self
                .now_playing
                .as_ref()
                .map(|np| np.change.index)
                .filter(|&idx| idx < self.tracks.len()),
            false => None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

// ==============
//   NAVIGATION
// ==============
impl UiState {
    pub fn scroll(&mut self, director: Director) {
        let (len, current) = match self.pane {
            Pane::SideBar => (self.playlists.len(), self.playlist_pos.selected()),
            Pane::TrackList => (self.tracks.len(), self.table_pos.selected()),
        };

        if len == 0 {
            return;
        }

        let current = current.unwrap_or(0);
        let new_pos = match director {
            Director::Up(x) => (current + len - (x % len)) % len,
            Director::Down(x) => (current + x) % len,
            Director::Top => 0,
            Director::Bottom => len - 1,
        };

        match self.pane {
            Pane::SideBar => self.playlist_pos.select(Some(new_pos)),
            Pane::TrackList => self.table_pos.select(Some(new_pos)),
        }
    }

    pub fn get_pane(&self) -> Pane {
        self.pane
    }

    pub fn set_pane(&mut self, pane: Pane) {
        self.pane = pane;
    }

    pub fn switch_pane(&mut self) {
        self.pane = self.pane.other();
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

// ==========
//   ERRORS
// ==========
impl UiState {
    pub fn set_error(&mut self, e: Error) {
        self.error = Some(format!("{e:#}"));
    }

    pub fn get_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
