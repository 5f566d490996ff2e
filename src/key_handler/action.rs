use crate::{
    app_core::Tapedeck,
    key_handler::*,
    ui_state::{Mode, Pane, UiState},
};
use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::time::Duration;

use KeyCode::*;

pub fn handle_key_event(key_event: KeyEvent, state: &UiState) -> Option<Action> {
    if let Some(action) = global_commands(&key_event, state) {
        return Some(action);
    }

    match state.get_pane() {
        Pane::SideBar => handle_sidebar(&key_event),
        Pane::TrackList => handle_tracklist(&key_event),
    }
}

fn global_commands(key: &KeyEvent, state: &UiState) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) => return Some(Action::Quit),
        _ if state.get_error().is_some() => return Some(Action::DismissError),
        _ => (),
    }

    match (key.modifiers, key.code) {
        (X, Char('q')) => Some(Action::Quit),

        // PLAYBACK COMMANDS
        (X, Char(' ')) => Some(Action::TogglePause),
        (X, Char('n')) => Some(Action::PlayNext),
        (X, Char('p')) => Some(Action::PlayPrev),
        (X, Char('s')) => Some(Action::ToggleShuffle),
        (_, Char('+')) | (_, Char('=')) => Some(Action::VolumeUp),
        (_, Char('-')) => Some(Action::VolumeDown),
        (X, Char('l')) => Some(Action::SeekForward),
        (X, Char('h')) => Some(Action::SeekBack),

        // SCROLLING
        (X, Char('j')) | (X, Down) => Some(Action::Scroll(Director::Down(1))),
        (X, Char('k')) | (X, Up) => Some(Action::Scroll(Director::Up(1))),
        (X, Char('d')) | (X, PageDown) => Some(Action::Scroll(Director::Down(SCROLL_MID))),
        (X, Char('u')) | (X, PageUp) => Some(Action::Scroll(Director::Up(SCROLL_MID))),
        (X, Char('g')) | (X, Home) => Some(Action::Scroll(Director::Top)),
        (S, Char('G')) | (X, End) => Some(Action::Scroll(Director::Bottom)),

        (X, Tab) => Some(Action::SwitchPane),
        (X, Enter) => Some(Action::Select),
        (X, F(5)) | (C, Char('r')) => Some(Action::RefreshPlaylists),

        _ => None,
    }
}

fn handle_sidebar(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Right) => Some(Action::Select),
        _ => None,
    }
}

fn handle_tracklist(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Left) | (X, Esc) => Some(Action::ChangePane(Pane::SideBar)),
        _ => None,
    }
}

pub fn next_event(timeout: Duration) -> Result<Option<Event>> {
    match event::poll(timeout)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}

impl Tapedeck {
    #[rustfmt::skip]
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Player
            Action::Select          => match self.ui.get_pane() {
                Pane::SideBar       => self.open_selected_playlist()?,
                Pane::TrackList     => self.play_selected_track(),
            },
            Action::TogglePause     => { self.ui.paused = self.sequencer.toggle_pause(); }
            Action::PlayNext        => self.sequencer.next(),
            Action::PlayPrev        => self.sequencer.prev(),
            Action::ToggleShuffle   => { self.ui.shuffle = self.sequencer.toggle_shuffle(); }
            Action::VolumeUp        => self.step_volume(true),
            Action::VolumeDown      => self.step_volume(false),
            Action::SeekForward     => self.seek(true),
            Action::SeekBack        => self.seek(false),

            // UI
            Action::Scroll(s)       => self.ui.scroll(s),
            Action::SwitchPane      => self.ui.switch_pane(),
            Action::ChangePane(p)   => self.ui.set_pane(p),
            Action::RefreshPlaylists => self.refresh_playlists()?,
            Action::DismissError    => self.ui.clear_error(),
            Action::Quit            => self.ui.set_mode(Mode::Quit),
        }
        Ok(())
    }
}
