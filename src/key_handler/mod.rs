mod action;

pub use action::{handle_key_event, next_event};

use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

const SCROLL_MID: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    // Player Controls
    Select,
    TogglePause,
    PlayNext,
    PlayPrev,
    ToggleShuffle,
    VolumeUp,
    VolumeDown,
    SeekForward,
    SeekBack,

    // Updating App State
    Scroll(Director),
    SwitchPane,
    ChangePane(crate::ui_state::Pane),
    RefreshPlaylists,
    DismissError,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Director {
    Up(usize),
    Down(usize),
    Top,
    Bottom,
}

#[cfg(test)]
mod tests;
