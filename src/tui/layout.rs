use crate::ui_state::UiState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

const SIDEBAR_PERCENT: u16 = 30;

pub struct AppLayout {
    pub sidebar: Rect,
    pub track_table: Rect,
    pub now_playing: Rect,
    pub progress_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, state: &UiState) -> Self {
        // Nothing to show until the sequencer reports a track
        let progress_height = match state.now_playing.is_some() {
            true => 3,
            false => 0,
        };

        let [upper_block, now_playing, progress_bar] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(progress_height),
            ])
            .areas(area);

        let [sidebar, _, track_table] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(SIDEBAR_PERCENT),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(upper_block);

        AppLayout {
            sidebar,
            track_table,
            now_playing,
            progress_bar,
        }
    }
}
