use super::{AppLayout, ErrorMsg, NowPlayingLine, ProgressBar, SideBar, TrackTable};
use crate::ui_state::{DARK_GRAY, UiState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    widgets::{Block, Clear, StatefulWidget, Widget},
};

pub fn render(f: &mut Frame, state: &mut UiState) {
    let layout = AppLayout::new(f.area(), state);

    Block::new().bg(DARK_GRAY).render(f.area(), f.buffer_mut());

    SideBar.render(layout.sidebar, f.buffer_mut(), state);
    TrackTable.render(layout.track_table, f.buffer_mut(), state);
    NowPlayingLine.render(layout.now_playing, f.buffer_mut(), state);
    ProgressBar.render(layout.progress_bar, f.buffer_mut(), state);

    if state.get_error().is_some() {
        let popup_rect = centered_rect(40, 30, f.area());
        Clear.render(popup_rect, f.buffer_mut());
        ErrorMsg.render(popup_rect, f.buffer_mut(), state);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
