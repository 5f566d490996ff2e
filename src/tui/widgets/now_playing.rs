use super::PAUSE_ICON;
use crate::ui_state::{DARK_WHITE, GOLD_FADED, MID_GRAY, UiState};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Stylize,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

pub struct NowPlayingLine;

impl StatefulWidget for NowPlayingLine {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let separator = match state.is_paused() {
            true => Span::from(format!(" {PAUSE_ICON} ")).fg(DARK_WHITE),
            false => Span::from(" ✧ ").fg(MID_GRAY),
        };

        let playing_title = match &state.now_playing {
            Some(np) => {
                let mut spans = vec![Span::from(np.change.title.clone()).fg(np.accent())];
                if let Some(artist) = &np.change.artist {
                    spans.push(separator);
                    spans.push(Span::from(artist.clone()).fg(MID_GRAY));
                }
                Line::from(spans).centered()
            }
            None => Line::from("Nothing playing").fg(MID_GRAY).centered(),
        };

        let shuffle = match state.shuffle {
            true => Span::from("shuffle ").fg(GOLD_FADED),
            false => Span::default(),
        };
        let status = Line::from_iter([
            shuffle,
            Span::from(format!("vol {:>3}%  ", state.volume)).fg(MID_GRAY),
        ])
        .right_aligned();

        let [_, center, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
            ])
            .areas(area);

        playing_title.render(center, buf);
        status.render(right, buf);
    }
}
