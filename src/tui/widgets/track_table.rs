use super::{MUSIC_NOTE, PAUSE_ICON};
use crate::ui_state::{DARK_WHITE, GOLD, MID_GRAY, Pane, UiState, border_color};
use ratatui::{
    layout::Constraint,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Cell, Padding, Row, StatefulWidget, Table},
};

const COLUMN_SPACING: u16 = 2;

pub struct TrackTable;
impl StatefulWidget for TrackTable {
    type State = UiState;
    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let focused = state.get_pane() == Pane::TrackList;
        let playing_row = state.now_playing_row();
        let accent = state.now_playing.as_ref().map_or(GOLD, |np| np.accent());

        let status_icon = match state.is_paused() {
            true => PAUSE_ICON,
            false => MUSIC_NOTE,
        };

        let name = state
            .opened_playlist()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "No playlist open".to_string());

        let title = Line::from_iter([
            Span::from(" ♠ ").fg(border_color(focused)),
            Span::from(name).fg(DARK_WHITE).italic(),
            Span::from(" ♠ ").fg(border_color(focused)),
            Span::from(format!("[{} Songs] ", state.tracks.len())).fg(MID_GRAY),
        ]);

        let rows = state
            .tracks
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let is_playing = playing_row == Some(idx);
                let icon = match is_playing {
                    true => Span::from(status_icon).fg(accent),
                    false => Span::default(),
                };
                let title = match is_playing {
                    true => Span::from(entry.title.as_str()).fg(accent),
                    false => Span::from(entry.title.as_str()).fg(DARK_WHITE),
                };

                Row::new([
                    Cell::from(Line::from(format!("{:>3}", idx + 1)).fg(MID_GRAY)),
                    Cell::from(icon),
                    Cell::from(title),
                    Cell::from(Span::from(entry.artist.as_deref().unwrap_or("")).fg(MID_GRAY)),
                ])
            })
            .collect::<Vec<Row>>();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(25),
            Constraint::Max(30),
        ];

        let keymaps = match focused {
            true => Line::from(" [enter] play ✧ [s]huffle ✧ [n]ext ✧ [p]rev ").fg(MID_GRAY),
            false => Line::default(),
        };

        let table = Table::new(rows, widths)
            .column_spacing(COLUMN_SPACING)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_color(focused))
                    .title_top(title)
                    .title_bottom(keymaps.centered())
                    .padding(Padding {
                        left: 2,
                        right: 2,
                        top: 1,
                        bottom: 1,
                    }),
            )
            .row_highlight_style(match focused {
                true => Style::new().fg(Color::Black).bg(GOLD).italic(),
                false => Style::new().fg(GOLD).italic(),
            });

        StatefulWidget::render(table, area, buf, &mut state.table_pos);
    }
}
