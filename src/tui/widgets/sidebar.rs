use super::MUSIC_NOTE;
use crate::ui_state::{DARK_WHITE, GOLD_FADED, MID_GRAY, Pane, UiState, border_color};
use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, Padding, StatefulWidget},
};

pub struct SideBar;
impl StatefulWidget for SideBar {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let focused = state.get_pane() == Pane::SideBar;
        let loaded = state.loaded_playlist_id();

        let list_items = state.playlists.iter().map(|p| {
            let marker = match Some(p.id) == loaded {
                true => Span::from(format!("{MUSIC_NOTE} ")).fg(GOLD_FADED),
                false => Span::from("  "),
            };
            ListItem::new(Line::from_iter([marker, Span::from(p.name.as_str()).fg(DARK_WHITE)]))
        });

        let keymaps = match focused {
            true => Line::from(" [enter] open ✧ [tab] tracks ").fg(MID_GRAY),
            false => Line::default(),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_color(focused))
            .title_top(
                Line::from(format!(" ⟪ {} Playlists ⟫ ", state.playlists.len()))
                    .left_aligned()
                    .fg(border_color(focused)),
            )
            .title_bottom(keymaps.centered())
            .padding(Padding {
                left: 2,
                right: 2,
                top: 1,
                bottom: 1,
            });

        let list = List::new(list_items)
            .block(block)
            .highlight_style(Style::new().fg(Color::Black).bg(border_color(focused)).italic())
            .scroll_padding(4);

        list.render(area, buf, &mut state.playlist_pos);
    }
}
