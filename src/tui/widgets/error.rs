use crate::ui_state::{DARK_GRAY, DARK_WHITE, GOLD, MID_GRAY, UiState};
use ratatui::{
    style::{Color, Stylize},
    text::Line,
    widgets::{Block, BorderType, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};

const ERROR_RED: Color = Color::Rgb(220, 80, 80);

/// Popup for the last failed action. Each `anyhow` context layer gets its own line.
pub struct ErrorMsg;
impl StatefulWidget for ErrorMsg {
    type State = UiState;
    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let Some(err_str) = state.get_error() else {
            return;
        };

        let mut layers = err_str.split(": ");
        let mut lines = vec![Line::from(layers.next().unwrap_or_default()).fg(DARK_WHITE).bold()];
        lines.extend(layers.map(|cause| Line::from(format!("↳ {cause}")).fg(MID_GRAY)));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(ERROR_RED)
                    .title_top(Line::from(" Something went wrong ").fg(ERROR_RED).centered())
                    .title_bottom(Line::from(" any key to dismiss ").fg(GOLD).centered())
                    .padding(Padding::uniform(1)),
            )
            .bg(DARK_GRAY)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use ratatui::{buffer::Buffer, layout::Rect};

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn each_cause_gets_its_own_line() {
        let mut ui = UiState::new(80);
        ui.set_error(anyhow!("file not found").context("Could not play Song a"));

        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        ErrorMsg.render(area, &mut buf, &mut ui);

        let rows = rows(&buf);
        assert!(rows[0].contains("Something went wrong"));
        assert!(rows[2].contains("Could not play Song a"));
        assert!(rows[3].contains("↳ file not found"));
        assert!(rows[7].contains("any key to dismiss"));
    }

    #[test]
    fn nothing_is_drawn_without_an_error() {
        let mut ui = UiState::new(80);
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        ErrorMsg.render(area, &mut buf, &mut ui);
        assert_eq!(buf, Buffer::empty(area));
    }
}
