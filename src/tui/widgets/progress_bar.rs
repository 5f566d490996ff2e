use crate::{
    get_readable_duration,
    ui_state::{DARK_GRAY, MID_GRAY, UiState},
};
use ratatui::{
    style::Stylize,
    widgets::{Block, LineGauge, Padding, StatefulWidget, Widget},
};

pub struct ProgressBar;

impl StatefulWidget for ProgressBar {
    type State = UiState;
    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let Some(np) = &state.now_playing else {
            return;
        };

        let progress = state.progress;
        let ratio = match progress.fraction {
            f if f.is_finite() => f.clamp(0.0, 1.0),
            _ => 0.0,
        };

        let elapsed = get_readable_duration(progress.elapsed);
        let label = match progress.duration {
            Some(total) => format!("{elapsed} / {}", get_readable_duration(total)),
            None => elapsed,
        };

        LineGauge::default()
            .block(Block::new().bg(DARK_GRAY).padding(Padding {
                left: 2,
                right: 3,
                top: area.height / 2,
                bottom: 0,
            }))
            .filled_style(np.accent())
            .unfilled_style(MID_GRAY)
            .label(label)
            .ratio(f64::from(ratio))
            .render(area, buf);
    }
}
