use crate::{
    artwork::{Cover, average_color},
    domain::TrackChange,
    ui_state::GOLD,
};
use ratatui::style::Color;

/// The track the sequencer last reported, plus what the cover told us about it
pub struct NowPlaying {
    pub change: TrackChange,
    pub cover_found: bool,
    accent: Option<Color>,
}

impl NowPlaying {
    pub fn new(change: TrackChange, cover: &Cover) -> Self {
        let accent = cover.found.then(|| {
            let (r, g, b) = average_color(&cover.image);
            Color::Rgb(r, g, b)
        });

        NowPlaying {
            change,
            cover_found: cover.found,
            accent,
        }
    }

    /// Cover tint, falling back to the default highlight
    pub fn accent(&self) -> Color {
        self.accent.unwrap_or(GOLD)
    }
}
