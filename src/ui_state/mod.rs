mod mode;
mod now_playing;
mod pane;
mod theme;
mod ui_state;

pub use mode::Mode;
pub use now_playing::NowPlaying;
pub use pane::Pane;
pub use theme::*;
pub use ui_state::UiState;
