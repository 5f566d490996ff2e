mod error;
mod now_playing;
mod progress_bar;
mod sidebar;
mod track_table;

pub use error::ErrorMsg;
pub use now_playing::NowPlayingLine;
pub use progress_bar::ProgressBar;
pub use sidebar::SideBar;
pub use track_table::TrackTable;

const PAUSE_ICON: &str = "⏸";
const MUSIC_NOTE: &str = "♫";
