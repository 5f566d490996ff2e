mod layout;
mod renderer;
mod widgets;

pub use layout::AppLayout;
pub use renderer::render;
pub use widgets::{ErrorMsg, NowPlayingLine, ProgressBar, SideBar, TrackTable};
