#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    #[default]
    SideBar,
    TrackList,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::SideBar => Pane::TrackList,
            Pane::TrackList => Pane::SideBar,
        }
    }
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pane::SideBar => write!(f, "sidebar"),
            Pane::TrackList => write!(f, "tracklist"),
        }
    }
}
