#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
}

impl Playlist {
    pub fn new(id: i64, name: String) -> Self {
        Playlist { id, name }
    }
}
