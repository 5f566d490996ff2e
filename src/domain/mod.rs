mod error;
mod playlist;
mod track_entry;

pub use error::TrackError;
pub use playlist::Playlist;
pub use track_entry::{RawEntry, TrackChange, TrackEntry};
