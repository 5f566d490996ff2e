use super::TrackError;
use std::path::{Path, PathBuf};

/// A row as it comes out of the data layer: `(file_path, title, cover_path, artist)`,
/// where only the first two fields are mandatory and trailing fields may be absent.
pub type RawEntry = Vec<Option<String>>;

/// One playable item in a playlist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackEntry {
    pub file_path: PathBuf,
    pub title: String,
    pub cover_path: Option<PathBuf>,
    pub artist: Option<String>,
}

impl TrackEntry {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(file_path: P, title: S) -> Self {
        TrackEntry {
            file_path: file_path.into(),
            title: title.into(),
            cover_path: None,
            artist: None,
        }
    }

    pub fn with_cover<P: Into<PathBuf>>(mut self, cover: P) -> Self {
        self.cover_path = Some(cover.into());
        self
    }

    pub fn with_artist<S: Into<String>>(mut self, artist: S) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Title with the artist prefixed when one is known
    pub fn display_name(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{artist} - {}", self.title),
            None => self.title.clone(),
        }
    }
}

impl TryFrom<RawEntry> for TrackEntry {
    type Error = TrackError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let arity = raw.len();
        if !(2..=4).contains(&arity) {
            return Err(TrackError::MalformedEntry { arity });
        }

        let mut fields = raw.into_iter().map(|f| f.filter(|s| !s.trim().is_empty()));

        let file_path = fields
            .next()
            .flatten()
            .ok_or(TrackError::MissingField("file_path"))?;
        let title = fields
            .next()
            .flatten()
            .ok_or(TrackError::MissingField("title"))?;

        Ok(TrackEntry {
            file_path: PathBuf::from(file_path),
            title,
            cover_path: fields.next().flatten().map(PathBuf::from),
            artist: fields.next().flatten(),
        })
    }
}

/// Emitted every time the sequencer starts a new track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackChange {
    pub file_path: PathBuf,
    pub title: String,
    pub index: usize,
    pub cover_path: Option<PathBuf>,
    pub artist: Option<String>,
}

impl TrackChange {
    pub(crate) fn new(entry: &TrackEntry, index: usize) -> Self {
        TrackChange {
            file_path: entry.file_path.clone(),
            title: entry.title.clone(),
            index,
            cover_path: entry.cover_path.clone(),
            artist: entry.artist.clone(),
        }
    }
}
