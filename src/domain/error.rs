use std::path::PathBuf;
use thiserror::Error;

/// Failures a single track can run into between the database and the speaker.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    /// The file was gone when we tried to play it
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A raw row had an unsupported number of fields
    #[error("Malformed entry: expected 2 to 4 fields, found {arity}")]
    MalformedEntry { arity: usize },

    /// A required field was present but empty
    #[error("Malformed entry: missing {0}")]
    MissingField(&'static str),
}
