use crate::{
    Database,
    database::queries::{
        ADD_SONG_TO_PLAYLIST, CLEAR_PLAYLISTS, CLEAR_SONGS, CREATE_NEW_PLAYLIST, INSERT_SONG,
        SONG_EXISTS,
    },
};
use anyhow::{Result, anyhow};
use rusqlite::{OptionalExtension, params};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info, warn};

/// One song as exported by the downloader, before it lands in `songs`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SongRecord {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artists: Option<String>,
    pub mp4_path: Option<String>,
    pub copertina_640_path: Option<String>,
    pub copertina_300_path: Option<String>,
    pub copertina_64_path: Option<String>,
}

impl Database {
    /// Replace the song table with the contents of a JSON array of songs.
    ///
    /// Records without an id or a title are skipped. Returns the number of
    /// songs inserted. The whole import is one transaction.
    pub fn import_songs_json<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let file_str = fs::read_to_string(path.as_ref())?;
        let records: Vec<SongRecord> = serde_json::from_str(&file_str)?;
        info!(
            "Importing {} songs from {}",
            records.len(),
            path.as_ref().display()
        );

        let tx = self.conn.transaction()?;
        tx.execute(CLEAR_SONGS, [])?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(INSERT_SONG)?;
            for record in &records {
                let (Some(song_id), Some(title)) = (&record.song_id, &record.title) else {
                    warn!("Skipping song without id or title: {record:?}");
                    continue;
                };

                stmt.execute(params![
                    song_id,
                    title,
                    record.artists,
                    record.mp4_path,
                    record.copertina_640_path,
                    record.copertina_300_path,
                    record.copertina_64_path,
                ])?;
                inserted += 1;
            }
        }
        tx.commit()?;

        info!("Imported {inserted} songs");
        Ok(inserted)
    }

    /// Rebuild every playlist from the `*.csv` files in `dir`.
    ///
    /// Each file becomes one playlist named after the file. Files are
    /// imported independently; a broken file is logged and rolled back
    /// without affecting the others. Returns the number of playlists created.
    pub fn import_playlists_csv<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(CLEAR_PLAYLISTS)?;
        tx.commit()?;

        let mut files: Vec<PathBuf> = fs::read_dir(dir.as_ref())?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();
        files.sort();

        if files.is_empty() {
            warn!("No CSV files found in {}", dir.as_ref().display());
            return Ok(0);
        }

        let mut created = 0;
        for file in &files {
            match self.import_playlist_file(file) {
                Ok((name, count)) => {
                    info!("Playlist '{name}': {count} songs");
                    created += 1;
                }
                Err(e) => error!("Failed to import {}: {e}", file.display()),
            }
        }

        Ok(created)
    }

    fn import_playlist_file(&mut self, file: &Path) -> Result<(String, usize)> {
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("Unusable file name"))?;
        let name = playlist_name_from_stem(stem);
        let song_ids = read_song_ids(&fs::read_to_string(file)?)?;

        let tx = self.conn.transaction()?;
        tx.execute(CREATE_NEW_PLAYLIST, params![name])?;
        let playlist_id = tx.last_insert_rowid();

        let mut count = 0;
        for song_id in &song_ids {
            let known = tx
                .query_row(SONG_EXISTS, params![song_id], |_| Ok(()))
                .optional()?
                .is_some();

            match known {
                true => {
                    tx.execute(ADD_SONG_TO_PLAYLIST, params![playlist_id, song_id])?;
                    count += 1;
                }
                false => warn!("Song '{song_id}' from {} is not in the library", file.display()),
            }
        }
        tx.commit()?;

        Ok((name, count))
    }
}

/// Turn a file stem like `playlist_3_rock_classics-anni-80` into `Rock Classics Anni 80`
pub fn playlist_name_from_stem(stem: &str) -> String {
    let spaced = strip_playlist_prefix(stem).replace('_', " ");
    let dashed = spaced.split('-').map(capitalize).collect::<Vec<_>>().join(" ");

    dashed
        .split_whitespace()
        .map(|w| match w.starts_with(char::is_numeric) {
            true => w.to_string(),
            false => capitalize(w),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_playlist_prefix(stem: &str) -> &str {
    let Some(rest) = stem.strip_prefix("playlist_") else {
        return stem;
    };
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return stem;
    }
    rest[digits..].strip_prefix('_').unwrap_or(stem)
}

// First letter upper, the rest lower
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn read_song_ids(csv: &str) -> Result<Vec<String>> {
    let mut records = csv_records(csv.trim_start_matches('\u{feff}')).into_iter();
    let header = records.next().ok_or_else(|| anyhow!("Empty CSV"))?;
    let column = header
        .iter()
        .position(|h| h == "song_id")
        .ok_or_else(|| anyhow!("CSV has no song_id column"))?;

    Ok(records
        .filter_map(|r| r.into_iter().nth(column))
        .filter(|id| !id.is_empty())
        .collect())
}

/// Split CSV text into records. Quoted fields may hold commas, doubled
/// quotes and line breaks. Blank lines are dropped.
fn csv_records(csv: &str) -> Vec<Vec<String>> {
    let mut records = vec![];
    let mut record = vec![];
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = csv.chars().peekable();

    let mut end_record = |record: &mut Vec<String>, field: &mut String| {
        record.push(std::mem::take(field).trim().to_string());
        let done = std::mem::take(record);
        if done.iter().any(|f| !f.is_empty()) {
            records.push(done);
        }
    };

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', _) => quoted = !quoted,
            (',', false) => record.push(std::mem::take(&mut field).trim().to_string()),
            ('\r', false) if chars.peek() == Some(&'\n') => (),
            ('\n', false) => end_record(&mut record, &mut field),
            _ => field.push(c),
        }
    }
    end_record(&mut record, &mut field);

    records
}
