use crate::{
    Database,
    database::queries::{
        ADD_SONG_TO_PLAYLIST, CREATE_NEW_PLAYLIST, GET_PLAYLIST_SONGS, GET_PLAYLISTS,
    },
    domain::{Playlist, TrackEntry},
};
use anyhow::Result;
use rusqlite::params;
use tracing::warn;

impl Database {
    pub fn create_playlist(&mut self, name: &str) -> Result<i64> {
        self.conn.execute(CREATE_NEW_PLAYLIST, params![name])?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_to_playlist(&mut self, song_id: &str, playlist_id: i64) -> Result<()> {
        self.conn
            .execute(ADD_SONG_TO_PLAYLIST, params![playlist_id, song_id])?;
        Ok(())
    }

    /// All playlists, ordered by name
    pub fn get_playlists(&self) -> Result<Vec<Playlist>> {
        let mut stmt = self.conn.prepare(GET_PLAYLISTS)?;

        let rows = stmt.query_map([], |r| {
            let id: i64 = r.get("id")?;
            let name: String = r.get("name")?;

            Ok(Playlist::new(id, name))
        })?;

        let mut playlists = vec![];
        for row in rows {
            match row {
                Ok(playlist) => playlists.push(playlist),
                Err(e) => warn!("Skipping unreadable playlist row: {e}"),
            }
        }

        Ok(playlists)
    }

    /// Songs of one playlist in insertion order. Rows that cannot form a
    /// playable entry (no media path, no title) are logged and left out.
    pub fn get_playlist_entries(&self, playlist_id: i64) -> Result<Vec<TrackEntry>> {
        let mut stmt = self.conn.prepare(GET_PLAYLIST_SONGS)?;

        let rows = stmt.query_map(params![playlist_id], |r| {
            let song_id: String = r.get("song_id")?;
            let raw = vec![
                r.get::<_, Option<String>>("mp4_path")?,
                r.get::<_, Option<String>>("title")?,
                r.get::<_, Option<String>>("cover_path")?,
                r.get::<_, Option<String>>("artists")?,
            ];
            Ok((song_id, raw))
        })?;

        let mut entries = vec![];
        for row in rows {
            let (song_id, raw) = row?;
            match TrackEntry::try_from(raw) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Song {song_id} in playlist {playlist_id}: {e}"),
            }
        }

        Ok(entries)
    }
}
