pub const GET_PLAYLISTS: &str = "
    SELECT id, name FROM playlists
    ORDER BY name
";

pub const GET_PLAYLIST_SONGS: &str = "
    SELECT
        s.song_id,
        s.title,
        s.mp4_path,
        s.copertina_640_path AS cover_path,
        s.artists
    FROM songs s
    JOIN playlist_songs ps ON s.song_id = ps.song_id
    WHERE ps.playlist_id = ?
    ORDER BY ps.rowid
";

pub const CREATE_NEW_PLAYLIST: &str = "
    INSERT INTO playlists (name) VALUES (?)
";

pub const ADD_SONG_TO_PLAYLIST: &str = "
    INSERT OR IGNORE INTO playlist_songs (playlist_id, song_id)
    VALUES (?1, ?2)
";

pub const SONG_EXISTS: &str = "
    SELECT 1 FROM songs WHERE song_id = ?
";

pub const INSERT_SONG: &str = "
    INSERT INTO songs (
        song_id,
        title,
        artists,
        mp4_path,
        copertina_640_path,
        copertina_300_path,
        copertina_64_path
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
";

pub const CLEAR_SONGS: &str = "
    DELETE FROM songs
";

pub const CLEAR_PLAYLISTS: &str = "
    DELETE FROM playlist_songs;
    DELETE FROM playlists;
    DELETE FROM sqlite_sequence WHERE name = 'playlists';
";
