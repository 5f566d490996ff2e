pub const CREATE_TABLES: &str = r"
    CREATE TABLE IF NOT EXISTS songs(
        song_id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        artists TEXT,
        mp4_path TEXT,
        copertina_640_path TEXT,
        copertina_300_path TEXT,
        copertina_64_path TEXT
    );

    CREATE TABLE IF NOT EXISTS playlists(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS playlist_songs(
        playlist_id INTEGER,
        song_id TEXT,
        FOREIGN KEY(playlist_id) REFERENCES playlists(id),
        FOREIGN KEY(song_id) REFERENCES songs(song_id),
        PRIMARY KEY (playlist_id, song_id)
    );
";
