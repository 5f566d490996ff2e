use anyhow::{Context, Result, bail};
use tapedeck::{Database, Settings, app_core::Tapedeck, logging, player::RodioBackend};
use tracing::{error, info};

const USAGE: &str = "usage: tapedeck [import-songs <songs.json> | import-playlists <csv dir>]";

fn main() -> Result<()> {
    let settings = Settings::load()?;
    logging::init(&settings.log_file()?)?;

    let mut db = Database::open(settings.database_path()?)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => (),
        ["import-songs", json] => {
            let count = db.import_songs_json(json)?;
            println!("Imported {count} songs");
            return Ok(());
        }
        ["import-playlists", dir] => {
            let count = db.import_playlists_csv(dir)?;
            println!("Created {count} playlists");
            return Ok(());
        }
        _ => bail!(USAGE),
    }

    info!("Starting tapedeck");
    let backend =
        RodioBackend::new(settings.initial_volume).context("Could not open audio output")?;

    let result = Tapedeck::new(settings, db, Box::new(backend)).run();
    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}
