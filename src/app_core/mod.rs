mod app;
mod player;

pub use app::Tapedeck;
