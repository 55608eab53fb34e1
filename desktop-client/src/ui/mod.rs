mod app;
mod game;

pub use app::Cats2048App;
