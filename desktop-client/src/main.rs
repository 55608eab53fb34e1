mod config;
mod tile_assets;
mod ui;

use clap::Parser;
use common::games::SessionRng;
use common::games::puzzle2048::{FileBestScoreStore, Puzzle2048Session};
use common::{log, logger};
use std::path::{Path, PathBuf};

use config::{default_config_path, get_config_manager};
use ui::Cats2048App;

#[derive(Parser)]
#[command(name = "cats2048")]
struct Args {
    /// Config file; created with defaults when missing.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for tile spawns, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Cats2048".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_path = args.config.unwrap_or_else(default_config_path);
    let config_manager = get_config_manager(&config_path);
    let config = config_manager
        .get_config()
        .map_err(|e| format!("Invalid config {}: {}", config_path.display(), e))?;

    if !config_path.exists() {
        match config_manager.set_config(&config) {
            Ok(()) => log!("Wrote default config to {}", config_path.display()),
            Err(e) => log!("Failed to write default config: {}", e),
        }
    }

    let config_dir = config_path.parent().unwrap_or(Path::new("")).to_path_buf();
    let store = FileBestScoreStore::new(config.best_score_path(&config_dir));

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Tile spawn seed: {}", rng.seed());

    let session = Puzzle2048Session::new(config.puzzle2048, store, rng)?;
    let tile_images_dir = config.tile_images_path(&config_dir);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 720.0])
            .with_title("Cat 2048"),
        ..Default::default()
    };

    eframe::run_native(
        "Cat 2048",
        options,
        Box::new(move |cc| {
            Ok(Box::new(Cats2048App::new(
                &cc.egui_ctx,
                session,
                tile_images_dir.as_deref(),
            )))
        }),
    )?;

    Ok(())
}
