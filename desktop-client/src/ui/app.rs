use super::game::{Puzzle2048GameUi, UiAction};
use crate::tile_assets::TileTextures;
use common::games::puzzle2048::{FileBestScoreStore, Puzzle2048Session};
use common::log;
use std::path::Path;

pub struct Cats2048App {
    session: Puzzle2048Session<FileBestScoreStore>,
    game_ui: Puzzle2048GameUi,
}

impl Cats2048App {
    pub fn new(
        ctx: &egui::Context,
        session: Puzzle2048Session<FileBestScoreStore>,
        tile_images_dir: Option<&Path>,
    ) -> Self {
        let textures = match tile_images_dir {
            Some(dir) => TileTextures::load(ctx, dir),
            None => TileTextures::default(),
        };
        Self {
            session,
            game_ui: Puzzle2048GameUi::new(textures),
        }
    }
}

impl eframe::App for Cats2048App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for key in self.game_ui.take_move_keys(ctx) {
            self.session.handle_key(key);
        }

        let snapshot = self.session.snapshot();
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = self.game_ui.render(ui, ctx, &snapshot);
        });

        match action {
            Some(UiAction::KeepPlaying) => {
                log!("Continuing past {}", snapshot.target_value);
                self.session.accept_win();
            }
            Some(UiAction::Reset) => self.session.reset(),
            None => {}
        }
    }
}
