use crate::tile_assets::TileTextures;
use common::games::puzzle2048::{GameSnapshot, Grid};

/// Move keys, paired with the key identifiers the session understands.
const MOVE_KEYS: [(egui::Key, &str); 8] = [
    (egui::Key::ArrowUp, "ArrowUp"),
    (egui::Key::ArrowDown, "ArrowDown"),
    (egui::Key::ArrowLeft, "ArrowLeft"),
    (egui::Key::ArrowRight, "ArrowRight"),
    (egui::Key::W, "w"),
    (egui::Key::A, "a"),
    (egui::Key::S, "s"),
    (egui::Key::D, "d"),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UiAction {
    KeepPlaying,
    Reset,
}

pub struct Puzzle2048GameUi {
    textures: TileTextures,
}

impl Puzzle2048GameUi {
    pub fn new(textures: TileTextures) -> Self {
        Self { textures }
    }

    /// Every move key pressed this frame, in arrival order. The keys are
    /// consumed so egui does not also act on them.
    pub fn take_move_keys(&self, ctx: &egui::Context) -> Vec<&'static str> {
        ctx.input_mut(|i| {
            let identifiers = move_key_identifiers(&i.events);
            for (key, _) in MOVE_KEYS {
                while i.consume_key(egui::Modifiers::NONE, key) {}
            }
            identifiers
        })
    }

    pub fn render(
        &self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        snapshot: &GameSnapshot,
    ) -> Option<UiAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            if self.render_header(ui, snapshot) {
                action = Some(UiAction::Reset);
            }
            ui.add_space(16.0);
            self.render_board(ui, &snapshot.grid);
            ui.add_space(12.0);
            ui.label("Controls: Arrow keys or WASD. Merge matching cat tiles to level up.");
        });

        if snapshot.shows_win_prompt() {
            action = render_overlay(
                ctx,
                &format!("You made it to {} 😻", snapshot.target_value),
                "Want to keep going and see how chaotic it gets?",
                Some(("Keep playing", UiAction::KeepPlaying)),
            )
            .or(action);
        } else if snapshot.game_over {
            action = render_overlay(
                ctx,
                "Game over 🙀",
                "No more moves. Hit reset to try again.",
                None,
            )
            .or(action);
        }

        action
    }

    /// Returns `true` when Reset was clicked.
    fn render_header(&self, ui: &mut egui::Ui, snapshot: &GameSnapshot) -> bool {
        ui.heading(egui::RichText::new("Cat 2048").strong().size(28.0));
        ui.label(format!("Merge your cats to reach {}.", snapshot.target_value));
        ui.add_space(8.0);

        let mut reset_clicked = false;
        ui.horizontal(|ui| {
            stat(ui, "SCORE", snapshot.score);
            stat(ui, "BEST", snapshot.best_score);
            stat(ui, "TOP TILE", u64::from(snapshot.highest_tile));
            reset_clicked = ui.button("Reset").clicked();
        });
        reset_clicked
    }

    fn render_board(&self, ui: &mut egui::Ui, grid: &Grid) {
        let size = grid.size();
        let available = ui.available_size();
        let max_board_size = available.x.min(available.y - 40.0).min(520.0);
        let cell_size = (max_board_size / size as f32 - 6.0).max(30.0);

        for row in grid.rows() {
            ui.horizontal(|ui| {
                ui.add_space((available.x - (cell_size + 6.0) * size as f32) / 2.0);
                for &value in row {
                    self.render_tile(ui, value, cell_size);
                }
            });
        }
    }

    fn render_tile(&self, ui: &mut egui::Ui, value: u32, cell_size: f32) {
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(cell_size, cell_size), egui::Sense::hover());
        let tile = rect.shrink(3.0);
        let painter = ui.painter();

        if value == 0 {
            painter.rect_filled(tile, 12.0, EMPTY_TILE);
            return;
        }

        match self.textures.get(value) {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    tile,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
                let badge_font = egui::FontId::proportional(cell_size * 0.14);
                let badge_center = tile.right_bottom() - egui::vec2(cell_size * 0.18, cell_size * 0.12);
                painter.rect_filled(
                    egui::Rect::from_center_size(
                        badge_center,
                        egui::vec2(cell_size * 0.3, cell_size * 0.16),
                    ),
                    8.0,
                    egui::Color32::from_rgba_unmultiplied(255, 255, 255, 205),
                );
                painter.text(
                    badge_center,
                    egui::Align2::CENTER_CENTER,
                    value.to_string(),
                    badge_font,
                    TILE_TEXT,
                );
            }
            None => {
                painter.rect_filled(tile, 12.0, tier_color(value));
                let font_size = if value >= 1000 {
                    cell_size * 0.25
                } else if value >= 100 {
                    cell_size * 0.3
                } else {
                    cell_size * 0.4
                };
                painter.text(
                    tile.center(),
                    egui::Align2::CENTER_CENTER,
                    value.to_string(),
                    egui::FontId::proportional(font_size),
                    TILE_TEXT,
                );
            }
        }
    }
}

/// Same matching rule as `consume_key(Modifiers::NONE, ..)`.
fn move_key_identifiers(events: &[egui::Event]) -> Vec<&'static str> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } if modifiers.matches_logically(egui::Modifiers::NONE) => MOVE_KEYS
                .iter()
                .find(|(move_key, _)| move_key == key)
                .map(|(_, identifier)| *identifier),
            _ => None,
        })
        .collect()
}

fn stat(ui: &mut egui::Ui, label: &str, value: u64) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(label).small().strong());
            ui.label(egui::RichText::new(value.to_string()).strong());
        });
    });
}

/// Centered modal-style window with an optional primary action and Reset.
fn render_overlay(
    ctx: &egui::Context,
    title: &str,
    subtitle: &str,
    primary: Option<(&str, UiAction)>,
) -> Option<UiAction> {
    let mut action = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(subtitle);
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if let Some((label, primary_action)) = primary
                    && ui.button(label).clicked()
                {
                    action = Some(primary_action);
                }
                if ui.button("Reset").clicked() {
                    action = Some(UiAction::Reset);
                }
            });
        });
    action
}

const EMPTY_TILE: egui::Color32 = egui::Color32::from_rgb(250, 232, 245);
const TILE_TEXT: egui::Color32 = egui::Color32::from_rgb(15, 23, 42);

fn tier_color(value: u32) -> egui::Color32 {
    match value {
        0..=2 => egui::Color32::from_rgb(251, 207, 232),
        3..=8 => egui::Color32::from_rgb(233, 213, 255),
        9..=32 => egui::Color32::from_rgb(245, 208, 254),
        33..=128 => egui::Color32::from_rgb(249, 168, 212),
        129..=512 => egui::Color32::from_rgb(216, 180, 254),
        _ => egui::Color32::from_rgb(240, 171, 252),
    }
}
