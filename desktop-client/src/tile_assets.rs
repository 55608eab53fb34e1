use common::log;
use std::collections::HashMap;
use std::path::Path;

const TILE_IMAGES: [(u32, &str); 11] = [
    (2, "catpic1.jpg"),
    (4, "catpic2.jpg"),
    (8, "catpic3.jpg"),
    (16, "catpic4.jpg"),
    (32, "catpic5.jpg"),
    (64, "catpic6.jpg"),
    (128, "catpic7.jpg"),
    (256, "catpic8.jpg"),
    (512, "catpic9.jpg"),
    (1024, "catpic10.jpg"),
    (2048, "catpic11.jpg"),
];

/// Cat artwork per tile value. Values without a loaded image are drawn
/// as coloured tiles instead.
#[derive(Default)]
pub struct TileTextures {
    textures: HashMap<u32, egui::TextureHandle>,
}

impl TileTextures {
    pub fn load(ctx: &egui::Context, dir: &Path) -> Self {
        let mut textures = HashMap::new();
        for (value, file) in TILE_IMAGES {
            let path = dir.join(file);
            match load_color_image(&path) {
                Ok(image) => {
                    let texture =
                        ctx.load_texture(format!("cat_tile_{}", value), image, Default::default());
                    textures.insert(value, texture);
                }
                Err(e) => log!("{}", e),
            }
        }
        log!(
            "Loaded {}/{} tile images from {}",
            textures.len(),
            TILE_IMAGES.len(),
            dir.display()
        );
        Self { textures }
    }

    pub fn get(&self, value: u32) -> Option<&egui::TextureHandle> {
        self.textures.get(&value)
    }
}

fn load_color_image(path: &Path) -> Result<egui::ColorImage, String> {
    let image = image::open(path)
        .map_err(|e| format!("Failed to load tile image {}: {}", path.display(), e))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
