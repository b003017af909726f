//! Texture store keyed by image id, with procedural fallbacks.
use std::collections::HashMap;
use std::path::Path;

use raylib::prelude::*;
use tracing::{debug, warn};

use crate::game::error::GameError;
use crate::game::grid::GridMap;

pub const HERO: &str = "karkulka";
pub const TREASURE: &str = "repa";
pub const WOLF: &str = "vlk";

pub struct TextureManager {
    textures: HashMap<String, Texture2D>,
    size: i32,
}

impl TextureManager {
    /// Loads every sprite plus one composited texture per distinct tile layer stack.
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        asset_dir: &Path,
        grid: &GridMap,
        tile_size: f32,
    ) -> Result<Self, GameError> {
        let size = tile_size.round() as i32;
        let mut tm = Self { textures: HashMap::new(), size };

        for id in [HERO, TREASURE, WOLF] {
            let img = tm.load_layer(asset_dir, id);
            tm.upload(rl, thread, id.to_string(), &img)?;
        }

        for (_, tile) in grid.tiles() {
            let key = Self::stack_key(&tile.layers);
            if tm.textures.contains_key(&key) {
                continue;
            }
            let mut base = tm.load_layer(asset_dir, &tile.layers[0]);
            for layer in &tile.layers[1..] {
                let top = tm.load_layer(asset_dir, layer);
                let full = Rectangle::new(0.0, 0.0, size as f32, size as f32);
                base.draw(&top, full, full, Color::WHITE);
            }
            debug!(key = %key, "tile_texture_composited");
            tm.upload(rl, thread, key, &base)?;
        }
        Ok(tm)
    }

    /// Key of a composited layer stack, e.g. `dirt+bush_big`.
    pub fn stack_key(layers: &[String]) -> String {
        layers.join("+")
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.textures.get(key)
    }

    fn upload(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        key: String,
        img: &Image,
    ) -> Result<(), GameError> {
        let tex = rl
            .load_texture_from_image(thread, img)
            .map_err(|e| GameError::Graphics { what: key.clone(), reason: e.to_string() })?;
        self.textures.insert(key, tex);
        Ok(())
    }

    /// `<asset_dir>/<id>.png` scaled to the tile, or a generated stand-in.
    fn load_layer(&self, asset_dir: &Path, id: &str) -> Image {
        let path = asset_dir.join(format!("{id}.png"));
        let loaded = path.to_str().and_then(|p| Image::load_image(p).ok());
        match loaded {
            Some(mut img) => {
                if img.width() != self.size || img.height() != self.size {
                    img.resize(self.size, self.size);
                }
                img
            }
            None => {
                warn!(path = %path.display(), "image_missing_using_fallback");
                self.fallback(id)
            }
        }
    }

    fn fallback(&self, id: &str) -> Image {
        let s = self.size;
        match id {
            HERO => Self::make_figure(s, Color::new(200, 30, 40, 255)),
            WOLF => Self::make_figure(s, Color::new(110, 110, 120, 255)),
            TREASURE => {
                let mut img = Image::gen_image_color(s, s, Color::BLANK);
                img.draw_circle(s / 2, s / 2, s / 4, Color::new(230, 200, 60, 255));
                img.draw_rectangle(s / 2 - 2, s / 8, 4, s / 4, Color::new(40, 150, 40, 255));
                img
            }
            "dirt" => Self::make_checker(s, Color::new(120, 85, 50, 255)),
            _ => {
                // Unknown decoration: a blob over a transparent tile.
                let mut img = Image::gen_image_color(s, s, Color::BLANK);
                img.draw_circle(s / 2, s / 2, s * 3 / 8, Self::color_from_name(id));
                img
            }
        }
    }

    fn make_checker(s: i32, base: Color) -> Image {
        let mut img = Image::gen_image_color(s, s, base);
        let cell = (s / 8).max(1);
        let light = Color::new(base.r.saturating_add(18), base.g.saturating_add(18), base.b.saturating_add(18), 255);
        for y in (0..s).step_by(cell as usize) {
            for x in (0..s).step_by(cell as usize) {
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    img.draw_rectangle(x, y, cell, cell, light);
                }
            }
        }
        img
    }

    fn make_figure(s: i32, body: Color) -> Image {
        let mut img = Image::gen_image_color(s, s, Color::BLANK);
        img.draw_circle(s / 2, s / 4, s / 6, Color::new(240, 200, 170, 255));
        img.draw_rectangle(s / 3, s * 5 / 12, s / 3, s / 2, body);
        img
    }

    fn color_from_name(name: &str) -> Color {
        let k = name.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        let r = (k.wrapping_mul(97) % 200 + 40) as u8;
        let g = (k.wrapping_mul(57) % 200 + 40) as u8;
        let b = (k.wrapping_mul(31) % 200 + 40) as u8;
        Color::new(r, g, b, 255)
    }
}
