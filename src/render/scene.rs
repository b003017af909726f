//! Frame drawing: cached tile background, sprites and the HUD panels.
use raylib::prelude::*;

use crate::game::config::GameConfig;
use crate::game::error::GameError;
use crate::game::session::{Banner, Session};
use crate::render::textures::{TextureManager, HERO, TREASURE, WOLF};

const FONT_SIZE: i32 = 20;
const BANNER_PASS: Color = Color::new(0, 100, 0, 255);
const BANNER_FAIL: Color = Color::new(139, 0, 0, 255);

pub struct Renderer {
    textures: TextureManager,
    /// Tiles are painted here only when flagged dirty.
    background: RenderTexture2D,
    background_size: Vector2,
    tile_size: f32,
    score_area: Rectangle,
    quiz_area: Rectangle,
    wolf_pos: Vector2,
}

impl Renderer {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        config: &GameConfig,
        session: &Session,
    ) -> Result<Self, GameError> {
        let textures = TextureManager::new(rl, thread, &config.asset_dir, &session.grid, config.tile_size)?;
        let background = rl
            .load_render_texture(thread, config.width as u32, config.height as u32)
            .map_err(|e| GameError::Graphics { what: "background".to_string(), reason: e.to_string() })?;
        // Wolf stands centred on (100, 100), half hidden in the bush.
        let half = config.tile_size / 2.0;
        Ok(Self {
            textures,
            background,
            background_size: Vector2::new(config.width as f32, config.height as f32),
            tile_size: config.tile_size,
            score_area: Rectangle::new(200.0, 0.0, 200.0, 100.0),
            quiz_area: Rectangle::new(200.0, 100.0, 200.0, 200.0),
            wolf_pos: Vector2::new(100.0 - half, 100.0 - half),
        })
    }

    pub fn draw(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, session: &mut Session) {
        self.repaint_dirty_tiles(rl, thread, session);

        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);

        // Render textures are stored upside down.
        let src = Rectangle::new(0.0, 0.0, self.background_size.x, -self.background_size.y);
        d.draw_texture_rec(self.background.texture(), src, Vector2::zero(), Color::WHITE);

        if let Some(tex) = self.textures.get(TREASURE) {
            for t in session.treasures.iter() {
                d.draw_texture_v(tex, Vector2::new(t.bounds.x, t.bounds.y), Color::WHITE);
            }
        }
        if let Some(tex) = self.textures.get(HERO) {
            d.draw_texture_v(tex, session.hero.pos, Color::WHITE);
        }
        if let Some(tex) = self.textures.get(WOLF) {
            d.draw_texture_v(tex, self.wolf_pos, Color::WHITE);
        }

        self.draw_status(&mut d, session);
        self.draw_quiz(&mut d, session);
    }

    fn repaint_dirty_tiles(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, session: &mut Session) {
        let dirty = session.grid.take_dirty();
        if dirty.is_empty() {
            return;
        }
        let textures = &self.textures;
        let tile_size = self.tile_size;
        let mut d = rl.begin_texture_mode(thread, &mut self.background);
        for coord in dirty {
            let Some(tile) = session.grid.tile(coord) else { continue };
            let key = TextureManager::stack_key(&tile.layers);
            if let Some(tex) = textures.get(&key) {
                d.draw_texture_v(tex, coord.to_pixels(tile_size), Color::WHITE);
            }
        }
    }

    fn draw_status(&self, d: &mut impl RaylibDraw, session: &Session) {
        let x = self.score_area.x as i32;
        let y = self.score_area.y as i32;
        d.draw_rectangle_rec(self.score_area, Color::BLACK);
        d.draw_text(&format!("SCORE: {}", session.score()), x, y, FONT_SIZE, Color::WHITE);
        d.draw_text(&format!("FRAME: {:.02}", session.elapsed()), x, y + 25, FONT_SIZE, Color::WHITE);
    }

    fn draw_quiz(&self, d: &mut impl RaylibDraw, session: &Session) {
        let area = self.quiz_area;
        if let Some(quiz) = session.quiz() {
            let x = area.x as i32 + 10;
            let y = area.y as i32 + 10;
            d.draw_rectangle_rec(area, Color::GRAY);
            d.draw_text("Kolik je:", x, y, FONT_SIZE, Color::WHITE);
            let line = format!("{} = {}", quiz.question(), quiz.answer_text());
            d.draw_text(&line, x, y + 30, FONT_SIZE, Color::WHITE);
            return;
        }
        match session.banner() {
            Some(Banner::Passed) => d.draw_rectangle_rec(area, BANNER_PASS),
            Some(Banner::Failed) => d.draw_rectangle_rec(area, BANNER_FAIL),
            None => {}
        }
    }
}
