//! Session state: score, treasures, the active quiz and their coordination
//! with the hero's movement.
//!
//! One [`Session::update`] call is one frame tick. The order inside a tick is
//! fixed: move the hero, fire due timers, resume the loop if nothing holds
//! the hero back, then test collisions.
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::game::config::GameConfig;
use crate::game::error::GameError;
use crate::game::grid::{overlaps, Coord, GridMap};
use crate::game::hero::Hero;
use crate::game::input::KeyEvent;
use crate::game::quiz::{random_puzzle, Puzzle, QuizOutcome};
use crate::game::schedule::{Deferred, Scheduler};
use crate::game::treasure::Treasures;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Passed,
    Failed,
}

pub struct Session {
    pub grid: GridMap,
    pub hero: Hero,
    pub treasures: Treasures,
    score: i64,
    quiz: Option<Box<dyn Puzzle>>,
    banner: Option<Banner>,
    clock: Scheduler,
    rng: StdRng,
    tile_size: f32,
    respawn_delay: f32,
    banner_duration: f32,
}

impl Session {
    pub fn new(config: &GameConfig, grid: GridMap) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, grid, rng)
    }

    pub fn with_rng(config: &GameConfig, grid: GridMap, rng: StdRng) -> Result<Self, GameError> {
        if grid.next_waypoint(config.hero_start).is_none() {
            return Err(GameError::StartOffPath(config.hero_start));
        }
        let hero = Hero::new(config.hero_start, &grid, config.tile_size, config.step_duration);
        let mut session = Self {
            grid,
            hero,
            treasures: Treasures::new(),
            score: 0,
            quiz: None,
            banner: None,
            clock: Scheduler::new(),
            rng,
            tile_size: config.tile_size,
            respawn_delay: config.respawn_delay,
            banner_duration: config.banner_duration,
        };
        session.create_treasure();
        Ok(session)
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Seconds since the session started.
    pub fn elapsed(&self) -> f64 {
        self.clock.now()
    }

    pub fn quiz(&self) -> Option<&dyn Puzzle> {
        self.quiz.as_deref()
    }

    pub fn banner(&self) -> Option<Banner> {
        self.banner
    }

    #[cfg(test)]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn update(&mut self, dt: f32) {
        self.hero.advance(dt, &self.grid);

        for action in self.clock.advance(dt) {
            match action {
                Deferred::SpawnTreasure => self.create_treasure(),
                Deferred::ClearBanner => self.banner = None,
            }
        }

        if self.quiz.is_none() && !self.hero.is_moving() {
            self.hero.journey(&self.grid);
            self.clock.schedule_unique(Deferred::SpawnTreasure, self.respawn_delay);
        }

        self.detect_collisions();
    }

    fn create_treasure(&mut self) {
        match self.treasures.spawn(&mut self.rng, &self.grid, &self.hero, self.tile_size) {
            Ok(coord) => debug!(%coord, "treasure_spawned"),
            Err(err) => warn!(error = %err, "treasure_spawn_skipped"),
        }
    }

    fn detect_collisions(&mut self) {
        if self.quiz.is_some() {
            return;
        }
        let hero = self.hero.bounds();
        let hit: Option<Coord> = self
            .treasures
            .iter()
            .find(|t| overlaps(&t.bounds, &hero))
            .map(|t| t.coord);
        let Some(coord) = hit else { return };

        self.hero.claim(coord);
        self.treasures.remove(coord);
        let quiz = random_puzzle(&mut self.rng);
        info!(%coord, question = %quiz.question(), points = quiz.points(), "quiz_started");
        self.quiz = Some(quiz);
    }

    /// Routes a key press to the active quiz; without one the key is dropped.
    pub fn on_key_down(&mut self, event: &KeyEvent) {
        let Some(quiz) = self.quiz.as_mut() else { return };
        match quiz.on_key_down(event) {
            Some(QuizOutcome::Passed(points)) => self.finish_quiz(points, Banner::Passed),
            Some(QuizOutcome::Failed(points)) => self.finish_quiz(-points, Banner::Failed),
            None => {}
        }
    }

    fn finish_quiz(&mut self, delta: i64, banner: Banner) {
        self.quiz = None;
        self.score += delta;
        self.banner = Some(banner);
        self.clock.schedule_unique(Deferred::ClearBanner, self.banner_duration);
        info!(?banner, delta, score = self.score, "quiz_resolved");
    }

    #[cfg(test)]
    fn start_quiz(&mut self, quiz: Box<dyn Puzzle>) {
        self.quiz = Some(quiz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::Key;
    use crate::game::quiz::MultiplicationQuiz;

    fn session(seed: u64) -> Session {
        let config = GameConfig::default();
        let grid = GridMap::default_loop().expect("map");
        Session::with_rng(&config, grid, StdRng::seed_from_u64(seed)).expect("session")
    }

    fn answer(s: &mut Session, text: &str) {
        for c in text.chars() {
            s.on_key_down(&KeyEvent::char(c));
        }
        s.on_key_down(&KeyEvent::new(Key::Enter, Some('\r')));
    }

    /// Ticks until a quiz opens; the hero always reaches the single treasure within one lap.
    fn run_until_quiz(s: &mut Session) {
        for _ in 0..2000 {
            s.update(1.0 / 60.0);
            if s.quiz().is_some() {
                return;
            }
        }
        panic!("no quiz opened");
    }

    #[test]
    fn startup_places_one_treasure_off_the_hero_path_head() {
        let s = session(1);
        assert_eq!(s.treasures.len(), 1);
        let t = s.treasures.iter().next().expect("treasure");
        assert_ne!(t.coord, s.hero.coord);
        assert_ne!(Some(t.coord), s.grid.next_waypoint(s.hero.coord));
    }

    #[test]
    fn hero_start_off_the_loop_is_rejected() {
        let config = GameConfig { hero_start: Coord::new(1, 1), ..GameConfig::default() };
        let grid = GridMap::default_loop().expect("map");
        let err = Session::with_rng(&config, grid, StdRng::seed_from_u64(0)).err().expect("must fail");
        assert!(matches!(err, GameError::StartOffPath(c) if c == Coord::new(1, 1)));
    }

    #[test]
    fn collision_claims_treasure_and_opens_quiz() {
        let mut s = session(5);
        let target = s.treasures.iter().next().expect("treasure").coord;
        run_until_quiz(&mut s);
        assert!(s.treasures.is_empty());
        assert_eq!(s.hero.coord, target);
    }

    #[test]
    fn hero_waits_on_treasure_tile_while_quiz_is_open() {
        let mut s = session(8);
        run_until_quiz(&mut s);
        let claimed = s.hero.coord;
        for _ in 0..600 {
            s.update(1.0 / 60.0);
        }
        assert!(!s.hero.is_moving());
        assert_eq!(s.hero.coord, claimed);
        assert_eq!(s.hero.pos, claimed.to_pixels(s.tile_size()));
    }

    #[test]
    fn keys_without_quiz_are_swallowed() {
        let mut s = session(2);
        answer(&mut s, "12");
        assert_eq!(s.score(), 0);
        assert!(s.banner().is_none());
    }

    #[test]
    fn pass_adds_points_and_shows_green_banner() {
        let mut s = session(3);
        run_until_quiz(&mut s);
        s.start_quiz(Box::new(MultiplicationQuiz::with_operands(5, 6)));
        answer(&mut s, "30");
        assert_eq!(s.score(), 15);
        assert!(s.quiz().is_none());
        assert_eq!(s.banner(), Some(Banner::Passed));
    }

    #[test]
    fn fail_subtracts_points_and_shows_red_banner() {
        let mut s = session(4);
        run_until_quiz(&mut s);
        s.start_quiz(Box::new(MultiplicationQuiz::with_operands(3, 4)));
        answer(&mut s, "11");
        assert_eq!(s.score(), -12);
        assert_eq!(s.banner(), Some(Banner::Failed));
    }

    #[test]
    fn zero_operand_pass_scores_one() {
        let mut s = session(6);
        run_until_quiz(&mut s);
        s.start_quiz(Box::new(MultiplicationQuiz::with_operands(0, 7)));
        answer(&mut s, "0");
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn banner_clears_after_its_duration() {
        let mut s = session(7);
        run_until_quiz(&mut s);
        answer(&mut s, "");
        assert_eq!(s.banner(), Some(Banner::Failed));
        for _ in 0..60 {
            s.update(1.0 / 60.0);
        }
        assert!(s.banner().is_some());
        for _ in 0..90 {
            s.update(1.0 / 60.0);
        }
        assert!(s.banner().is_none());
    }

    #[test]
    fn loop_resumes_and_treasure_respawns_after_quiz() {
        let mut s = session(9);
        run_until_quiz(&mut s);
        answer(&mut s, "");
        // Let the claim bounce land, then one more tick resumes walking.
        for _ in 0..70 {
            s.update(1.0 / 60.0);
        }
        assert!(s.hero.is_moving());
        assert!(s.treasures.is_empty());
        for _ in 0..70 {
            s.update(1.0 / 60.0);
        }
        assert_eq!(s.treasures.len(), 1);
    }

    #[test]
    fn overlap_during_quiz_opens_no_second_quiz() {
        let mut s = session(10);
        run_until_quiz(&mut s);
        s.start_quiz(Box::new(MultiplicationQuiz::with_operands(2, 2)));
        let hero_tile = s.hero.coord;
        // Drop a treasure right under the waiting hero.
        s.treasures.place(hero_tile, s.tile_size());
        for _ in 0..120 {
            s.update(1.0 / 60.0);
        }
        assert_eq!(s.quiz().map(|q| q.question()), Some("2 * 2".to_string()));
        assert_eq!(s.hero.coord, hero_tile);
        assert_eq!(s.treasures.len(), 1);
    }

    #[test]
    fn walking_leaves_the_tile_background_untouched() {
        let mut s = session(4);
        assert_eq!(s.grid.take_dirty().len(), 9);
        for _ in 0..600 {
            s.update(1.0 / 60.0);
        }
        assert!(s.grid.take_dirty().is_empty());
    }
}
