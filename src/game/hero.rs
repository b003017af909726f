//! The hero and its movement along the loop.
use raylib::prelude::*;

use crate::game::grid::{Coord, GridMap};
use crate::game::tween::{Easing, Tween};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Leg {
    /// Regular step along the loop; chains into the next one on arrival.
    Walk,
    /// Forced detour onto a treasure; stops on arrival.
    Claim,
}

#[derive(Clone, Debug)]
enum MoverState {
    Traveling { tween: Tween, leg: Leg },
    Idle,
}

pub struct Hero {
    /// Logical tile; already the target while the sprite is still moving.
    pub coord: Coord,
    pub pos: Vector2,
    tile_size: f32,
    step_duration: f32,
    state: MoverState,
}

impl Hero {
    /// Places the hero on `coord` and starts the first leg.
    pub fn new(coord: Coord, grid: &GridMap, tile_size: f32, step_duration: f32) -> Self {
        let mut hero = Self {
            coord,
            pos: coord.to_pixels(tile_size),
            tile_size,
            step_duration,
            state: MoverState::Idle,
        };
        hero.journey(grid);
        hero
    }

    /// Starts a walking leg towards the next waypoint of the current tile.
    pub fn journey(&mut self, grid: &GridMap) {
        let Some(next) = grid.next_waypoint(self.coord) else {
            // Off the loop: stay put rather than walk into nothing.
            self.state = MoverState::Idle;
            return;
        };
        self.coord = next;
        let tween = Tween::new(self.pos, next.to_pixels(self.tile_size), self.step_duration, Easing::Linear);
        self.state = MoverState::Traveling { tween, leg: Leg::Walk };
    }

    /// Cancels the current leg and bounces onto `coord`.
    pub fn claim(&mut self, coord: Coord) {
        self.coord = coord;
        let tween = Tween::new(self.pos, coord.to_pixels(self.tile_size), self.step_duration, Easing::BounceEnd);
        self.state = MoverState::Traveling { tween, leg: Leg::Claim };
    }

    pub fn advance(&mut self, dt: f32, grid: &GridMap) {
        let finished = match &mut self.state {
            MoverState::Traveling { tween, leg } => {
                self.pos = tween.advance(dt);
                tween.is_finished().then_some(*leg)
            }
            MoverState::Idle => None,
        };
        match finished {
            Some(Leg::Walk) => self.journey(grid),
            Some(Leg::Claim) => self.state = MoverState::Idle,
            None => {}
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, MoverState::Traveling { .. })
    }

    #[cfg(test)]
    pub fn leg(&self) -> Option<Leg> {
        match &self.state {
            MoverState::Traveling { leg, .. } => Some(*leg),
            MoverState::Idle => None,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.pos.x, self.pos.y, self.tile_size, self.tile_size)
    }
}
