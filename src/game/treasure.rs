//! Treasure placement on the walking loop.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use raylib::prelude::*;
use thiserror::Error;

use crate::game::grid::{overlaps, Coord, GridMap};
use crate::game::hero::Hero;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no free path tile left for a treasure (hero at {hero})")]
    NoCandidates { hero: Coord },
}

#[derive(Clone, Debug)]
pub struct Treasure {
    pub coord: Coord,
    pub bounds: Rectangle,
}

#[derive(Debug, Default)]
pub struct Treasures {
    items: BTreeMap<Coord, Treasure>,
}

impl Treasures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops one treasure on a random path tile that the hero is neither on,
    /// about to step onto, nor still overlapping with its sprite.
    pub fn spawn(
        &mut self,
        rng: &mut StdRng,
        grid: &GridMap,
        hero: &Hero,
        tile_size: f32,
    ) -> Result<Coord, SpawnError> {
        let next = grid.next_waypoint(hero.coord);
        let sprite = hero.bounds();
        let coord = grid
            .eligible_coords()
            .into_iter()
            .filter(|&c| c != hero.coord && Some(c) != next && !self.items.contains_key(&c))
            .filter(|&c| !overlaps(&c.tile_rect(tile_size), &sprite))
            .choose(rng)
            .ok_or(SpawnError::NoCandidates { hero: hero.coord })?;
        let bounds = coord.tile_rect(tile_size);
        self.items.insert(coord, Treasure { coord, bounds });
        Ok(coord)
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, coord: Coord, tile_size: f32) {
        let bounds = coord.tile_rect(tile_size);
        self.items.insert(coord, Treasure { coord, bounds });
    }

    pub fn remove(&mut self, coord: Coord) -> Option<Treasure> {
        self.items.remove(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Treasure> {
        self.items.values()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::game::grid::{Direction, Tile};

    fn hero_leaving(grid: &GridMap, start: Coord) -> Hero {
        Hero::new(start, grid, 64.0, 1.0)
    }

    #[test]
    fn spawn_avoids_hero_tile_and_next_waypoint() {
        let grid = GridMap::default_loop().expect("map");
        let mut rng = StdRng::seed_from_u64(42);
        for start in grid.eligible_coords() {
            let hero = hero_leaving(&grid, start);
            let next = grid.next_waypoint(hero.coord).expect("walkable");
            for _ in 0..50 {
                let mut treasures = Treasures::new();
                let coord = treasures.spawn(&mut rng, &grid, &hero, 64.0).expect("spawn");
                assert_ne!(coord, hero.coord);
                assert_ne!(coord, next);
                // Still under the sprite, which has not left its start tile yet.
                assert_ne!(coord, start);
                assert!(grid.tile(coord).and_then(|t| t.direction).is_some());
            }
        }
    }

    #[test]
    fn spawn_never_stacks_two_treasures_on_one_tile() {
        let grid = GridMap::default_loop().expect("map");
        let hero = hero_leaving(&grid, Coord::new(0, 0));
        let mut rng = StdRng::seed_from_u64(3);
        let mut treasures = Treasures::new();
        // 8 path tiles minus the sprite's tile, its target and the one after.
        for _ in 0..5 {
            treasures.spawn(&mut rng, &grid, &hero, 64.0).expect("spawn");
        }
        assert_eq!(treasures.len(), 5);
        let err = treasures.spawn(&mut rng, &grid, &hero, 64.0);
        assert_eq!(err, Err(SpawnError::NoCandidates { hero: Coord::new(1, 0) }));
    }

    #[test]
    fn two_tile_loop_has_no_room() {
        let mut tiles = BTreeMap::new();
        tiles.insert(Coord::new(0, 0), Tile::new(&["dirt"], Some(Direction::Right)));
        tiles.insert(Coord::new(1, 0), Tile::new(&["dirt"], Some(Direction::Left)));
        let grid = GridMap::new(tiles).expect("map");
        let hero = hero_leaving(&grid, Coord::new(0, 0));
        let mut rng = StdRng::seed_from_u64(0);
        let mut treasures = Treasures::new();
        assert!(treasures.spawn(&mut rng, &grid, &hero, 64.0).is_err());
        assert!(treasures.is_empty());
    }

    #[test]
    fn treasure_bounds_cover_its_tile() {
        let grid = GridMap::default_loop().expect("map");
        let hero = hero_leaving(&grid, Coord::new(0, 0));
        let mut rng = StdRng::seed_from_u64(9);
        let mut treasures = Treasures::new();
        let coord = treasures.spawn(&mut rng, &grid, &hero, 64.0).expect("spawn");
        let t = treasures.remove(coord).expect("present");
        assert_eq!(t.bounds.x, coord.x as f32 * 64.0);
        assert_eq!(t.bounds.width, 64.0);
        assert!(treasures.is_empty());
    }
}
