//! Tile grid and the hero's walking loop.
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use raylib::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Top-left pixel of the tile at this coordinate.
    pub fn to_pixels(self, tile_size: f32) -> Vector2 {
        Vector2::new(self.x as f32 * tile_size, self.y as f32 * tile_size)
    }

    /// Pixel rectangle covered by the tile.
    pub fn tile_rect(self, tile_size: f32) -> Rectangle {
        let p = self.to_pixels(tile_size);
        Rectangle::new(p.x, p.y, tile_size, tile_size)
    }

    pub fn step(self, dir: Direction) -> Coord {
        match dir {
            Direction::Up => Coord::new(self.x, self.y - 1),
            Direction::Right => Coord::new(self.x + 1, self.y),
            Direction::Down => Coord::new(self.x, self.y + 1),
            Direction::Left => Coord::new(self.x - 1, self.y),
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

#[derive(Clone, Debug)]
pub struct Tile {
    /// Image layer ids, composited bottom to top.
    pub layers: Vec<String>,
    /// `None` marks an obstacle the hero never walks through.
    pub direction: Option<Direction>,
    /// Set on load; the background cache paints the tile once.
    dirty: bool,
}

impl Tile {
    pub fn new(layers: &[&str], direction: Option<Direction>) -> Self {
        Self {
            layers: layers.iter().map(|s| s.to_string()).collect(),
            direction,
            dirty: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("no image specified for {coord} tile")]
    NoLayers { coord: Coord },
    #[error("tile {from} points to {to}, which is not a walkable tile")]
    BrokenPath { from: Coord, to: Coord },
    #[error("map has no walkable tiles")]
    NoPath,
    #[error("failed to read map file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse map file {path} at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk map layout: `{"tiles": [{"x": 0, "y": 0, "layers": ["dirt"], "direction": "right"}]}`.
#[derive(Debug, Deserialize)]
struct MapFile {
    tiles: Vec<TileEntry>,
}

#[derive(Debug, Deserialize)]
struct TileEntry {
    x: i32,
    y: i32,
    layers: Vec<String>,
    #[serde(default)]
    direction: Option<Direction>,
}

pub struct GridMap {
    tiles: BTreeMap<Coord, Tile>,
}

impl GridMap {
    pub fn new(tiles: BTreeMap<Coord, Tile>) -> Result<Self, MapError> {
        for (&coord, tile) in &tiles {
            if tile.layers.is_empty() {
                return Err(MapError::NoLayers { coord });
            }
        }
        let map = Self { tiles };
        if map.eligible_coords().is_empty() {
            return Err(MapError::NoPath);
        }
        for (&from, tile) in &map.tiles {
            let Some(dir) = tile.direction else { continue };
            let to = from.step(dir);
            let walkable = map.tiles.get(&to).is_some_and(|t| t.direction.is_some());
            if !walkable {
                return Err(MapError::BrokenPath { from, to });
            }
        }
        Ok(map)
    }

    /// Reads a JSON map file.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let raw = fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut de = serde_json::Deserializer::from_str(&raw);
        let file: MapFile = serde_path_to_error::deserialize(&mut de).map_err(|err| {
            MapError::Parse {
                path: path.to_path_buf(),
                field: err.path().to_string(),
                source: err.into_inner(),
            }
        })?;
        let tiles = file
            .tiles
            .into_iter()
            .map(|e| {
                let tile = Tile { layers: e.layers, direction: e.direction, dirty: true };
                (Coord::new(e.x, e.y), tile)
            })
            .collect();
        Self::new(tiles)
    }

    /// The built-in 3x3 loop around a bush.
    pub fn default_loop() -> Result<Self, MapError> {
        use Direction::*;
        let table: [((i32, i32), &[&str], Option<Direction>); 9] = [
            ((0, 0), &["dirt"], Some(Right)),
            ((0, 1), &["dirt"], Some(Up)),
            ((0, 2), &["dirt"], Some(Up)),
            ((1, 0), &["dirt"], Some(Right)),
            ((1, 1), &["dirt", "bush_big"], None),
            ((1, 2), &["dirt"], Some(Left)),
            ((2, 0), &["dirt"], Some(Down)),
            ((2, 1), &["dirt"], Some(Down)),
            ((2, 2), &["dirt"], Some(Left)),
        ];
        let tiles = table
            .iter()
            .map(|&((x, y), layers, dir)| (Coord::new(x, y), Tile::new(layers, dir)))
            .collect();
        Self::new(tiles)
    }

    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.tiles.iter().map(|(&c, t)| (c, t))
    }

    pub fn next_waypoint(&self, coord: Coord) -> Option<Coord> {
        let dir = self.tiles.get(&coord)?.direction?;
        Some(coord.step(dir))
    }

    /// Coordinates the hero walks through; treasure candidates.
    pub fn eligible_coords(&self) -> BTreeSet<Coord> {
        self.tiles
            .iter()
            .filter(|(_, t)| t.direction.is_some())
            .map(|(&c, _)| c)
            .collect()
    }

    /// Returns the coordinates needing redraw and clears their flags.
    pub fn take_dirty(&mut self) -> Vec<Coord> {
        let mut out = Vec::new();
        for (&coord, tile) in self.tiles.iter_mut() {
            if tile.dirty {
                tile.dirty = false;
                out.push(coord);
            }
        }
        out
    }
}

/// Strict axis-aligned overlap; rectangles that only share an edge do not collide.
pub fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}
