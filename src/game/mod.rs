//! Game state and rules (map, movement, treasures, quizzes, session).
//!
//! Re-exports:
//! - `grid`: Tile map, walking loop and dirty flags
//! - `tween`: Position interpolation and easing curves
//! - `hero`: Hero movement state machine
//! - `schedule`: Deferred one-shot actions
//! - `treasure`: Treasure placement
//! - `quiz`: Puzzle trait and the multiplication quiz
//! - `input`: Backend-independent key events
//! - `session`: Collision/quiz coordination and score
//! - `config`: Game settings
//! - `error`: Startup errors

pub mod config;
pub mod error;
pub mod grid;
pub mod hero;
pub mod input;
pub mod quiz;
pub mod schedule;
pub mod session;
pub mod treasure;
pub mod tween;
