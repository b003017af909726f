use thiserror::Error;

use crate::game::config::ConfigError;
use crate::game::grid::{Coord, MapError};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("hero start {0} is not on the walking loop")]
    StartOffPath(Coord),
    #[error("failed to load {what}: {reason}")]
    Graphics { what: String, reason: String },
}
