//! Rendering on top of raylib.
//!
//! Re-exports:
//! - `textures`: Texture store with composited tile stacks and fallbacks
//! - `scene`: Per-frame drawing of tiles, sprites and HUD panels

pub mod scene;
pub mod textures;
