//! Rendering
//!
//! `scene` turns a game state into backend-agnostic draw commands; the
//! browser build paints them on a 2D canvas.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod scene;

pub use scene::{DrawCmd, build};
