//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, velocities in pixels/frame
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod gravity;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{WallHit, bounce_off_walls, circles_touch, first_hit, point_in_circle, reflect_velocity};
pub use gravity::{gravitational_pull, planet_pull};
pub use input::{Key, ShipCommand};
pub use state::{BumpTarget, GameEvent, GamePhase, GameState, Missile, Pilot, Planet, Spaceship};
pub use tick::{TickInput, apply_command, click_at, tick};
