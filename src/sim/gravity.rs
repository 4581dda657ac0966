//! Inverse-square pull from planets

use glam::Vec2;

use super::state::Planet;
use crate::consts::MIN_GRAVITY_DISTANCE;

/// Pull of a single planet on a body of mass `body_mass` at `body_pos`.
///
/// Magnitude is `G·m·M/d²`, directed at the planet. The force is added to
/// acceleration as is, without dividing by the body's mass.
#[inline]
pub fn planet_pull(body_pos: Vec2, body_mass: f32, planet: &Planet, grav_const: f32) -> Vec2 {
    let to_planet = planet.pos - body_pos;
    let dist_sq = to_planet.length_squared();
    if dist_sq < MIN_GRAVITY_DISTANCE * MIN_GRAVITY_DISTANCE {
        return Vec2::ZERO;
    }
    to_planet.normalize() * (grav_const * body_mass * planet.mass / dist_sq)
}

/// Summed pull of all planets
pub fn gravitational_pull(body_pos: Vec2, body_mass: f32, planets: &[Planet], grav_const: f32) -> Vec2 {
    planets
        .iter()
        .map(|p| planet_pull(body_pos, body_mass, p, grav_const))
        .sum()
}
