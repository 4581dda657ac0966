//! Space Skirmish - spaceships, missiles and gravitating planets
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, integration, collisions)
//! - `renderer`: Scene description consumed by the canvas front end
//! - `audio`: Sound cues (Web Audio on wasm, logged on native)
//! - `console`: Line commands for the headless native runner
//! - `frame_clock`: Fixed-step frame pacing and FPS tracking
//! - `settings`: Data-driven configuration and tuning
//! - `logging`: Logger setup per platform

pub mod audio;
pub mod console;
pub mod frame_clock;
pub mod logging;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Simulation defaults
pub mod consts {
    /// Window dimensions (pixels)
    pub const WIDTH: f32 = 1080.0;
    pub const HEIGHT: f32 = 720.0;
    /// Frames per second; every velocity is expressed in pixels/frame
    pub const FRAME_RATE: u32 = 30;
    /// Maximum simulation frames per rendered frame
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Thickness of the window border (pixels)
    pub const WALL_THICKNESS: f32 = 10.0;
    /// Gravitational constant
    pub const GRAV_CONST: f32 = 1.0;

    /// Spaceship defaults
    pub const SHIP_MASS: f32 = 30.0;
    pub const SHIP_DAMPING: f32 = 0.99;
    pub const SHIP_MAX_SPEED: f32 = 10.0;
    /// Acceleration added by one boost
    pub const SHIP_BOOST: f32 = 3.0;
    /// Radians per turn key press
    pub const SHIP_TURN_STEP: f32 = 0.4;
    /// Fraction of velocity kept when braking
    pub const SHIP_BRAKE_KEEP: f32 = 0.5;

    /// Missile defaults
    pub const MISSILE_MASS: f32 = 20.0;

    /// Planet defaults
    pub const PLANET_MASS: f32 = 30.0;
    /// Mass added per click inside a planet
    pub const PLANET_GROWTH: f32 = 10.0;

    /// Below this distance a planet exerts no pull (avoids the 1/d² pole)
    pub const MIN_GRAVITY_DISTANCE: f32 = 1e-3;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector pointing along `direction` (radians, 0 = +x)
#[inline]
pub fn heading(direction: f32) -> Vec2 {
    polar_to_cartesian(1.0, direction)
}
