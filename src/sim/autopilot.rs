//! Built-in steering for ships without a human pilot
//!
//! Each autopilot ship chases the nearest other ship: it turns toward it one
//! turn step per frame, boosts while far away, brakes when too close and
//! fires once roughly aligned. Fire cooldowns are jittered with the state's
//! seeded RNG, so a seed reproduces a run exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Pilot};
use crate::normalize_angle;

/// Boost while the target is farther than this (pixels)
pub const STANDOFF_DISTANCE: f32 = 220.0;
/// Brake when the target is closer than this (pixels)
pub const TOO_CLOSE_DISTANCE: f32 = 110.0;
/// Fire when the aim error is below this (radians)
pub const AIM_TOLERANCE: f32 = 0.15;
/// Frames between shots
pub const FIRE_COOLDOWN_MIN: u32 = 20;
pub const FIRE_COOLDOWN_MAX: u32 = 45;

/// Steer every living autopilot ship for this frame
pub fn steer(state: &mut GameState) {
    let targets: Vec<Option<Vec2>> = state
        .ships
        .iter()
        .map(|ship| {
            if ship.pilot != Pilot::Autopilot || !ship.alive {
                return None;
            }
            nearest_enemy(ship.id, ship.pos, state)
        })
        .collect();

    let mut shooters = Vec::new();
    let GameState {
        ships,
        rng,
        controls,
        ..
    } = state;

    for (ship, target) in ships.iter_mut().zip(targets) {
        let Some(target) = target else { continue };

        ship.fire_cooldown = ship.fire_cooldown.saturating_sub(1);

        let to_target = target - ship.pos;
        let desired = to_target.y.atan2(to_target.x);
        let error = normalize_angle(desired - ship.direction);
        ship.turn(error.clamp(-controls.turn_step, controls.turn_step));

        let dist = to_target.length();
        if dist > STANDOFF_DISTANCE {
            ship.boost(controls.boost);
        } else if dist < TOO_CLOSE_DISTANCE {
            ship.brake(controls.brake_keep);
        }

        let remaining = normalize_angle(desired - ship.direction).abs();
        if remaining < AIM_TOLERANCE && ship.fire_cooldown == 0 {
            ship.fire_cooldown = rng.random_range(FIRE_COOLDOWN_MIN..=FIRE_COOLDOWN_MAX);
            shooters.push(ship.id);
        }
    }

    for id in shooters {
        if state.fire(id).is_some() {
            log::debug!("Autopilot ship {} fired", id);
        }
    }
}

fn nearest_enemy(ship_id: u32, pos: Vec2, state: &GameState) -> Option<Vec2> {
    state
        .alive_ships()
        .filter(|s| s.id != ship_id)
        .map(|s| s.pos)
        .min_by(|a, b| {
            a.distance_squared(pos)
                .partial_cmp(&b.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn autopilot_state(seed: u64) -> GameState {
        let settings = Settings {
            human_enabled: false,
            autopilot: true,
            seed,
            ..Default::default()
        };
        GameState::new(&settings)
    }

    #[test]
    fn test_turns_toward_target() {
        let mut state = autopilot_state(1);
        // Ship 0 at (640, 460), ship 1 at (540, 360): target is up-left
        let before = state.ships[0].direction;
        steer(&mut state);
        let after = state.ships[0].direction;
        assert!((after - before).abs() > 0.0);
        assert!((after - before).abs() <= state.controls.turn_step + 1e-6);
    }

    #[test]
    fn test_fires_when_aligned() {
        let mut state = autopilot_state(7);
        let to_target = state.ships[1].pos - state.ships[0].pos;
        state.ships[0].direction = to_target.y.atan2(to_target.x);
        steer(&mut state);
        assert!(!state.missiles.is_empty());
        assert!(state.ships[0].fire_cooldown >= FIRE_COOLDOWN_MIN);
    }

    #[test]
    fn test_idle_and_human_ships_are_left_alone() {
        let mut state = GameState::new(&Settings::default());
        let directions: Vec<f32> = state.ships.iter().map(|s| s.direction).collect();
        steer(&mut state);
        let after: Vec<f32> = state.ships.iter().map(|s| s.direction).collect();
        assert_eq!(directions, after);
        assert!(state.missiles.is_empty());
    }

    #[test]
    fn test_no_target_no_action() {
        let mut state = autopilot_state(3);
        state.ships[1].alive = false;
        steer(&mut state);
        assert_eq!(state.ships[0].direction, 0.0);
        assert!(state.missiles.is_empty());
    }
}
