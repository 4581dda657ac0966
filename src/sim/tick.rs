//! Per-frame simulation step
//!
//! Order within a frame: commands → clicks → autopilot → missiles
//! (gravity, integrate) → ships (gravity, integrate, damp, clamp, bounce)
//! → ship contacts → missile hits → off-screen cleanup.

use glam::Vec2;

use super::autopilot;
use super::collision::{bounce_off_walls, circles_touch, first_hit};
use super::gravity::gravitational_pull;
use super::input::ShipCommand;
use super::state::{BumpTarget, GameEvent, GamePhase, GameState};

/// Input collected for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player ship commands, applied in order
    pub commands: Vec<ShipCommand>,
    /// Mouse clicks (window coordinates)
    pub clicks: Vec<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.clicks.is_empty() && !self.pause
    }

    /// Forget everything (after the frame consumed it)
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clicks.clear();
        self.pause = false;
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Running => {
                log::info!("Simulation paused at frame {}", state.frame);
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("Simulation resumed at frame {}", state.frame);
                GamePhase::Running
            }
        };
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    for &command in &input.commands {
        apply_command(state, command);
    }

    for &click in &input.clicks {
        click_at(state, click);
    }

    autopilot::steer(state);

    update_missiles(state);
    update_ships(state);
    resolve_contacts(state);
    resolve_hits(state);
    remove_offscreen_missiles(state);

    state.frame += 1;

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Apply one command to the player ship (ignored without a living player)
pub fn apply_command(state: &mut GameState, command: ShipCommand) {
    let controls = state.controls;
    let Some(player) = state.player_mut() else {
        return;
    };
    log::debug!("User input: {:?}", command);

    match command {
        ShipCommand::Boost => player.boost(controls.boost),
        ShipCommand::TurnLeft => player.turn(-controls.turn_step),
        ShipCommand::TurnRight => player.turn(controls.turn_step),
        ShipCommand::Brake => player.brake(controls.brake_keep),
        ShipCommand::Fire => {
            let id = player.id;
            state.fire(id);
        }
    }
}

/// Grow the first planet under `point`, or place a new one there
pub fn click_at(state: &mut GameState, point: Vec2) {
    let growth = state.planet_tuning.growth;
    if let Some(planet) = state.planets.iter_mut().find(|p| p.is_inside(point)) {
        planet.grow(growth);
        log::info!("Planet {} grew to mass {}", planet.id, planet.mass);
        let event = GameEvent::PlanetGrown {
            planet_id: planet.id,
            mass: planet.mass,
        };
        state.events.push(event);
        return;
    }
    state.spawn_planet(point);
}

/// Gravity, then explicit Euler integration. Missiles are not damped.
fn update_missiles(state: &mut GameState) {
    let GameState {
        missiles,
        planets,
        grav_const,
        ..
    } = state;

    for missile in missiles.iter_mut() {
        let pull = gravitational_pull(missile.pos, missile.mass, planets, *grav_const);
        missile.add_force(pull);
        missile.vel += missile.acc;
        missile.pos += missile.vel;
        missile.acc = Vec2::ZERO;
    }
}

/// Gravity, integrate, damp, clamp to max speed, reflect off the border,
/// then move.
fn update_ships(state: &mut GameState) {
    let GameState {
        ships,
        planets,
        grav_const,
        width,
        height,
        events,
        ..
    } = state;

    for ship in ships.iter_mut().filter(|s| s.alive) {
        let pull = gravitational_pull(ship.pos, ship.mass, planets, *grav_const);
        ship.add_force(pull);
        ship.vel += ship.acc;
        ship.vel *= ship.damping;
        ship.clamp_speed();

        let reach = ship.mass + ship.wall_thickness;
        let (vel, hit) = bounce_off_walls(ship.pos, ship.vel, reach, *width, *height);
        ship.vel = vel;
        if hit.any() {
            log::debug!("Spaceship {} bounced off the border", ship.id);
            events.push(GameEvent::WallBounce { ship_id: ship.id });
        }

        ship.pos += ship.vel;
        ship.acc = Vec2::ZERO;
    }
}

/// Ships touching another ship or a planet reverse their velocity.
///
/// Contacts are decided on the positions after movement, before any ship
/// reverses, so the outcome does not depend on iteration order. A ship
/// touching several circles still reverses once.
fn resolve_contacts(state: &mut GameState) {
    let bodies: Vec<(u32, Vec2, f32)> = state
        .alive_ships()
        .map(|s| (s.id, s.pos, s.radius()))
        .collect();

    let GameState {
        ships,
        planets,
        events,
        ..
    } = state;

    for ship in ships.iter_mut().filter(|s| s.alive) {
        let ship_contact = bodies
            .iter()
            .filter(|(id, _, _)| *id != ship.id)
            .find(|(_, pos, radius)| circles_touch(ship.pos, ship.vel, ship.radius(), *pos, *radius))
            .map(|(id, _, _)| BumpTarget::Ship(*id));

        let contact = ship_contact.or_else(|| {
            planets
                .iter()
                .find(|p| circles_touch(ship.pos, ship.vel, ship.radius(), p.pos, p.radius()))
                .map(|p| BumpTarget::Planet(p.id))
        });

        if let Some(target) = contact {
            ship.vel = -ship.vel;
            log::debug!("Spaceship {} bumped into {:?}", ship.id, target);
            events.push(GameEvent::Bump {
                ship_id: ship.id,
                target,
            });
        }
    }
}

/// A missile inside a ship's forcefield destroys the ship and is consumed.
/// Ships are checked in id order; each missile hits at most one ship.
fn resolve_hits(state: &mut GameState) {
    let mut remaining: Vec<(u32, Vec2)> = state.missiles.iter().map(|m| (m.id, m.pos)).collect();
    let mut consumed = Vec::new();

    let GameState { ships, events, .. } = state;

    for ship in ships.iter_mut().filter(|s| s.alive) {
        let positions: Vec<Vec2> = remaining.iter().map(|(_, pos)| *pos).collect();
        let Some(index) = first_hit(ship.pos, ship.radius(), &positions) else {
            continue;
        };
        let (missile_id, pos) = remaining.remove(index);
        ship.alive = false;
        consumed.push(missile_id);
        log::info!("Spaceship {} destroyed by missile {}", ship.id, missile_id);
        events.push(GameEvent::Explosion {
            ship_id: ship.id,
            missile_id,
            pos,
        });
    }

    state.ships.retain(|s| s.alive);
    state.missiles.retain(|m| !consumed.contains(&m.id));
}

fn remove_offscreen_missiles(state: &mut GameState) {
    let (width, height) = (state.width, state.height);
    let before = state.missiles.len();
    state.missiles.retain(|m| m.on_screen(width, height));
    let removed = before - state.missiles.len();
    if removed > 0 {
        log::debug!("Removed {} off-screen missile(s)", removed);
    }
}
