//! Game state and core simulation types
//!
//! Everything the frame update touches lives in `GameState`; there are no
//! globals. Velocities are in pixels per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::{ControlTuning, MissileTuning, PlanetTuning, Settings, ShipTuning};
use crate::{heading, normalize_angle};

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames advance
    Running,
    /// Frozen until the pause toggle is sent again
    Paused,
}

/// Who steers a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pilot {
    /// Keyboard commands
    Human,
    /// Built-in steering (see `autopilot`)
    Autopilot,
    /// Drifts under gravity only
    Idle,
}

/// What a ship bumped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BumpTarget {
    Ship(u32),
    Planet(u32),
}

/// Events raised during a tick, drained by the front end (sound, logs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ship fired a missile
    Laser { ship_id: u32, missile_id: u32 },
    /// A ship was hit by a missile and destroyed
    Explosion { ship_id: u32, missile_id: u32, pos: Vec2 },
    /// A ship bounced off another circle
    Bump { ship_id: u32, target: BumpTarget },
    /// A ship reflected off the window border
    WallBounce { ship_id: u32 },
    /// A click placed a new planet
    PlanetCreated { planet_id: u32, pos: Vec2 },
    /// A click grew an existing planet
    PlanetGrown { planet_id: u32, mass: f32 },
}

/// A missile, drawn as a small black dot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub mass: f32,
}

impl Missile {
    /// Missile at `pos` travelling along `direction` at `speed`
    pub fn new(id: u32, pos: Vec2, direction: f32, speed: f32, mass: f32) -> Self {
        Self {
            id,
            pos,
            vel: heading(direction) * speed,
            acc: Vec2::ZERO,
            mass,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.mass / 10.0
    }

    pub fn add_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Whether the missile is inside the window (edges included)
    pub fn on_screen(&self, width: f32, height: f32) -> bool {
        self.pos.x >= 0.0 && self.pos.x <= width && self.pos.y >= 0.0 && self.pos.y <= height
    }
}

/// A gravitating planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: u32,
    pub pos: Vec2,
    pub mass: f32,
}

impl Planet {
    pub fn new(id: u32, pos: Vec2, mass: f32) -> Self {
        Self { id, pos, mass }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.mass / 2.0
    }

    /// Whether `point` lies strictly inside the planet
    pub fn is_inside(&self, point: Vec2) -> bool {
        point.distance_squared(self.pos) < self.radius() * self.radius()
    }

    /// Add mass (the radius grows by half of it)
    pub fn grow(&mut self, amount: f32) {
        self.mass += amount;
    }
}

/// A spaceship: hull, two boosters and a circular forcefield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spaceship {
    pub id: u32,
    pub pilot: Pilot,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Facing angle in radians; 0 points along +x
    pub direction: f32,
    /// Mass, also the forcefield radius
    pub mass: f32,
    pub damping: f32,
    pub max_speed: f32,
    /// Border thickness this ship bounces against
    pub wall_thickness: f32,
    pub alive: bool,
    /// Frames until the autopilot may fire again
    #[serde(default)]
    pub fire_cooldown: u32,
}

impl Spaceship {
    pub fn new(id: u32, pilot: Pilot, pos: Vec2, wall_thickness: f32, tuning: &ShipTuning) -> Self {
        Self {
            id,
            pilot,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            direction: 0.0,
            mass: tuning.mass,
            damping: tuning.damping,
            max_speed: tuning.max_speed,
            wall_thickness,
            alive: true,
            fire_cooldown: 0,
        }
    }

    /// Collision radius of the forcefield
    #[inline]
    pub fn radius(&self) -> f32 {
        self.mass
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Rotate by `change` radians (positive is clockwise on screen)
    pub fn turn(&mut self, change: f32) {
        self.direction = normalize_angle(self.direction + change);
    }

    /// Drop pending acceleration and keep `keep` of the current velocity
    pub fn brake(&mut self, keep: f32) {
        self.acc = Vec2::ZERO;
        self.vel *= keep;
    }

    /// Push along the facing direction
    pub fn boost(&mut self, thrust: f32) {
        self.add_force(heading(self.direction) * thrust);
    }

    pub fn add_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Fire a missile along the facing direction.
    ///
    /// The missile spawns one pixel outside the forcefield so it cannot hit
    /// its own ship, and flies at the ship's max speed.
    pub fn shoot(&self, missile_id: u32, tuning: &MissileTuning) -> Missile {
        let spawn = self.pos + heading(self.direction) * (self.mass + 1.0);
        Missile::new(missile_id, spawn, self.direction, self.max_speed, tuning.mass)
    }

    /// Scale velocity down to `max_speed` if it exceeds it
    pub fn clamp_speed(&mut self) {
        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed;
        }
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub width: f32,
    pub height: f32,
    pub grav_const: f32,
    pub wall_thickness: f32,
    /// Simulation frame counter
    pub frame: u64,
    pub phase: GamePhase,
    /// Seed the RNG was created from
    pub seed: u64,
    pub controls: ControlTuning,
    pub missile_tuning: MissileTuning,
    pub planet_tuning: PlanetTuning,
    /// Planets (sorted by id)
    pub planets: Vec<Planet>,
    /// Missiles in flight (sorted by id)
    pub missiles: Vec<Missile>,
    /// Ships still in play (sorted by id)
    pub ships: Vec<Spaceship>,
    /// Ship driven by the keyboard, if any
    pub player_id: Option<u32>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh state: two ships, no planets, no missiles
    pub fn new(settings: &Settings) -> Self {
        let mut state = Self {
            width: settings.width,
            height: settings.height,
            grav_const: settings.grav_const,
            wall_thickness: settings.wall_thickness,
            frame: 0,
            phase: GamePhase::Running,
            seed: settings.seed,
            controls: settings.controls,
            missile_tuning: settings.missile,
            planet_tuning: settings.planet,
            planets: Vec::new(),
            missiles: Vec::new(),
            ships: Vec::new(),
            player_id: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            next_id: 1,
        };

        let machine_pilot = if settings.autopilot {
            Pilot::Autopilot
        } else {
            Pilot::Idle
        };
        let first_pilot = if settings.human_enabled {
            Pilot::Human
        } else {
            machine_pilot
        };

        let center = Vec2::new(settings.width / 2.0, settings.height / 2.0);
        let first = state.spawn_ship(first_pilot, center + Vec2::splat(100.0), &settings.ship);
        state.spawn_ship(machine_pilot, center, &settings.ship);
        if settings.human_enabled {
            state.player_id = Some(first);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a ship and return its id
    pub fn spawn_ship(&mut self, pilot: Pilot, pos: Vec2, tuning: &ShipTuning) -> u32 {
        let id = self.next_entity_id();
        self.ships
            .push(Spaceship::new(id, pilot, pos, self.wall_thickness, tuning));
        log::info!("Spaceship {} created at ({:.0}, {:.0}) [{:?}]", id, pos.x, pos.y, pilot);
        id
    }

    /// Add a planet with the default mass and return its id
    pub fn spawn_planet(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.planets.push(Planet::new(id, pos, self.planet_tuning.mass));
        log::info!("Planet {} created at ({:.0}, {:.0})", id, pos.x, pos.y);
        self.events.push(GameEvent::PlanetCreated { planet_id: id, pos });
        id
    }

    /// Let `ship_id` fire; returns the missile id
    pub fn fire(&mut self, ship_id: u32) -> Option<u32> {
        let missile_id = self.next_id;
        let missile = {
            let ship = self.ships.iter().find(|s| s.id == ship_id && s.alive)?;
            ship.shoot(missile_id, &self.missile_tuning)
        };
        self.next_id += 1;
        self.missiles.push(missile);
        self.events.push(GameEvent::Laser { ship_id, missile_id });
        Some(missile_id)
    }

    /// The keyboard-driven ship, while it is alive
    pub fn player(&self) -> Option<&Spaceship> {
        let id = self.player_id?;
        self.ships.iter().find(|s| s.id == id && s.alive)
    }

    pub fn player_mut(&mut self) -> Option<&mut Spaceship> {
        let id = self.player_id?;
        self.ships.iter_mut().find(|s| s.id == id && s.alive)
    }

    pub fn alive_ships(&self) -> impl Iterator<Item = &Spaceship> {
        self.ships.iter().filter(|s| s.alive)
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.planets.sort_by_key(|p| p.id);
        self.missiles.sort_by_key(|m| m.id);
        self.ships.sort_by_key(|s| s.id);
    }
}
