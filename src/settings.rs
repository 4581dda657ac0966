//! Simulation settings and tuning
//!
//! Loaded from a JSON file on native and from LocalStorage on the web.
//! Every field has a default, so partial files are fine.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Spaceship tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Mass, also used as the forcefield (collision) radius
    pub mass: f32,
    /// Per-frame velocity multiplier, in (0, 1]
    pub damping: f32,
    /// Speed limit (pixels/frame); missiles are fired at this speed
    pub max_speed: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            mass: SHIP_MASS,
            damping: SHIP_DAMPING,
            max_speed: SHIP_MAX_SPEED,
        }
    }
}

/// Missile tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileTuning {
    pub mass: f32,
}

impl Default for MissileTuning {
    fn default() -> Self {
        Self {
            mass: MISSILE_MASS,
        }
    }
}

/// Planet tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetTuning {
    /// Mass of a freshly placed planet
    pub mass: f32,
    /// Mass added per click inside an existing planet
    pub growth: f32,
}

impl Default for PlanetTuning {
    fn default() -> Self {
        Self {
            mass: PLANET_MASS,
            growth: PLANET_GROWTH,
        }
    }
}

/// Player control strengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlTuning {
    pub boost: f32,
    /// Radians per turn command
    pub turn_step: f32,
    /// Fraction of velocity kept by a brake command
    pub brake_keep: f32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            boost: SHIP_BOOST,
            turn_step: SHIP_TURN_STEP,
            brake_keep: SHIP_BRAKE_KEEP,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub width: f32,
    pub height: f32,
    pub frame_rate: u32,
    /// Border thickness (pixels), ships bounce off its inner edge
    pub wall_thickness: f32,
    /// Draw the measured frame rate in a corner
    pub show_frame_rate: bool,

    // === Physics ===
    pub grav_const: f32,

    // === Players ===
    /// Keyboard drives the first ship
    pub human_enabled: bool,
    /// Ships not driven by the keyboard steer themselves
    pub autopilot: bool,
    /// Seed for autopilot randomness
    pub seed: u64,

    // === Audio ===
    pub enable_audio: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Tuning ===
    pub ship: ShipTuning,
    pub missile: MissileTuning,
    pub planet: PlanetTuning,
    pub controls: ControlTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            frame_rate: FRAME_RATE,
            wall_thickness: WALL_THICKNESS,
            show_frame_rate: true,

            grav_const: GRAV_CONST,

            human_enabled: true,
            autopilot: false,
            seed: 0,

            enable_audio: true,
            master_volume: 0.8,
            sfx_volume: 1.0,

            ship: ShipTuning::default(),
            missile: MissileTuning::default(),
            planet: PlanetTuning::default(),
            controls: ControlTuning::default(),
        }
    }
}

impl Settings {
    /// Seconds per simulation frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Every float field with its name
    fn float_fields(&self) -> [(&'static str, f32); 15] {
        [
            ("width", self.width),
            ("height", self.height),
            ("wall_thickness", self.wall_thickness),
            ("grav_const", self.grav_const),
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("ship.mass", self.ship.mass),
            ("ship.damping", self.ship.damping),
            ("ship.max_speed", self.ship.max_speed),
            ("missile.mass", self.missile.mass),
            ("planet.mass", self.planet.mass),
            ("planet.growth", self.planet.growth),
            ("controls.boost", self.controls.boost),
            ("controls.turn_step", self.controls.turn_step),
            ("controls.brake_keep", self.controls.brake_keep),
        ]
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in self.float_fields() {
            anyhow::ensure!(value.is_finite(), "{name} must be finite, got {value}");
        }
        anyhow::ensure!(
            self.width > 0.0 && self.height > 0.0,
            "window must have a positive size, got {}x{}",
            self.width,
            self.height
        );
        anyhow::ensure!(self.frame_rate > 0, "frame_rate must be positive");
        anyhow::ensure!(
            self.wall_thickness >= 0.0
                && 2.0 * (self.wall_thickness + self.ship.mass) < self.width.min(self.height),
            "wall_thickness {} leaves no room for a ship of mass {}",
            self.wall_thickness,
            self.ship.mass
        );
        anyhow::ensure!(self.ship.mass > 0.0, "ship mass must be positive");
        anyhow::ensure!(
            self.ship.damping > 0.0 && self.ship.damping <= 1.0,
            "ship damping must be in (0, 1], got {}",
            self.ship.damping
        );
        anyhow::ensure!(self.ship.max_speed > 0.0, "ship max_speed must be positive");
        anyhow::ensure!(self.missile.mass > 0.0, "missile mass must be positive");
        anyhow::ensure!(self.planet.mass > 0.0, "planet mass must be positive");
        Ok(())
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read settings: {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("parse settings: {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "space_skirmish_settings";

    /// Load settings from LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e:#}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.width, 1080.0);
        assert_eq!(settings.height, 720.0);
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.ship.damping, 0.99);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "grav_const": 2.5, "ship": { "max_speed": 6 } }"#)
            .expect("valid settings");
        assert_eq!(settings.grav_const, 2.5);
        assert_eq!(settings.ship.max_speed, 6.0);
        assert_eq!(settings.ship.mass, SHIP_MASS);
        assert_eq!(settings.width, WIDTH);
    }

    #[test]
    fn test_rejects_bad_damping() {
        let err = Settings::from_json(r#"{ "ship": { "damping": 1.5 } }"#).unwrap_err();
        assert!(err.to_string().contains("damping"));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        // 1e39 overflows f32 to infinity
        let err = Settings::from_json(r#"{ "grav_const": 1e39 }"#).unwrap_err();
        assert!(err.to_string().contains("grav_const"));

        assert!(Settings::from_json(r#"{ "ship": { "max_speed": 1e39 } }"#).is_err());
        assert!(Settings::from_json(r#"{ "controls": { "boost": -1e39 } }"#).is_err());
        assert!(Settings::from_json(r#"{ "width": 1e39 }"#).is_err());

        let settings = Settings {
            planet: PlanetTuning {
                mass: f32::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_wall_that_does_not_fit() {
        let settings = Settings {
            width: 100.0,
            height: 100.0,
            wall_thickness: 30.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_frame_dt() {
        let settings = Settings::default();
        assert!((settings.frame_dt() - 1.0 / 30.0).abs() < 1e-6);
    }
}
