//! Player input: key names to ship commands

use serde::{Deserialize, Serialize};

/// One action for the player ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipCommand {
    /// Accelerate along the facing direction
    Boost,
    /// Rotate counter-clockwise on screen
    TurnLeft,
    /// Rotate clockwise on screen
    TurnRight,
    /// Cut acceleration and slow down
    Brake,
    /// Launch a missile
    Fire,
}

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Left,
    Right,
    Down,
    Space,
}

impl Key {
    /// Parse a key name.
    ///
    /// Accepts the plain names (`UP`, `left`, `space`, ...) and the browser
    /// `KeyboardEvent.key` values (`ArrowUp`, `" "`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            " " => return Some(Key::Space),
            "ArrowUp" => return Some(Key::Up),
            "ArrowLeft" => return Some(Key::Left),
            "ArrowRight" => return Some(Key::Right),
            "ArrowDown" => return Some(Key::Down),
            _ => {}
        }
        match name.to_lowercase().as_str() {
            "up" => Some(Key::Up),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "down" => Some(Key::Down),
            "space" | "spacebar" => Some(Key::Space),
            _ => None,
        }
    }

    pub fn command(self) -> ShipCommand {
        match self {
            Key::Up => ShipCommand::Boost,
            Key::Left => ShipCommand::TurnLeft,
            Key::Right => ShipCommand::TurnRight,
            Key::Down => ShipCommand::Brake,
            Key::Space => ShipCommand::Fire,
        }
    }
}
