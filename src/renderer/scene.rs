//! Scene description: what to draw for a game state
//!
//! Pure geometry in window coordinates, so any 2D backend can paint it and
//! tests can inspect it.

use glam::{Mat2, Vec2};

use super::colors;
use crate::sim::{GameState, Missile, Planet, Spaceship};

/// Forward offset of the hull inside the forcefield (pixels)
const HULL_SHIFT: f32 = 5.0;
/// Length of a booster along the hull axis (pixels)
const BOOSTER_LENGTH: f32 = 5.0;

/// A single 2D draw command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole window
    Clear { color: [f32; 4] },
    /// Band of `thickness` along the inside of the window edge
    Frame {
        size: Vec2,
        thickness: f32,
        color: [f32; 4],
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Filled convex polygon
    Polygon { points: Vec<Vec2>, color: [f32; 4] },
    /// Text anchored at its top-left corner
    Text {
        pos: Vec2,
        text: String,
        color: [f32; 4],
    },
}

/// Build the draw list for one frame; `fps` adds a frame-rate label
pub fn build(state: &GameState, fps: Option<u32>) -> Vec<DrawCmd> {
    let size = Vec2::new(state.width, state.height);
    let mut cmds = Vec::with_capacity(2 + state.planets.len() + state.missiles.len() + state.ships.len() * 4);

    cmds.push(DrawCmd::Clear {
        color: colors::BACKGROUND,
    });
    cmds.push(DrawCmd::Frame {
        size,
        thickness: state.wall_thickness,
        color: colors::BORDER,
    });

    cmds.extend(state.planets.iter().map(planet));
    cmds.extend(state.missiles.iter().map(missile));
    for ship in state.alive_ships() {
        cmds.extend(spaceship(ship));
    }

    if let Some(fps) = fps {
        let inset = state.wall_thickness + 4.0;
        cmds.push(DrawCmd::Text {
            pos: Vec2::splat(inset),
            text: format!("{fps} fps"),
            color: colors::HUD_TEXT,
        });
    }

    cmds
}

pub fn planet(planet: &Planet) -> DrawCmd {
    DrawCmd::Circle {
        center: planet.pos,
        radius: planet.radius(),
        color: colors::PLANET,
    }
}

pub fn missile(missile: &Missile) -> DrawCmd {
    DrawCmd::Circle {
        center: missile.pos,
        radius: missile.radius(),
        color: colors::MISSILE,
    }
}

/// Forcefield, hull triangle and two boosters, rotated to the ship's
/// direction. The hull is shifted forward so the boosters sit inside the
/// forcefield.
pub fn spaceship(ship: &Spaceship) -> [DrawCmd; 4] {
    let m = ship.mass;
    let rotation = Mat2::from_angle(ship.direction);
    let place = |local: Vec2| ship.pos + rotation * local;

    let back = -m / 2.0 + HULL_SHIFT;
    let hull = vec![
        place(Vec2::new(m / 2.0 + HULL_SHIFT, 0.0)),
        place(Vec2::new(back, m / 3.0)),
        place(Vec2::new(back, -m / 3.0)),
    ];

    let booster = |side: f32| {
        let near = side * m / 18.0;
        let far = side * 2.0 * m / 9.0;
        vec![
            place(Vec2::new(back - BOOSTER_LENGTH, near)),
            place(Vec2::new(back, near)),
            place(Vec2::new(back, far)),
            place(Vec2::new(back - BOOSTER_LENGTH, far)),
        ]
    };

    [
        DrawCmd::Circle {
            center: ship.pos,
            radius: ship.radius(),
            color: colors::FORCEFIELD,
        },
        DrawCmd::Polygon {
            points: hull,
            color: colors::HULL,
        },
        DrawCmd::Polygon {
            points: booster(1.0),
            color: colors::BOOSTER,
        },
        DrawCmd::Polygon {
            points: booster(-1.0),
            color: colors::BOOSTER,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_scene_counts() {
        let mut state = GameState::new(&Settings::default());
        state.spawn_planet(Vec2::new(100.0, 100.0));
        let cmds = build(&state, None);
        // clear + frame + planet + 2 ships * 4
        assert_eq!(cmds.len(), 11);
        assert!(matches!(cmds[0], DrawCmd::Clear { .. }));
        assert!(matches!(cmds[1], DrawCmd::Frame { thickness, .. } if thickness == 10.0));
    }

    #[test]
    fn test_fps_label() {
        let state = GameState::new(&Settings::default());
        let cmds = build(&state, Some(29));
        match cmds.last() {
            Some(DrawCmd::Text { text, .. }) => assert_eq!(text, "29 fps"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_hull_nose_follows_direction() {
        let mut state = GameState::new(&Settings::default());
        let ship = &mut state.ships[0];
        ship.direction = FRAC_PI_2;
        let cmds = spaceship(ship);
        let DrawCmd::Polygon { points, .. } = &cmds[1] else {
            panic!("hull should be a polygon");
        };
        // nose at mass/2 + shift = 20 along +y
        let nose = points[0] - ship.pos;
        assert!(nose.x.abs() < 1e-4);
        assert!((nose.y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_ship_parts_stay_inside_forcefield() {
        let state = GameState::new(&Settings::default());
        let ship = &state.ships[0];
        for cmd in spaceship(ship).iter().skip(1) {
            let DrawCmd::Polygon { points, .. } = cmd else {
                panic!("ship parts are polygons");
            };
            for p in points {
                assert!(p.distance(ship.pos) <= ship.radius());
            }
        }
    }
}
