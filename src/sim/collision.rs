//! Collision detection and response for circles and the window border
//!
//! Everything here is a plain distance test; with a few dozen entities the
//! O(n²) pairwise checks in `tick` are cheap.

use glam::Vec2;

/// Which axes were reflected by a wall contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect `vel` off the window border.
///
/// A body touches a wall when it comes within `reach` (its radius plus the
/// wall thickness) of the window edge. The velocity component is flipped
/// only while it points into that wall, so a body resting against the
/// border is pushed out instead of flipping back and forth.
pub fn bounce_off_walls(pos: Vec2, vel: Vec2, reach: f32, width: f32, height: f32) -> (Vec2, WallHit) {
    let mut vel = vel;
    let mut hit = WallHit::default();

    let right = pos.x + reach >= width;
    let left = pos.x - reach <= 0.0;
    if (right && vel.x > 0.0) || (left && vel.x < 0.0) {
        vel = reflect_velocity(vel, Vec2::X);
        hit.x = true;
    }

    let bottom = pos.y + reach >= height;
    let top = pos.y - reach <= 0.0;
    if (bottom && vel.y > 0.0) || (top && vel.y < 0.0) {
        vel = reflect_velocity(vel, Vec2::Y);
        hit.y = true;
    }

    (vel, hit)
}

/// Whether a moving circle touches another circle.
///
/// The mover's speed is subtracted from the centre distance, so the contact
/// is reported one frame before the circles would overlap.
#[inline]
pub fn circles_touch(pos: Vec2, vel: Vec2, radius: f32, other_pos: Vec2, other_radius: f32) -> bool {
    pos.distance(other_pos) - vel.length() < radius + other_radius
}

/// Whether `point` lies strictly inside the circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Index of the first position inside the circle, if any
pub fn first_hit(center: Vec2, radius: f32, positions: &[Vec2]) -> Option<usize> {
    positions
        .iter()
        .position(|&p| point_in_circle(p, center, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_velocity() {
        // Moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_bounce_right_wall() {
        // reach 40, right wall at 1080: contact from x >= 1040
        let (vel, hit) = bounce_off_walls(Vec2::new(1045.0, 300.0), Vec2::new(5.0, 2.0), 40.0, 1080.0, 720.0);
        assert_eq!(vel, Vec2::new(-5.0, 2.0));
        assert_eq!(hit, WallHit { x: true, y: false });
    }

    #[test]
    fn test_bounce_top_left_corner() {
        let (vel, hit) = bounce_off_walls(Vec2::new(30.0, 35.0), Vec2::new(-3.0, -4.0), 40.0, 1080.0, 720.0);
        assert_eq!(vel, Vec2::new(3.0, 4.0));
        assert!(hit.x && hit.y);
    }

    #[test]
    fn test_no_flip_when_leaving_wall() {
        let (vel, hit) = bounce_off_walls(Vec2::new(1045.0, 300.0), Vec2::new(-5.0, 0.0), 40.0, 1080.0, 720.0);
        assert_eq!(vel, Vec2::new(-5.0, 0.0));
        assert!(!hit.any());
    }

    #[test]
    fn test_no_bounce_in_open_space() {
        let (vel, hit) = bounce_off_walls(Vec2::new(540.0, 360.0), Vec2::new(9.0, -9.0), 40.0, 1080.0, 720.0);
        assert_eq!(vel, Vec2::new(9.0, -9.0));
        assert!(!hit.any());
    }

    #[test]
    fn test_circles_touch_with_lookahead() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(65.0, 0.0);
        // radii 30 + 30 = 60, distance 65
        assert!(!circles_touch(a, Vec2::ZERO, 30.0, b, 30.0));
        // moving at 6 px/frame: 65 - 6 < 60
        assert!(circles_touch(a, Vec2::new(0.0, 6.0), 30.0, b, 30.0));
    }

    #[test]
    fn test_first_hit() {
        let center = Vec2::new(100.0, 100.0);
        let positions = [
            Vec2::new(0.0, 0.0),
            Vec2::new(120.0, 100.0),
            Vec2::new(101.0, 101.0),
        ];
        assert_eq!(first_hit(center, 30.0, &positions), Some(1));
        assert_eq!(first_hit(center, 30.0, &positions[..1]), None);
        // boundary is not a hit
        assert_eq!(first_hit(center, 30.0, &[Vec2::new(130.0, 100.0)]), None);
    }
}
