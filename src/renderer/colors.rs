//! Colors for game elements (RGBA, 0.0 - 1.0)

pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BORDER: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const PLANET: [f32; 4] = [50.0 / 255.0, 175.0 / 255.0, 200.0 / 255.0, 1.0];
pub const MISSILE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const FORCEFIELD: [f32; 4] = [100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0, 1.0];
pub const HULL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BOOSTER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const HUD_TEXT: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// CSS `rgba()` string for a color
pub fn css(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css() {
        assert_eq!(css(PLANET), "rgba(50, 175, 200, 1)");
        assert_eq!(css([2.0, -1.0, 0.5, 0.5]), "rgba(255, 0, 128, 0.5)");
    }
}
