//! Color conversion helpers.
//!
//! Colors are `Vec3` with each channel in `0.0..=1.0`. Hex strings (`"#ff8800"`,
//! `"ff8800"`, `"#f80"`) are accepted wherever a color is authored.

use super::SimRng;
use glam::Vec3;
use rand::Rng;

/// Parse a hex color string into RGB.
///
/// Returns `None` for anything that is not 3 or 6 hex digits (with an optional
/// leading `#` or `0x`).
pub fn hex_to_rgb(hex: &str) -> Option<Vec3> {
    let digits = hex
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x");

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(rgb_from_u32(value))
}

/// Convert a packed `0xRRGGBB` integer into RGB.
pub fn rgb_from_u32(value: u32) -> Vec3 {
    Vec3::new(
        ((value >> 16) & 0xFF) as f32 / 255.0,
        ((value >> 8) & 0xFF) as f32 / 255.0,
        (value & 0xFF) as f32 / 255.0,
    )
}

/// Convert RGB into a `#rrggbb` string.
pub fn rgb_to_hex(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("#{:02x}{:02x}{:02x}", c.x as u8, c.y as u8, c.z as u8)
}

/// A random opaque color.
pub fn random_color(rng: &mut SimRng) -> Vec3 {
    rgb_from_u32(rng.gen_range(0..=0xFF_FFFF))
}

/// Color from HSV values.
///
/// * `h` - 0.0 to 1.0 (wraps: red → yellow → green → cyan → blue → magenta → red)
/// * `s` - 0.0 (gray) to 1.0 (vivid)
/// * `v` - 0.0 (black) to 1.0 (bright)
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_hex_to_rgb() {
        let orange = hex_to_rgb("#ff8000").unwrap();
        assert!((orange.x - 1.0).abs() < 1e-6);
        assert!((orange.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(orange.z, 0.0);

        assert_eq!(hex_to_rgb("fff"), Some(Vec3::ONE));
        assert_eq!(hex_to_rgb("0x000000"), Some(Vec3::ZERO));
        assert_eq!(hex_to_rgb("#12345"), None);
        assert_eq!(hex_to_rgb("zzzzzz"), None);
    }

    #[test]
    fn test_hex_round_trip_string() {
        assert_eq!(rgb_to_hex(hex_to_rgb("#4a90e2").unwrap()), "#4a90e2");
    }

    #[test]
    fn test_hsv_to_rgb() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red.x - 1.0).abs() < 0.001);
        assert!(red.y < 0.001);
        assert!(red.z < 0.001);

        let gray = hsv_to_rgb(0.3, 0.0, 0.5);
        assert!((gray - Vec3::splat(0.5)).length() < 0.001);
    }

    #[test]
    fn test_random_color_in_unit_cube() {
        let mut rng = SimRng::seed_from_u64(11);
        for _ in 0..100 {
            let c = random_color(&mut rng);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }
}
