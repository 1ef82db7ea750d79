use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Pastel scheme
// ---------------------------------------------------------------------------

/// Pink, yellow, blue, purple.
pub const PASTEL: [Color32; 4] = [
    Color32::from_rgb(0xFE, 0xC8, 0xD8),
    Color32::from_rgb(0xFF, 0xE5, 0xB4),
    Color32::from_rgb(0xB4, 0xD8, 0xFE),
    Color32::from_rgb(0xE0, 0xBB, 0xE4),
];

/// Accent for a highlighted bar.
pub const ACCENT: Color32 = Color32::from_rgb(0xE7, 0x5A, 0x7C);

/// The `i`-th colour of the discrete sequence, cycling.
pub fn pastel(i: usize) -> Color32 {
    PASTEL[i % PASTEL.len()]
}

/// Generates `n` visually distinct pastel colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.85, 0.78);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn to_linear(c: Color32) -> LinSrgb {
    Srgb::<u8>::new(c.r(), c.g(), c.b())
        .into_format::<f32>()
        .into_linear()
}

// ---------------------------------------------------------------------------
// Continuous scale
// ---------------------------------------------------------------------------

/// Colour at position `t` (clamped to `0..=1`) along the pastel stops,
/// interpolated in linear RGB.
pub fn gradient(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let segments = (PASTEL.len() - 1) as f32;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(PASTEL.len() - 2);
    let local = scaled - idx as f32;

    let mixed = to_linear(PASTEL[idx]).mix(to_linear(PASTEL[idx + 1]), local);
    let rgb: Srgb = mixed.into_color();
    to_color32(rgb)
}

/// Map `value` from `[lo, hi]` onto the gradient.
pub fn scale(value: f64, lo: f64, hi: f64) -> Color32 {
    if (hi - lo).abs() < f64::EPSILON {
        return gradient(0.0);
    }
    gradient((value - lo) / (hi - lo))
}

// ---------------------------------------------------------------------------
// Color mapping: character name → Color32
// ---------------------------------------------------------------------------

/// Maps series names to distinct colours.
///
/// Up to four names use the pastel sequence; more get evenly spaced hues.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        let colors = if names.len() <= PASTEL.len() {
            PASTEL.to_vec()
        } else {
            generate_palette(names.len())
        };
        let mapping = names
            .into_iter()
            .zip(colors)
            .map(|(n, c)| (n.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given name.
    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping.get(name).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_hits_end_stops() {
        assert_eq!(gradient(0.0), PASTEL[0]);
        assert_eq!(gradient(1.0), PASTEL[3]);
        assert_eq!(gradient(-3.0), PASTEL[0]);
    }

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(7);
        assert_eq!(p.len(), 7);
        let unique: std::collections::HashSet<_> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 7);
    }

    #[test]
    fn color_map_uses_pastels_for_few_series() {
        let map = ColorMap::new(["Kuromi", "My Melody"]);
        assert_eq!(map.color_for("Kuromi"), PASTEL[0]);
        assert_eq!(map.color_for("My Melody"), PASTEL[1]);
        assert_eq!(map.color_for("Badtz-Maru"), Color32::GRAY);
    }
}
