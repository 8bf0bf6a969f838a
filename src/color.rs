use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Bar colour of the skills chart (`#4CAF50`).
pub const ACCENT: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: experience bucket → Color32
// ---------------------------------------------------------------------------

/// Gives every experience bucket of a dataset its own bar colour, so a bucket
/// keeps its colour whichever title is selected.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<i64, Color32>,
}

impl ColorMap {
    pub fn new(levels: &BTreeSet<i64>) -> Self {
        let palette = generate_palette(levels.len());
        ColorMap {
            mapping: levels.iter().copied().zip(palette).collect(),
        }
    }

    /// Colour for an experience bucket; unknown buckets fall back to [`ACCENT`].
    pub fn color_for(&self, experience: i64) -> Color32 {
        self.mapping.get(&experience).copied().unwrap_or(ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        let unique: BTreeSet<[u8; 4]> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn unknown_bucket_uses_accent() {
        let levels: BTreeSet<i64> = [0, 2, 5].into_iter().collect();
        let map = ColorMap::new(&levels);
        assert_ne!(map.color_for(0), map.color_for(5));
        assert_eq!(map.color_for(42), ACCENT);
    }
}
