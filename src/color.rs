use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Genre colours: genre label → Color32
// ---------------------------------------------------------------------------

/// Assigns each genre a fixed colour, in the order genres were discovered.
#[derive(Debug, Clone, Default)]
pub struct GenreColors {
    mapping: BTreeMap<String, Color32>,
}

impl GenreColors {
    pub fn new(genres: &[String]) -> Self {
        let mapping = genres
            .iter()
            .cloned()
            .zip(generate_palette(genres.len()))
            .collect();
        GenreColors { mapping }
    }

    /// Colour for `genre`, grey when unknown.
    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping.get(genre).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Diverging ramp for the correlation heatmap
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Blue → light grey → red for `r` in [-1, 1]; values outside are clamped.
pub fn coolwarm(r: f64) -> Color32 {
    let t = r.clamp(-1.0, 1.0) as f32;
    let (from, to, factor) = if t < 0.0 {
        (COOL, NEUTRAL, t + 1.0)
    } else {
        (NEUTRAL, WARM, t)
    };
    let mixed = linear(from).mix(linear(to), factor);
    to_color32(Srgb::from_linear(mixed))
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}
