use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::options::OptionEntry;

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `#rrggbb` form for the web chart.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

// ---------------------------------------------------------------------------
// Year → Color32
// ---------------------------------------------------------------------------

/// Assigns each year of the year selector a fixed colour, so a line keeps
/// its colour while other years are toggled on and off.
#[derive(Debug, Clone)]
pub struct YearColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for YearColors {
    fn default() -> Self {
        YearColors::new(&[])
    }
}

impl YearColors {
    pub fn new(years: &[OptionEntry<String>]) -> Self {
        let palette = generate_palette(years.len());
        let mapping = years
            .iter()
            .zip(palette)
            .map(|(entry, c)| (entry.value.clone(), c))
            .collect();

        YearColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a year; unknown years are grey.
    pub fn color_for(&self, year: &str) -> Color32 {
        self.mapping
            .get(year)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn hex_for(&self, year: &str) -> String {
        to_hex(self.color_for(year))
    }
}
