use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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

// ---------------------------------------------------------------------------
// Color mapping: ticker symbol → Color32
// ---------------------------------------------------------------------------

/// Maps ticker symbols to distinct colours.
///
/// Built from the full dataset's symbol list, so a symbol keeps its colour
/// while filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours in symbol-list order.
    pub fn new(symbols: &[String]) -> Self {
        let palette = generate_palette(symbols.len());
        let mapping: BTreeMap<String, Color32> =
            symbols.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a symbol. Unknown or blank symbols fall back
    /// to the default colour.
    pub fn color_for(&self, symbol: &str) -> Color32 {
        self.mapping
            .get(symbol)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_get_distinct_stable_colors() {
        let symbols = vec!["AAPL".to_string(), "GOOG".to_string(), "MSFT".to_string()];
        let map = ColorMap::new(&symbols);
        let colors: Vec<Color32> = symbols.iter().map(|s| map.color_for(s)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        // Unknown symbol falls back to the default.
        assert_eq!(map.color_for("TSLA"), Color32::GRAY);
    }
}
