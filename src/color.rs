use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Fill of the publications-per-year bars.
pub const YEAR_BAR_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

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
            let hue = (i as f32 / n as f32) * 300.0;
            let hsl = Hsl::new(hue, 0.6, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// One colour per ranked bar, cycling through a fixed-size palette so that a
/// bar keeps its colour when the list shrinks.
pub fn ranked_colors(n: usize) -> Vec<Color32> {
    let palette = generate_palette(crate::data::stats::TOP_N);
    (0..n).map(|i| palette[i % palette.len()]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let p = generate_palette(20);
        assert_eq!(p.len(), 20);
        for (i, a) in p.iter().enumerate() {
            assert!(p[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn ranked_colours_are_stable_by_rank() {
        let long = ranked_colors(20);
        let short = ranked_colors(3);
        assert_eq!(&long[..3], &short[..]);
    }
}
