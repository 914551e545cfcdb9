use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::category::ExpressionCategory;

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Category colours: expression bucket → Color32
// ---------------------------------------------------------------------------

/// The one colour per category used by badges, icons and chart bars.
pub fn category_color(category: ExpressionCategory) -> Color32 {
    match category {
        // red
        ExpressionCategory::Low => hsl_to_color32(0.0, 0.72, 0.55),
        // blue
        ExpressionCategory::Medium => hsl_to_color32(210.0, 0.85, 0.55),
        // teal
        ExpressionCategory::High => hsl_to_color32(170.0, 0.65, 0.45),
    }
}

/// Legend entries (label, range, colour) in low → high order.
pub fn legend_entries() -> Vec<(&'static str, String, Color32)> {
    ExpressionCategory::ALL
        .iter()
        .map(|&c| (c.title(), c.range_text(), category_color(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn categories_have_distinct_colors() {
        let low = category_color(ExpressionCategory::Low);
        let medium = category_color(ExpressionCategory::Medium);
        let high = category_color(ExpressionCategory::High);
        assert_ne!(low, medium);
        assert_ne!(medium, high);
        assert_ne!(low, high);
    }

    #[test]
    fn legend_is_ordered() {
        let titles: Vec<_> = legend_entries().into_iter().map(|(t, _, _)| t).collect();
        assert_eq!(titles, ["Low", "Medium", "High"]);
    }
}
