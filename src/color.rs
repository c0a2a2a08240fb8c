use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Saturation and lightness shared by every category colour.
const SATURATION: f32 = 0.75;
const LIGHTNESS: f32 = 0.55;

fn hue_to_color32(hue: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, SATURATION, LIGHTNESS).into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Assigns each category label a distinct colour, in sorted label order.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a String>) -> Self {
        let mut labels: Vec<&String> = labels.into_iter().collect();
        labels.sort();
        labels.dedup();
        // Hues are spread evenly around the wheel, one step per label.
        let step = 360.0 / labels.len().max(1) as f32;
        let mapping = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), hue_to_color32(i as f32 * step)))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label; unknown labels get grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping.iter().map(|(l, c)| (l.clone(), *c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn each_label_gets_a_distinct_colour() {
        let labels = owned(&["setosa", "versicolor", "virginica"]);
        let colors = CategoryColors::new(&labels);
        let legend = colors.legend_entries();
        assert_eq!(legend.len(), 3);
        assert_ne!(legend[0].1, legend[1].1);
        assert_ne!(legend[1].1, legend[2].1);
        assert_ne!(legend[0].1, legend[2].1);
    }

    #[test]
    fn no_labels_gives_an_empty_legend() {
        let colors = CategoryColors::new(&Vec::<String>::new());
        assert!(colors.legend_entries().is_empty());
        assert_eq!(colors.color_for("setosa"), Color32::GRAY);
    }

    #[test]
    fn labels_map_in_sorted_order() {
        let labels = owned(&["virginica", "setosa", "versicolor", "setosa"]);
        let colors = CategoryColors::new(&labels);
        let legend: Vec<String> = colors.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(legend, vec!["setosa", "versicolor", "virginica"]);
        // The first label sits at hue 0, a saturated red.
        assert_eq!(colors.color_for("setosa"), hue_to_color32(0.0));
        let red = colors.color_for("setosa");
        assert!(red.r() > red.g() && red.r() > red.b());
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }
}
