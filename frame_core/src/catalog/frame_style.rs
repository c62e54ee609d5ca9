//! Frame moulding styles.

use serde::{Deserialize, Serialize};

/// Product category a moulding is sold under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameCategory {
    #[default]
    Picture,
    Shadowbox,
    Canvas,
}

impl FrameCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            FrameCategory::Picture => "Picture Frame",
            FrameCategory::Shadowbox => "Shadowbox",
            FrameCategory::Canvas => "Canvas Float",
        }
    }
}

/// A moulding profile from the catalog.
///
/// ```json
/// {
///   "id": "black-classic",
///   "name": "Classic Black",
///   "price_per_inch": 1.05,
///   "moulding_width_in": 1.0,
///   "usable_depth_in": 0.75,
///   "color": "#1a1a1a",
///   "border_color": "#000000",
///   "category": "picture"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    pub id: String,
    pub name: String,

    /// Manufacturer SKU, when the style maps to a stocked moulding
    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub material: Option<String>,

    /// Retail price per linear inch of frame perimeter
    pub price_per_inch: f64,

    /// Visible face width of the profile (inches)
    pub moulding_width_in: f64,

    /// Depth available behind the glazing (inches)
    pub usable_depth_in: f64,

    /// Face color (hex)
    pub color: String,

    /// Outline color used by the preview (hex)
    pub border_color: String,

    #[serde(default)]
    pub category: FrameCategory,
}

impl FrameStyle {
    /// Deep enough to hold a dimensional object such as a tassel or record.
    pub fn fits_depth(&self, required_depth_in: f64) -> bool {
        self.category == FrameCategory::Shadowbox && self.usable_depth_in >= required_depth_in
    }

    pub(crate) fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.id.trim().is_empty() {
            problems.push("empty id".to_string());
        }
        if !self.price_per_inch.is_finite() || self.price_per_inch < 0.0 {
            problems.push(format!("price_per_inch {}", self.price_per_inch));
        }
        if !self.moulding_width_in.is_finite() || self.moulding_width_in <= 0.0 {
            problems.push(format!("moulding_width_in {}", self.moulding_width_in));
        }
        if !self.usable_depth_in.is_finite() || self.usable_depth_in < 0.0 {
            problems.push(format!("usable_depth_in {}", self.usable_depth_in));
        }
        if !super::is_hex_color(&self.color) {
            problems.push(format!("color {}", self.color));
        }
        if !super::is_hex_color(&self.border_color) {
            problems.push(format!("border_color {}", self.border_color));
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> FrameStyle {
        FrameStyle {
            id: "black-classic".to_string(),
            name: "Classic Black".to_string(),
            sku: None,
            material: None,
            price_per_inch: 1.05,
            moulding_width_in: 1.0,
            usable_depth_in: 0.75,
            color: "#1a1a1a".to_string(),
            border_color: "#000".to_string(),
            category: FrameCategory::Picture,
        }
    }

    #[test]
    fn test_valid_style() {
        assert!(style().problems().is_empty());
        assert!(!style().fits_depth(0.5));
    }

    #[test]
    fn test_border_color_must_be_hex() {
        let bad = FrameStyle {
            border_color: "black".to_string(),
            ..style()
        };
        assert_eq!(bad.problems(), ["border_color black"]);
    }
}
