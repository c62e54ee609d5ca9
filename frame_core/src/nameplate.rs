//! # Engraved Nameplate
//!
//! A 4.5" × 1.5" engraved plate mounted on the mat below the openings.
//! The plate needs guaranteed clearance, which layouts provide in one of a
//! few ways:
//!
//! | Mount            | Bottom mat border                          |
//! |------------------|--------------------------------------------|
//! | `UserOverride`   | `max(user border, minimum)`                |
//! | `Stretched`      | fixed at the minimum                       |
//! | `FixedDistance`  | offset + plate height + clearance          |
//! | `PlaqueExtension`| layout border kept; frame grows to fit     |
//!
//! Fixed-border layouts (tickets, records, CDs) always use
//! `PlaqueExtension`.

use serde::{Deserialize, Serialize};

use crate::catalog::NameplateSpecs;
use crate::notices::ValidationMessage;

/// Maximum characters per engraved line
pub const LINE_LIMITS: [usize; 3] = [30, 40, 40];

/// Engraving typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameplateFont {
    #[default]
    Georgia,
    Arial,
    TrajanPro,
    DancingScript,
    CourierNew,
}

impl NameplateFont {
    pub const ALL: [NameplateFont; 5] = [
        NameplateFont::Georgia,
        NameplateFont::Arial,
        NameplateFont::TrajanPro,
        NameplateFont::DancingScript,
        NameplateFont::CourierNew,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            NameplateFont::Georgia => "georgia",
            NameplateFont::Arial => "arial",
            NameplateFont::TrajanPro => "trajan-pro",
            NameplateFont::DancingScript => "dancing-script",
            NameplateFont::CourierNew => "courier-new",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }
}

/// Plate finish and engraving color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameplateColor {
    #[default]
    BrassBlack,
    SilverBlack,
    BlackGold,
    BlackSilver,
}

impl NameplateColor {
    pub const ALL: [NameplateColor; 4] = [
        NameplateColor::BrassBlack,
        NameplateColor::SilverBlack,
        NameplateColor::BlackGold,
        NameplateColor::BlackSilver,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            NameplateColor::BrassBlack => "brass-black",
            NameplateColor::SilverBlack => "silver-black",
            NameplateColor::BlackGold => "black-gold",
            NameplateColor::BlackSilver => "black-silver",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Customer's nameplate choices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameplateConfig {
    pub enabled: bool,
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub font: NameplateFont,
    pub color: NameplateColor,
    /// US flag graphic, no extra charge
    pub include_flag: bool,
}

impl NameplateConfig {
    pub fn lines(&self) -> [&str; 3] {
        [&self.line1, &self.line2, &self.line3]
    }

    /// Engraving text problems. Empty when the text fits.
    pub fn validate(&self) -> Vec<ValidationMessage> {
        self.lines()
            .iter()
            .zip(LINE_LIMITS)
            .enumerate()
            .filter(|(_, (line, limit))| line.chars().count() > *limit)
            .map(|(i, (line, limit))| {
                ValidationMessage::invalid(
                    format!("nameplate.line{}", i + 1),
                    format!("Line {} is {} characters; the limit is {}", i + 1, line.chars().count(), limit),
                )
            })
            .collect()
    }
}

/// How a layout makes room for the plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameplateMount {
    /// Bottom border raised to the minimum unless the user's is already larger
    #[default]
    UserOverride,
    /// Bottom border set to exactly the minimum
    Stretched,
    /// Bottom border sized to offset + plate + clearance
    FixedDistance,
    /// Frame height extended by the clearance shortfall
    PlaqueExtension,
}

impl NameplateMount {
    /// Bottom border with the plate mounted, before bottom weighting.
    pub fn bottom_border(&self, user_bottom_in: f64, specs: &NameplateSpecs) -> f64 {
        match self {
            NameplateMount::UserOverride => user_bottom_in.max(specs.min_bottom_border_in),
            NameplateMount::Stretched => specs.min_bottom_border_in,
            NameplateMount::FixedDistance => {
                specs.offset_from_opening_in + specs.height_in + specs.bottom_clearance_in
            }
            NameplateMount::PlaqueExtension => user_bottom_in,
        }
    }
}

/// Extra frame height needed so the plate clears the bottom of the frame.
///
/// `natural_margin_in` is the mat below the lowest opening before any
/// extension.
pub fn plaque_extension(natural_margin_in: f64, specs: &NameplateSpecs) -> f64 {
    (specs.min_bottom_border_in - natural_margin_in).max(0.0)
}

/// Plate rectangle in mat coordinates (origin at the inside of the moulding).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameplatePlacement {
    pub x_in: f64,
    pub y_in: f64,
    pub width_in: f64,
    pub height_in: f64,
}

impl NameplatePlacement {
    /// Center the plate horizontally on the mat and hang it a fixed offset
    /// below the lowest opening.
    pub fn below_opening(mat_width_in: f64, lowest_opening_bottom_in: f64, specs: &NameplateSpecs) -> Self {
        NameplatePlacement {
            x_in: (mat_width_in - specs.width_in) / 2.0,
            y_in: lowest_opening_bottom_in + specs.offset_from_opening_in,
            width_in: specs.width_in,
            height_in: specs.height_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_bottom_borders() {
        let specs = NameplateSpecs::default();
        assert_eq!(NameplateMount::UserOverride.bottom_border(2.0, &specs), 3.75);
        assert_eq!(NameplateMount::UserOverride.bottom_border(4.5, &specs), 4.5);
        assert_eq!(NameplateMount::Stretched.bottom_border(4.5, &specs), 3.75);
        assert_eq!(NameplateMount::FixedDistance.bottom_border(0.0, &specs), 3.75);
        assert_eq!(NameplateMount::PlaqueExtension.bottom_border(0.0, &specs), 0.0);
    }

    #[test]
    fn test_plaque_extension() {
        let specs = NameplateSpecs::default();
        assert_eq!(plaque_extension(3.0, &specs), 0.75);
        assert_eq!(plaque_extension(5.0, &specs), 0.0);
    }

    #[test]
    fn test_placement() {
        let specs = NameplateSpecs::default();
        let plate = NameplatePlacement::below_opening(16.0, 10.5, &specs);
        assert_eq!(plate.x_in, 5.75);
        assert_eq!(plate.y_in, 11.5);
    }

    #[test]
    fn test_line_limits() {
        let mut config = NameplateConfig {
            enabled: true,
            line1: "Jane Q. Graduate".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_empty());

        config.line2 = "x".repeat(41);
        let messages = config.validate();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].field, "nameplate.line2");
    }

    #[test]
    fn test_font_and_color_ids() {
        assert_eq!(NameplateFont::from_id("trajan-pro"), Some(NameplateFont::TrajanPro));
        assert_eq!(NameplateColor::from_id("black-gold"), Some(NameplateColor::BlackGold));
        assert_eq!(NameplateFont::from_id("comic-sans"), None);
        let json = serde_json::to_string(&NameplateFont::DancingScript).unwrap();
        assert_eq!(json, "\"dancing-script\"");
    }
}
