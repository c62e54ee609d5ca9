//! Pricing coefficients and framing thresholds.
//!
//! Every field has a serde default so a catalog that ships only some
//! coefficients still prices consistently. The defaults are the values the
//! storefront currently charges.

use serde::{Deserialize, Serialize};

use crate::configuration::MatType;

/// Mat price multipliers by mat type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatMultipliers {
    pub none: f64,
    pub single: f64,
    pub double: f64,
}

impl Default for MatMultipliers {
    fn default() -> Self {
        MatMultipliers {
            none: 0.0,
            single: 1.0,
            double: 1.5,
        }
    }
}

impl MatMultipliers {
    pub fn for_type(&self, mat_type: MatType) -> f64 {
        match mat_type {
            MatType::None => self.none,
            MatType::Single => self.single,
            MatType::Double => self.double,
        }
    }
}

/// Oversize policy for the finished (outer) frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OversizePolicy {
    /// Above this on either side the oversize fee applies (inches)
    pub soft_threshold_in: f64,
    pub fee: f64,
    /// Above this on either side the order is refused (inches)
    pub hard_cap_in: f64,
}

impl Default for OversizePolicy {
    fn default() -> Self {
        OversizePolicy {
            soft_threshold_in: 40.0,
            fee: 100.0,
            hard_cap_in: 60.0,
        }
    }
}

/// Engraved nameplate physical specs and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameplateSpecs {
    pub width_in: f64,
    pub height_in: f64,
    /// Bottom mat border needed to mount the plate
    pub min_bottom_border_in: f64,
    /// Gap between the lowest opening and the top of the plate
    pub offset_from_opening_in: f64,
    /// Gap between the plate and the frame lip
    pub bottom_clearance_in: f64,
    pub price: f64,
}

impl Default for NameplateSpecs {
    fn default() -> Self {
        NameplateSpecs {
            width_in: 4.5,
            height_in: 1.5,
            min_bottom_border_in: 3.75,
            offset_from_opening_in: 1.0,
            bottom_clearance_in: 1.25,
            price: 29.0,
        }
    }
}

/// Flat fees for layout-specific extras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutFees {
    /// Diploma photo opening (only charged with a mat)
    pub photo_opening: f64,
    /// Tassel hook in a diploma shadowbox
    pub tassel_hook: f64,
    /// Each ticket-layout opening beyond the first
    pub extra_opening: f64,
    /// Ticket layout cut as a double mat
    pub double_mat: f64,
    /// Print of a supplied photo in a ticket layout
    pub photo_print: f64,
}

impl Default for LayoutFees {
    fn default() -> Self {
        LayoutFees {
            photo_opening: 5.0,
            tassel_hook: 15.0,
            extra_opening: 15.0,
            double_mat: 15.0,
            photo_print: 8.0,
        }
    }
}

/// All pricing coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Print-and-frame print cost per square inch of artwork
    pub print_price_per_sq_in: f64,

    /// Base mat rate per inch of mat perimeter
    pub mat_price_per_inch: f64,

    pub mat_multipliers: MatMultipliers,

    /// Applied to the mat price when any chosen mat is premium
    pub premium_mat_multiplier: f64,

    pub oversize: OversizePolicy,

    /// Smallest artwork accepted on a user-sized layout (inches)
    pub min_artwork_in: f64,

    /// Extra bottom border for bottom-weighted matting (inches)
    pub bottom_weight_extra_in: f64,

    pub security_hardware_fee: f64,

    pub nameplate: NameplateSpecs,

    pub layout_fees: LayoutFees,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            print_price_per_sq_in: 0.12,
            mat_price_per_inch: 0.10,
            mat_multipliers: MatMultipliers::default(),
            premium_mat_multiplier: 1.25,
            oversize: OversizePolicy::default(),
            min_artwork_in: 4.0,
            bottom_weight_extra_in: 0.5,
            security_hardware_fee: 8.95,
            nameplate: NameplateSpecs::default(),
            layout_fees: LayoutFees::default(),
        }
    }
}

impl PricingConfig {
    pub(crate) fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let checks = [
            ("print_price_per_sq_in", self.print_price_per_sq_in),
            ("mat_price_per_inch", self.mat_price_per_inch),
            ("mat_multipliers.none", self.mat_multipliers.none),
            ("mat_multipliers.single", self.mat_multipliers.single),
            ("mat_multipliers.double", self.mat_multipliers.double),
            ("premium_mat_multiplier", self.premium_mat_multiplier),
            ("oversize.soft_threshold_in", self.oversize.soft_threshold_in),
            ("oversize.fee", self.oversize.fee),
            ("oversize.hard_cap_in", self.oversize.hard_cap_in),
            ("min_artwork_in", self.min_artwork_in),
            ("bottom_weight_extra_in", self.bottom_weight_extra_in),
            ("security_hardware_fee", self.security_hardware_fee),
            ("nameplate.width_in", self.nameplate.width_in),
            ("nameplate.height_in", self.nameplate.height_in),
            ("nameplate.min_bottom_border_in", self.nameplate.min_bottom_border_in),
            ("nameplate.offset_from_opening_in", self.nameplate.offset_from_opening_in),
            ("nameplate.bottom_clearance_in", self.nameplate.bottom_clearance_in),
            ("nameplate.price", self.nameplate.price),
            ("layout_fees.photo_opening", self.layout_fees.photo_opening),
            ("layout_fees.tassel_hook", self.layout_fees.tassel_hook),
            ("layout_fees.extra_opening", self.layout_fees.extra_opening),
            ("layout_fees.double_mat", self.layout_fees.double_mat),
            ("layout_fees.photo_print", self.layout_fees.photo_print),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                problems.push(format!("{name} {value}"));
            }
        }
        if self.oversize.hard_cap_in < self.oversize.soft_threshold_in {
            problems.push("oversize.hard_cap_in below soft threshold".to_string());
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_inherits_defaults() {
        let config: PricingConfig =
            serde_json::from_str(r#"{"oversize": {"hard_cap_in": 72.0}, "min_artwork_in": 5.0}"#).unwrap();
        assert_eq!(config.oversize.hard_cap_in, 72.0);
        assert_eq!(config.oversize.soft_threshold_in, 40.0);
        assert_eq!(config.min_artwork_in, 5.0);
        assert_eq!(config.nameplate.min_bottom_border_in, 3.75);
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_negative_fee_rejected() {
        let config: PricingConfig = serde_json::from_str(r#"{"layout_fees": {"tassel_hook": -500.0}}"#).unwrap();
        assert_eq!(config.problems(), ["layout_fees.tassel_hook -500"]);

        let mut config = PricingConfig::default();
        config.mat_multipliers.double = f64::NAN;
        config.bottom_weight_extra_in = -0.5;
        config.nameplate.height_in = f64::INFINITY;
        assert_eq!(config.problems().len(), 3);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = PricingConfig::default();
        config.oversize.hard_cap_in = 30.0;
        assert_eq!(config.problems().len(), 1);
    }
}
