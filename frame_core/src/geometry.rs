//! # Frame Dimension Aggregation
//!
//! Combines the resolved openings, mat borders, reveal and moulding into the
//! finished frame size. Pricing and preview both read this one value, so
//! the frame the customer sees is the frame they pay for.
//!
//! ```text
//! frame width  = envelope + left + right + 2 x reveal + 2 x moulding
//! frame height = envelope + top + bottom + 2 x reveal + 2 x moulding + plaque extension
//! ```

use serde::{Deserialize, Serialize};

use crate::borders::{BorderOutcome, MatBorders};
use crate::catalog::{OversizePolicy, PricingConfig};
use crate::configuration::MatType;
use crate::layouts::OpeningLayout;
use crate::nameplate::NameplatePlacement;

/// Oversize checks against the finished frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OversizeStatus {
    /// Either side beyond the soft threshold; an oversize fee applies
    pub fee_applies: bool,
    /// Either side beyond the hard cap; the order cannot be placed
    pub exceeds_hard_cap: bool,
}

impl OversizeStatus {
    pub fn check(frame_width_in: f64, frame_height_in: f64, policy: &OversizePolicy) -> Self {
        let longest = frame_width_in.max(frame_height_in);
        OversizeStatus {
            fee_applies: longest > policy.soft_threshold_in,
            exceeds_hard_cap: longest > policy.hard_cap_in,
        }
    }
}

/// Finished geometry for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedGeometry {
    pub layout: OpeningLayout,
    pub mat_type: MatType,
    pub borders: MatBorders,
    /// Inner mat reveal, zero unless double mat
    pub reveal_in: f64,
    pub moulding_width_in: f64,
    pub plaque_extension_in: f64,
    /// Plate position in mat coordinates, when one is mounted
    pub nameplate: Option<NameplatePlacement>,
    pub frame_width_in: f64,
    pub frame_height_in: f64,
    pub oversize: OversizeStatus,
    /// Largest finished side that can be ordered (inches)
    pub hard_cap_in: f64,
}

/// Smallest fraction of its real size a capped envelope is drawn at
const MIN_PREVIEW_SHRINK: f64 = 0.05;

fn shrink_factor(extent_in: f64, excess_in: f64) -> f64 {
    if extent_in <= 0.0 || excess_in <= 0.0 {
        return 1.0;
    }
    ((extent_in - excess_in) / extent_in).clamp(MIN_PREVIEW_SHRINK, 1.0)
}

impl AggregatedGeometry {
    pub fn aggregate(
        layout: OpeningLayout,
        mat_type: MatType,
        outcome: &BorderOutcome,
        reveal_in: f64,
        moulding_width_in: f64,
        pricing: &PricingConfig,
    ) -> Self {
        let reveal_in = if mat_type == MatType::Double { reveal_in.max(0.0) } else { 0.0 };
        let borders = outcome.borders;
        let mut layout = layout;
        layout.contain_within(&borders);
        let mat_width = layout.envelope_width_in + borders.horizontal() + 2.0 * reveal_in;
        let mat_height =
            layout.envelope_height_in + borders.vertical() + 2.0 * reveal_in + outcome.plaque_extension_in;
        let frame_width_in = mat_width + 2.0 * moulding_width_in;
        let frame_height_in = mat_height + 2.0 * moulding_width_in;

        let nameplate = outcome.nameplate_active.then(|| {
            let lowest = borders.top_in + reveal_in + layout.lowest_opening_bottom_in();
            NameplatePlacement::below_opening(mat_width, lowest, &pricing.nameplate)
        });

        AggregatedGeometry {
            oversize: OversizeStatus::check(frame_width_in, frame_height_in, &pricing.oversize),
            layout,
            mat_type,
            borders,
            reveal_in,
            moulding_width_in,
            plaque_extension_in: outcome.plaque_extension_in,
            nameplate,
            frame_width_in,
            frame_height_in,
            hard_cap_in: pricing.oversize.hard_cap_in,
        }
    }

    /// The same frame shrunk to the hard cap on each axis, for drawing a
    /// configuration that cannot be ordered at its real size.
    ///
    /// Only the envelope shrinks; borders, reveal and moulding keep their
    /// real widths. Openings scale with the envelope and the nameplate
    /// follows the lowest opening.
    pub fn capped_for_preview(&self) -> AggregatedGeometry {
        let mut capped = self.clone();
        if !self.oversize.exceeds_hard_cap {
            return capped;
        }

        let env_w = self.layout.envelope_width_in;
        let env_h = self.layout.envelope_height_in;
        let kx = shrink_factor(env_w, self.frame_width_in - self.hard_cap_in);
        let ky = shrink_factor(env_h, self.frame_height_in - self.hard_cap_in);

        for opening in &mut capped.layout.openings {
            opening.x_in *= kx;
            opening.width_in *= kx;
            opening.y_in *= ky;
            opening.height_in *= ky;
        }
        capped.layout.envelope_width_in = env_w * kx;
        capped.layout.envelope_height_in = env_h * ky;

        let dw = env_w - capped.layout.envelope_width_in;
        let dh = env_h - capped.layout.envelope_height_in;
        capped.frame_width_in -= dw;
        capped.frame_height_in -= dh;

        let lowest_shift = self.layout.lowest_opening_bottom_in() - capped.layout.lowest_opening_bottom_in();
        if let Some(plate) = capped.nameplate.as_mut() {
            plate.x_in -= dw / 2.0;
            plate.y_in -= lowest_shift;
        }
        capped
    }

    /// Inside of the moulding: mat plus reveal plus any plaque extension.
    pub fn mat_width_in(&self) -> f64 {
        self.frame_width_in - 2.0 * self.moulding_width_in
    }

    pub fn mat_height_in(&self) -> f64 {
        self.frame_height_in - 2.0 * self.moulding_width_in
    }

    /// Where the envelope starts, in mat coordinates.
    pub fn envelope_origin_in(&self) -> (f64, f64) {
        (self.borders.left_in + self.reveal_in, self.borders.top_in + self.reveal_in)
    }

    pub fn envelope_area_sq_in(&self) -> f64 {
        self.layout.envelope_width_in * self.layout.envelope_height_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borders::compute_borders;
    use crate::configuration::FrameConfiguration;
    use crate::layouts::{resolve, LayoutSpec};
    use crate::nameplate::NameplateConfig;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn aggregate(config: &FrameConfiguration, moulding_in: f64) -> AggregatedGeometry {
        let pricing = PricingConfig::default();
        let config = config.normalized();
        let layout = resolve(&config.layout, config.artwork_width_in, config.artwork_height_in).layout;
        let outcome = compute_borders(&layout, &config, &pricing);
        AggregatedGeometry::aggregate(layout, config.mat_type, &outcome, config.reveal_in(), moulding_in, &pricing)
    }

    fn double_mat() -> FrameConfiguration {
        FrameConfiguration {
            mat_type: MatType::Double,
            mat_border_in: 2.5,
            mat_reveal_in: 0.25,
            ..FrameConfiguration::new(11.0, 8.5, "black-classic")
        }
    }

    #[test]
    fn test_double_mat_example() {
        let geometry = aggregate(&double_mat(), 1.0);
        assert!((geometry.frame_width_in - 18.5).abs() < EPS);
        assert!((geometry.frame_height_in - 16.0).abs() < EPS);
        assert!(!geometry.oversize.fee_applies);
    }

    #[test]
    fn test_bottom_weighted_example() {
        let config = FrameConfiguration {
            bottom_weighted: true,
            ..double_mat()
        };
        let geometry = aggregate(&config, 1.0);
        assert!((geometry.frame_height_in - 16.5).abs() < EPS);
        assert!((geometry.frame_width_in - 18.5).abs() < EPS);
    }

    #[test]
    fn test_bottom_weighting_ignored_without_mat() {
        let base = FrameConfiguration {
            mat_type: MatType::None,
            ..FrameConfiguration::new(11.0, 8.5, "black-classic")
        };
        let weighted = FrameConfiguration {
            bottom_weighted: true,
            ..base.clone()
        };
        assert_eq!(aggregate(&base, 1.0).frame_height_in, aggregate(&weighted, 1.0).frame_height_in);
        assert_eq!(aggregate(&base, 1.0).frame_height_in, 10.5);
    }

    #[test]
    fn test_reveal_ignored_for_single() {
        let config = FrameConfiguration {
            mat_type: MatType::Single,
            ..double_mat()
        };
        let geometry = aggregate(&config, 1.0);
        assert_eq!(geometry.reveal_in, 0.0);
        assert!((geometry.frame_width_in - 18.0).abs() < EPS);
    }

    #[test]
    fn test_oversize_thresholds() {
        let policy = OversizePolicy::default();
        assert_eq!(OversizeStatus::check(40.0, 30.0, &policy), OversizeStatus::default());
        let soft = OversizeStatus::check(40.5, 30.0, &policy);
        assert!(soft.fee_applies && !soft.exceeds_hard_cap);
        let hard = OversizeStatus::check(20.0, 60.25, &policy);
        assert!(hard.fee_applies && hard.exceeds_hard_cap);
    }

    #[test]
    fn test_nameplate_placement_follows_opening() {
        let config = FrameConfiguration {
            nameplate: Some(NameplateConfig {
                enabled: true,
                ..Default::default()
            }),
            ..FrameConfiguration::new(16.0, 20.0, "black-classic")
        };
        let geometry = aggregate(&config, 1.0);
        let plate = geometry.nameplate.unwrap();
        // mat is 20 wide; opening ends at 2 + 20
        assert!((plate.x_in - (20.0 - 4.5) / 2.0).abs() < EPS);
        assert!((plate.y_in - 23.0).abs() < EPS);
        assert!(plate.y_in + plate.height_in <= geometry.mat_height_in());
    }

    #[test]
    fn test_fixed_layout_extension_in_frame_height() {
        let config = FrameConfiguration {
            layout: LayoutSpec::from_layout_id("ticket-trio", None).unwrap(),
            nameplate: Some(NameplateConfig {
                enabled: true,
                ..Default::default()
            }),
            ..FrameConfiguration::default()
        };
        let geometry = aggregate(&config, 1.0);
        assert!((geometry.frame_width_in - 26.0).abs() < EPS);
        assert!((geometry.frame_height_in - (8.0 + 0.875 + 2.0)).abs() < EPS);
    }

    #[test]
    fn test_thin_border_grows_diploma_envelope() {
        let config = FrameConfiguration {
            mat_border_in: 0.25,
            layout: LayoutSpec::from_layout_id("diploma-tassel-photo", Some("5x7")).unwrap(),
            ..FrameConfiguration::new(11.0, 8.5, "black-shadowbox")
        };
        let geometry = aggregate(&config, 1.0);
        let (_, origin_y) = geometry.envelope_origin_in();
        for opening in &geometry.layout.openings {
            assert!(origin_y + opening.y_in >= -EPS);
            assert!(origin_y + opening.bottom_in() <= geometry.mat_height_in() + EPS);
        }
        // 7" row envelope plus the 0.5" each side the border cannot hold
        assert!((geometry.layout.envelope_height_in - 8.0).abs() < EPS);
    }

    #[test]
    fn test_capped_for_preview() {
        // 60 x 70 artwork, 2" mat, 1" moulding: 66 x 76 finished
        let geometry = aggregate(&FrameConfiguration::new(60.0, 70.0, "black-classic"), 1.0);
        assert!(geometry.oversize.exceeds_hard_cap);
        let capped = geometry.capped_for_preview();
        assert!((capped.frame_width_in - 60.0).abs() < EPS);
        assert!((capped.frame_height_in - 60.0).abs() < EPS);
        assert_eq!(capped.borders, geometry.borders);
        let opening = &capped.layout.openings[0];
        assert!((opening.width_in - capped.layout.envelope_width_in).abs() < EPS);

        let small = aggregate(&FrameConfiguration::new(11.0, 14.0, "black-classic"), 1.0);
        assert_eq!(small.capped_for_preview(), small);
    }

    #[test]
    fn test_capped_nameplate_stays_below_opening() {
        let config = FrameConfiguration {
            nameplate: Some(NameplateConfig {
                enabled: true,
                ..Default::default()
            }),
            ..FrameConfiguration::new(50.0, 58.0, "black-classic")
        };
        let capped = aggregate(&config, 1.0).capped_for_preview();
        let plate = capped.nameplate.unwrap();
        let (_, origin_y) = capped.envelope_origin_in();
        assert!((plate.y_in - (origin_y + capped.layout.lowest_opening_bottom_in() + 1.0)).abs() < 1e-6);
        assert!((plate.x_in - (capped.mat_width_in() - plate.width_in) / 2.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_frame_monotonic_in_border(
            w in 4.0f64..40.0,
            h in 4.0f64..40.0,
            b in 0.0f64..6.0,
            step in 0.0f64..2.0,
            mat in prop::sample::select(vec![MatType::Single, MatType::Double]),
            weighted in any::<bool>(),
            plate in any::<bool>(),
        ) {
            let config = FrameConfiguration {
                mat_type: mat,
                mat_border_in: b,
                mat_reveal_in: 0.25,
                bottom_weighted: weighted,
                nameplate: Some(NameplateConfig { enabled: plate, ..Default::default() }),
                ..FrameConfiguration::new(w, h, "black-classic")
            };
            let larger = FrameConfiguration { mat_border_in: b + step, ..config.clone() };
            let small = aggregate(&config, 1.0);
            let big = aggregate(&larger, 1.0);
            prop_assert!(big.frame_width_in >= small.frame_width_in - EPS);
            prop_assert!(big.frame_height_in >= small.frame_height_in - EPS);
        }

        #[test]
        fn prop_bottom_weight_adds_half_inch(w in 4.0f64..40.0, h in 4.0f64..40.0, b in 0.0f64..6.0) {
            let config = FrameConfiguration { mat_border_in: b, ..FrameConfiguration::new(w, h, "black-classic") };
            let weighted = FrameConfiguration { bottom_weighted: true, ..config.clone() };
            let delta = aggregate(&weighted, 1.0).frame_height_in - aggregate(&config, 1.0).frame_height_in;
            prop_assert!((delta - 0.5).abs() < EPS);
        }

        #[test]
        fn prop_nameplate_sets_minimum_bottom(w in 4.0f64..30.0, h in 4.0f64..30.0, b in 0.0f64..6.0) {
            let config = FrameConfiguration {
                mat_border_in: b,
                nameplate: Some(NameplateConfig { enabled: true, ..Default::default() }),
                ..FrameConfiguration::new(w, h, "black-classic")
            };
            prop_assert!(aggregate(&config, 1.0).borders.bottom_in >= 3.75);
        }
    }
}
