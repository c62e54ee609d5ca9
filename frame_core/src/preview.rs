//! # Preview Projection
//!
//! Scales an [`AggregatedGeometry`] into a pixel container with one uniform
//! scale, so every band and opening on screen keeps the proportions of the
//! physical frame. The scale is the largest that fits both axes:
//!
//! ```text
//! scale = min(available width / frame width, available height / frame height)
//! ```
//!
//! Openings are placed from their real borders and reveal, so bottom
//! weighting and nameplate clearance show up on screen exactly as cut.
//! A frame beyond the hard cap is drawn at the cap instead, see
//! [`AggregatedGeometry::capped_for_preview`].

use serde::{Deserialize, Serialize};

use crate::geometry::AggregatedGeometry;
use crate::layouts::{OpeningKind, OpeningShape};
use crate::units::{Inches, Pixels};

/// Space available to draw the preview in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewContainer {
    pub width_px: f64,
    pub height_px: f64,
    /// Height the caller reserves even when `height_px` is smaller
    #[serde(default)]
    pub min_height_px: f64,
    /// Space kept clear on every side
    #[serde(default)]
    pub padding_px: f64,
}

impl PreviewContainer {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        PreviewContainer {
            width_px,
            height_px,
            min_height_px: 0.0,
            padding_px: 0.0,
        }
    }

    /// Drawable size after padding, at least one pixel each way.
    pub fn available(&self) -> (f64, f64) {
        let height = self.height_px.max(self.min_height_px);
        (clamp_px(self.width_px - 2.0 * self.padding_px), clamp_px(height - 2.0 * self.padding_px))
    }
}

fn clamp_px(v: f64) -> f64 {
    if v.is_finite() && v > 1.0 {
        v
    } else {
        1.0
    }
}

/// Axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PxRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strictly inside `outer` on every side.
    pub fn strictly_within(&self, outer: &PxRect) -> bool {
        self.x > outer.x && self.y > outer.y && self.right() < outer.right() && self.bottom() < outer.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewOpening {
    pub id: String,
    pub kind: OpeningKind,
    pub shape: OpeningShape,
    pub rect: PxRect,
    /// Window in the outer mat showing the inner mat, for a double mat
    pub reveal_rect: Option<PxRect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewLayout {
    /// Pixels per inch
    pub scale: f64,
    /// Outer edge of the moulding, centered in the container
    pub frame: PxRect,
    pub moulding_px: f64,
    /// Inside edge of the moulding
    pub mat: PxRect,
    pub openings: Vec<PreviewOpening>,
    pub nameplate: Option<PxRect>,
    /// The frame is beyond the hard cap and cannot be ordered at this size
    pub clamped_to_cap: bool,
}

pub fn project(geometry: &AggregatedGeometry, container: &PreviewContainer) -> PreviewLayout {
    let clamped_to_cap = geometry.oversize.exceeds_hard_cap;
    let capped;
    let geometry = if clamped_to_cap {
        capped = geometry.capped_for_preview();
        &capped
    } else {
        geometry
    };

    let (avail_w, avail_h) = container.available();
    let frame_w = geometry.frame_width_in.max(f64::EPSILON);
    let frame_h = geometry.frame_height_in.max(f64::EPSILON);
    let scale = (avail_w / frame_w).min(avail_h / frame_h);

    let px = |inches: f64| -> f64 {
        let Pixels(v) = Inches(inches).to_pixels(scale);
        v
    };

    let frame = PxRect {
        x: (container.width_px.max(avail_w) - px(frame_w)) / 2.0,
        y: (container.height_px.max(container.min_height_px).max(avail_h) - px(frame_h)) / 2.0,
        width: px(frame_w),
        height: px(frame_h),
    };

    let face = geometry.moulding_width_in;
    let mat = PxRect {
        x: frame.x + px(face),
        y: frame.y + px(face),
        width: px(geometry.mat_width_in()),
        height: px(geometry.mat_height_in()),
    };

    let (origin_x, origin_y) = geometry.envelope_origin_in();
    let reveal = geometry.reveal_in;
    let openings = geometry
        .layout
        .openings
        .iter()
        .map(|opening| {
            let rect = PxRect {
                x: mat.x + px(origin_x + opening.x_in),
                y: mat.y + px(origin_y + opening.y_in),
                width: px(opening.width_in),
                height: px(opening.height_in),
            };
            let reveal_rect = (reveal > 0.0).then(|| PxRect {
                x: rect.x - px(reveal),
                y: rect.y - px(reveal),
                width: rect.width + px(2.0 * reveal),
                height: rect.height + px(2.0 * reveal),
            });
            PreviewOpening {
                id: opening.id.clone(),
                kind: opening.kind,
                shape: opening.shape,
                rect,
                reveal_rect,
            }
        })
        .collect();

    let nameplate = geometry.nameplate.map(|plate| PxRect {
        x: mat.x + px(plate.x_in),
        y: mat.y + px(plate.y_in),
        width: px(plate.width_in),
        height: px(plate.height_in),
    });

    PreviewLayout {
        scale,
        frame,
        moulding_px: px(face),
        mat,
        openings,
        nameplate,
        clamped_to_cap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borders::compute_borders;
    use crate::catalog::PricingConfig;
    use crate::configuration::{FrameConfiguration, MatType};
    use crate::layouts::{resolve, LayoutSpec};
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn geometry(config: &FrameConfiguration, moulding_in: f64) -> AggregatedGeometry {
        let pricing = PricingConfig::default();
        let config = config.normalized();
        let layout = resolve(&config.layout, config.artwork_width_in, config.artwork_height_in).layout;
        let outcome = compute_borders(&layout, &config, &pricing);
        AggregatedGeometry::aggregate(layout, config.mat_type, &outcome, config.reveal_in(), moulding_in, &pricing)
    }

    #[test]
    fn test_scale_fits_limiting_axis() {
        // 18.5 x 16 frame
        let config = FrameConfiguration {
            mat_type: MatType::Double,
            mat_border_in: 2.5,
            mat_reveal_in: 0.25,
            ..FrameConfiguration::new(11.0, 8.5, "black-classic")
        };
        let geometry = geometry(&config, 1.0);
        let preview = project(&geometry, &PreviewContainer::new(370.0, 800.0));
        assert!((preview.scale - 20.0).abs() < EPS);
        assert!((preview.frame.height - 320.0).abs() < EPS);
        assert!((preview.frame.y - 240.0).abs() < EPS);
        assert_eq!(preview.frame.x, 0.0);
    }

    #[test]
    fn test_opening_offset_uses_real_borders() {
        let config = FrameConfiguration {
            mat_type: MatType::Double,
            mat_border_in: 2.0,
            mat_reveal_in: 0.25,
            bottom_weighted: true,
            ..FrameConfiguration::new(10.0, 10.0, "black-classic")
        };
        let geometry = geometry(&config, 1.0);
        let preview = project(&geometry, &PreviewContainer::new(1000.0, 1000.0));
        let s = preview.scale;
        let opening = &preview.openings[0];
        assert!((opening.rect.x - (preview.frame.x + (1.0 + 2.0 + 0.25) * s)).abs() < EPS);
        assert!((opening.rect.y - (preview.frame.y + (1.0 + 2.0 + 0.25) * s)).abs() < EPS);
        // more mat below than above
        let below = preview.mat.bottom() - opening.rect.bottom();
        let above = opening.rect.y - preview.mat.y;
        assert!((below - above - 0.5 * s).abs() < 1e-6);
        let reveal = opening.reveal_rect.unwrap();
        assert!((opening.rect.x - reveal.x - 0.25 * s).abs() < EPS);
    }

    #[test]
    fn test_degenerate_container() {
        let geometry = geometry(&FrameConfiguration::default(), 1.0);
        let preview = project(&geometry, &PreviewContainer::new(0.0, -50.0));
        assert!(preview.scale.is_finite());
        assert!(preview.scale > 0.0);
    }

    #[test]
    fn test_min_height_and_padding() {
        let geometry = geometry(&FrameConfiguration::new(10.0, 10.0, "black-classic"), 1.0);
        let container = PreviewContainer {
            width_px: 500.0,
            height_px: 100.0,
            min_height_px: 500.0,
            padding_px: 10.0,
        };
        let preview = project(&geometry, &container);
        // 16" square frame in 480 x 480
        assert!((preview.scale - 30.0).abs() < EPS);
        assert!((preview.frame.x - 10.0).abs() < EPS);
    }

    #[test]
    fn test_nameplate_projected() {
        let config = FrameConfiguration {
            nameplate: Some(crate::nameplate::NameplateConfig {
                enabled: true,
                ..Default::default()
            }),
            ..FrameConfiguration::new(11.0, 14.0, "black-classic")
        };
        let preview = project(&geometry(&config, 1.0), &PreviewContainer::new(600.0, 600.0));
        let plate = preview.nameplate.unwrap();
        assert!(plate.strictly_within(&preview.mat));
        assert!(plate.y > preview.openings[0].rect.bottom());
    }

    fn within(inner: &PxRect, outer: &PxRect) -> bool {
        let tol = 1e-6;
        inner.x >= outer.x - tol
            && inner.y >= outer.y - tol
            && inner.right() <= outer.right() + tol
            && inner.bottom() <= outer.bottom() + tol
    }

    #[test]
    fn test_over_cap_drawn_at_cap() {
        // 66 x 76 finished, drawn as 60 x 60
        let geometry = geometry(&FrameConfiguration::new(60.0, 70.0, "black-classic"), 1.0);
        let preview = project(&geometry, &PreviewContainer::new(600.0, 600.0));
        assert!(preview.clamped_to_cap);
        assert!((preview.scale - 10.0).abs() < 1e-9);
        assert!((preview.frame.width - 600.0).abs() < 1e-6);
        assert!((preview.frame.height - 600.0).abs() < 1e-6);
        assert!(within(&preview.openings[0].rect, &preview.mat));
        // real borders are kept
        assert!((preview.openings[0].rect.x - preview.mat.x - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_thin_border_three_openings_stay_on_mat() {
        let config = FrameConfiguration {
            mat_border_in: 0.0,
            layout: LayoutSpec::from_layout_id("diploma-tassel-photo", Some("8x10")).unwrap(),
            ..FrameConfiguration::new(14.0, 11.0, "black-shadowbox")
        };
        let preview = project(&geometry(&config, 1.0), &PreviewContainer::new(800.0, 600.0));
        for opening in &preview.openings {
            assert!(within(&opening.rect, &preview.mat), "{}", opening.id);
        }
    }

    proptest! {
        #[test]
        fn prop_every_layout_on_mat(
            layout in prop::sample::select(LayoutSpec::all_layout_ids()),
            w in 4.0f64..30.0,
            h in 4.0f64..30.0,
            border in 0.0f64..4.0,
            moulding in 0.5f64..3.0,
            mat in prop::sample::select(vec![MatType::None, MatType::Single, MatType::Double]),
            weighted in any::<bool>(),
            plate in any::<bool>(),
        ) {
            let config = FrameConfiguration {
                mat_type: mat,
                mat_border_in: border,
                mat_reveal_in: 0.25,
                bottom_weighted: weighted,
                nameplate: Some(crate::nameplate::NameplateConfig { enabled: plate, ..Default::default() }),
                layout: LayoutSpec::from_layout_id(&layout, None).unwrap(),
                ..FrameConfiguration::new(w, h, "black-shadowbox")
            };
            let preview = project(&geometry(&config, moulding), &PreviewContainer::new(900.0, 700.0));
            for opening in &preview.openings {
                prop_assert!(within(&opening.rect, &preview.mat), "{} {:?}", opening.id, opening.rect);
                prop_assert!(opening.rect.strictly_within(&preview.frame));
                if let Some(reveal) = opening.reveal_rect {
                    prop_assert!(within(&reveal, &preview.mat), "{} reveal {:?}", opening.id, reveal);
                }
            }
        }

        #[test]
        fn prop_scale_and_containment(
            w in 4.0f64..48.0,
            h in 4.0f64..48.0,
            border in 0.0f64..5.0,
            moulding in 0.5f64..3.0,
            mat in prop::sample::select(vec![MatType::None, MatType::Single, MatType::Double]),
            weighted in any::<bool>(),
            cw in 50.0f64..2000.0,
            ch in 50.0f64..2000.0,
        ) {
            let config = FrameConfiguration {
                mat_type: mat,
                mat_border_in: border,
                mat_reveal_in: 0.25,
                bottom_weighted: weighted,
                ..FrameConfiguration::new(w, h, "black-classic")
            };
            let geometry = geometry(&config, moulding);
            let preview = project(&geometry, &PreviewContainer::new(cw, ch));

            let shown = geometry.capped_for_preview();
            prop_assert!(shown.frame_width_in.max(shown.frame_height_in) <= 60.0 + 1e-9);
            let expected = (cw / shown.frame_width_in).min(ch / shown.frame_height_in);
            prop_assert!((preview.scale - expected).abs() < 1e-9);
            prop_assert!(preview.frame.width <= cw + 1e-6);
            prop_assert!(preview.frame.height <= ch + 1e-6);
            for opening in &preview.openings {
                prop_assert!(opening.rect.strictly_within(&preview.frame));
            }
        }
    }
}
