//! # Quote Engine
//!
//! One stateless pass from a configuration and a catalog to everything the
//! storefront shows: geometry, price, blocking validation messages and the
//! adjustments made along the way.
//!
//! ```text
//! configuration ──▶ layout ──▶ borders ──▶ geometry ──┬─▶ pricing
//!                                                     └─▶ preview (caller)
//! ```
//!
//! Catalog selections that cannot be used at this size, depth or layout are
//! swapped for the first one that can, with a [`Notice`]. Conditions the
//! customer must fix come back as [`ValidationMessage`]s, never as errors;
//! errors are reserved for ids the catalog or layout tables do not know.
//!
//! A frame beyond the hard cap keeps its geometry but prices as zero-cost
//! placeholders, since the order can only be quoted by hand.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::catalog::default_catalog;
//! use frame_core::configuration::FrameConfiguration;
//! use frame_core::engine::compute;
//!
//! let catalog = default_catalog().unwrap();
//! let quote = compute(&FrameConfiguration::new(11.0, 14.0, "black-classic"), catalog).unwrap();
//! assert!(quote.is_orderable());
//! assert!(quote.pricing.total.value() > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::borders::compute_borders;
use crate::catalog::{Catalog, FrameStyle, GlassType, Mat};
use crate::configuration::{FrameConfiguration, MatType};
use crate::dimensions::{format_dimension, validate_artwork_size};
use crate::errors::{FrameError, FrameResult};
use crate::geometry::AggregatedGeometry;
use crate::layouts::{self, LayoutFamily};
use crate::notices::{Notice, NoticeKind, ValidationKind, ValidationMessage};
use crate::pricing::{price, PricingBreakdown, PricingInputs};

/// Catalog items actually used, after substitutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selections {
    pub frame_style_id: String,
    pub mat_id: Option<String>,
    pub inner_mat_id: Option<String>,
    pub glazing_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub geometry: AggregatedGeometry,
    pub pricing: PricingBreakdown,
    pub selections: Selections,
    /// Blocking problems; any entry prevents checkout
    pub validation: Vec<ValidationMessage>,
    /// Adjustments made on the customer's behalf
    pub notices: Vec<Notice>,
}

impl Quote {
    pub fn is_orderable(&self) -> bool {
        self.pricing.priceable && self.validation.is_empty()
    }

    pub fn exceeds_hard_cap(&self) -> bool {
        self.validation.iter().any(|v| v.kind == ValidationKind::OversizeHardCap)
    }
}

pub fn compute(config: &FrameConfiguration, catalog: &Catalog) -> FrameResult<Quote> {
    let config = config.normalized();
    let pricing = &catalog.pricing;
    let mut validation = Vec::new();

    let resolution = layouts::resolve(&config.layout, config.artwork_width_in, config.artwork_height_in);
    let mut notices = resolution.notices;
    let layout = resolution.layout;

    // Artwork size drives user-sized layouts; wedding cards have their own presets
    let mut priceable = true;
    if config.layout.uses_artwork_size() && layout.family != LayoutFamily::Wedding {
        let check = validate_artwork_size(config.artwork_width_in, config.artwork_height_in, pricing.min_artwork_in);
        if let Some(message) = check.message {
            validation.push(ValidationMessage::invalid("artwork_size", message));
            priceable = false;
        }
    }

    let style = choose_style(catalog, &config.frame_style_id, layout.required_depth_in, &mut notices)?;
    let glazing = choose_glazing(catalog, &config, &mut notices)?;

    if let Some(nameplate) = config.nameplate.as_ref().filter(|n| n.enabled) {
        validation.extend(nameplate.validate());
    }

    let outcome = compute_borders(&layout, &config, pricing);
    if config.nameplate_enabled() && !outcome.nameplate_active {
        notices.push(Notice::new(
            NoticeKind::Substitution,
            "nameplate",
            "A nameplate needs a mat to mount on and was left off",
        ));
    }
    if let Some(change) = outcome.mount_change {
        notices.push(change.to_notice());
    }

    let geometry = AggregatedGeometry::aggregate(
        layout,
        config.mat_type,
        &outcome,
        config.reveal_in(),
        style.moulding_width_in,
        pricing,
    );
    debug!(
        layout = %geometry.layout.layout_id,
        frame_width_in = geometry.frame_width_in,
        frame_height_in = geometry.frame_height_in,
        plaque_extension_in = geometry.plaque_extension_in,
        "aggregated frame geometry"
    );

    let mut sheet = MatRequest {
        catalog,
        width_in: geometry.mat_width_in(),
        height_in: geometry.mat_height_in(),
        notices: &mut notices,
        validation: &mut validation,
    };
    let (mat, inner_mat) = match config.mat_type {
        MatType::None => (None, None),
        MatType::Single => (sheet.choose(config.mat_color_id.as_deref(), "mat_color_id")?, None),
        MatType::Double => {
            let outer = sheet.choose(config.mat_color_id.as_deref(), "mat_color_id")?;
            let inner_id = config.mat_inner_color_id.as_deref().or(outer.map(|m| m.id.as_str()));
            let inner = sheet.choose(inner_id, "mat_inner_color_id")?;
            (outer, inner)
        }
    };

    if geometry.oversize.exceeds_hard_cap {
        let cap = format_dimension(pricing.oversize.hard_cap_in);
        validation.push(ValidationMessage::hard_cap(format!(
            "Finished frame is {}\u{d7}{}\", larger than our {cap}\" maximum. Please contact us for custom quote.",
            format_dimension(geometry.frame_width_in),
            format_dimension(geometry.frame_height_in)
        )));
    }

    let breakdown = if priceable && !geometry.oversize.exceeds_hard_cap {
        price(&PricingInputs {
            geometry: &geometry,
            config: &config,
            style,
            mat,
            inner_mat,
            glazing,
            pricing,
        })
    } else {
        PricingBreakdown::not_priceable()
    };

    Ok(Quote {
        selections: Selections {
            frame_style_id: style.id.clone(),
            mat_id: mat.map(|m| m.id.clone()),
            inner_mat_id: inner_mat.map(|m| m.id.clone()),
            glazing_id: glazing.id.clone(),
        },
        geometry,
        pricing: breakdown,
        validation,
        notices,
    })
}

/// Requested style, or the first deep enough shadowbox when the layout
/// needs depth the requested style lacks.
fn choose_style<'a>(
    catalog: &'a Catalog,
    style_id: &str,
    required_depth_in: Option<f64>,
    notices: &mut Vec<Notice>,
) -> FrameResult<&'a FrameStyle> {
    let requested = catalog.frame_style(style_id)?;
    let Some(depth) = required_depth_in else {
        return Ok(requested);
    };
    if requested.fits_depth(depth) {
        return Ok(requested);
    }
    let substitute = catalog.first_style_with_depth(depth).ok_or_else(|| {
        FrameError::invalid_input(
            "frame_style_id",
            style_id,
            format!("no shadowbox in the catalog is {}\" deep", format_dimension(depth)),
        )
    })?;
    warn!(requested = style_id, substitute = %substitute.id, depth, "frame style too shallow");
    notices.push(Notice::new(
        NoticeKind::Substitution,
        "frame_style_id",
        format!(
            "{} is not deep enough for this layout; switched to {}",
            requested.name, substitute.name
        ),
    ));
    Ok(substitute)
}

/// Requested glazing, or the first glazed option when the layout must not
/// go out with backing only.
fn choose_glazing<'a>(
    catalog: &'a Catalog,
    config: &FrameConfiguration,
    notices: &mut Vec<Notice>,
) -> FrameResult<&'a GlassType> {
    let requested = catalog.glazing(&config.glazing_id)?;
    if !requested.backing_only || config.layout.allows_backing_only() {
        return Ok(requested);
    }
    let substitute = catalog.first_glazed().ok_or_else(|| {
        FrameError::invalid_input(
            "glazing_id",
            &config.glazing_id,
            "this layout needs glazing and the catalog has none",
        )
    })?;
    warn!(
        requested = %requested.id,
        substitute = %substitute.id,
        layout = %config.layout.layout_id(),
        "backing only not offered for layout"
    );
    notices.push(Notice::new(
        NoticeKind::Substitution,
        "glazing_id",
        format!(
            "{} is not offered for this layout; switched to {}",
            requested.name, substitute.name
        ),
    ));
    Ok(substitute)
}

/// Mat lookup at one board size, recording substitutions.
struct MatRequest<'a, 'q> {
    catalog: &'a Catalog,
    width_in: f64,
    height_in: f64,
    notices: &'q mut Vec<Notice>,
    validation: &'q mut Vec<ValidationMessage>,
}

impl<'a> MatRequest<'a, '_> {
    /// Requested mat, or the first mat stocked at this size.
    fn choose(&mut self, mat_id: Option<&str>, field: &str) -> FrameResult<Option<&'a Mat>> {
        let catalog = self.catalog;
        let size = format!(
            "{}\u{d7}{}\"",
            format_dimension(self.width_in),
            format_dimension(self.height_in)
        );

        let requested = mat_id.map(|id| catalog.mat(id)).transpose()?;
        if let Some(mat) = requested.filter(|m| m.available_for(self.width_in, self.height_in)) {
            return Ok(Some(mat));
        }

        let Some(substitute) = catalog.first_mat_available_for(self.width_in, self.height_in) else {
            self.validation
                .push(ValidationMessage::invalid(field, format!("No mat board is large enough for {size}")));
            return Ok(None);
        };

        if let Some(mat) = requested {
            warn!(requested = %mat.id, substitute = %substitute.id, size = %size, "mat not stocked at size");
            self.notices.push(Notice::new(
                NoticeKind::Substitution,
                field,
                format!("{} is not available at {size}; switched to {}", mat.name, substitute.name),
            ));
        }
        Ok(Some(substitute))
    }
}
