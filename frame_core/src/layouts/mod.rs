//! # Opening Layouts
//!
//! Every product line (plain frames, diplomas, wedding invitations, vinyl
//! records, CDs, ticket stubs) describes its mat openings through one
//! tagged [`LayoutSpec`]. Resolving a spec always yields the same
//! normalized [`OpeningLayout`]: named rectangles in inches relative to
//! the top-left of the envelope, plus the envelope size that downstream
//! border and pricing stages treat as "the artwork".
//!
//! ## Pattern
//!
//! Each family lives in its own submodule exposing a layout-id enum, its
//! size tables, and a crate-private `resolve` that builds the openings.
//!
//! ```rust
//! use frame_core::layouts::{resolve, LayoutSpec};
//!
//! let spec = LayoutSpec::from_layout_id("diploma-photo", Some("8x10")).unwrap();
//! let resolved = resolve(&spec, 16.0, 20.0);
//! assert_eq!(resolved.layout.envelope_width_in, 26.0);
//! assert_eq!(resolved.layout.envelope_height_in, 20.0);
//! ```
//!
//! ## Families
//!
//! - [`diploma`] - diploma with optional tassel and photo openings
//! - [`wedding`] - invitation with optional photo or RSVP card
//! - [`record`] - vinyl and CD cover-plus-disc displays
//! - [`ticket`] - fixed ticket, photo and poster arrangements

pub mod diploma;
pub mod record;
pub mod ticket;
pub mod wedding;

use serde::{Deserialize, Serialize};

pub use diploma::DiplomaLayout;
pub use record::{CdLayout, RecordLayout};
pub use ticket::TicketArrangement;
pub use wedding::{CustomSize, WeddingLayout};

use crate::borders::MatBorders;
use crate::errors::{FrameError, FrameResult};
use crate::nameplate::NameplateMount;
use crate::notices::Notice;

/// Product line a layout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutFamily {
    Single,
    Diploma,
    Wedding,
    Record,
    Cd,
    TicketStub,
}

/// What an opening holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKind {
    Primary,
    Photo,
    Tassel,
    Secondary,
    Disc,
    Ticket,
    Poster,
}

/// Cut shape. Circles are laid out by their bounding square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningShape {
    #[default]
    Rect,
    Circle,
}

/// One mat opening, in inches from the envelope's top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: String,
    pub kind: OpeningKind,
    #[serde(default)]
    pub shape: OpeningShape,
    pub x_in: f64,
    pub y_in: f64,
    pub width_in: f64,
    pub height_in: f64,
}

impl Opening {
    pub fn rect(id: impl Into<String>, kind: OpeningKind, x_in: f64, y_in: f64, width_in: f64, height_in: f64) -> Self {
        Opening {
            id: id.into(),
            kind,
            shape: OpeningShape::Rect,
            x_in,
            y_in,
            width_in,
            height_in,
        }
    }

    /// Circle with the given center and diameter.
    pub fn circle(id: impl Into<String>, kind: OpeningKind, center_x_in: f64, center_y_in: f64, diameter_in: f64) -> Self {
        Opening {
            id: id.into(),
            kind,
            shape: OpeningShape::Circle,
            x_in: center_x_in - diameter_in / 2.0,
            y_in: center_y_in - diameter_in / 2.0,
            width_in: diameter_in,
            height_in: diameter_in,
        }
    }

    pub fn right_in(&self) -> f64 {
        self.x_in + self.width_in
    }

    pub fn bottom_in(&self) -> f64 {
        self.y_in + self.height_in
    }
}

/// How the mat border around the envelope is decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum BorderRule {
    /// Customer's slider value, with bottom weighting and nameplate minimum
    UserAdjustable,
    /// Designed into the layout; the slider does not apply
    Fixed { border_in: f64 },
}

/// Normalized openings for any layout family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningLayout {
    pub layout_id: String,
    pub family: LayoutFamily,
    pub openings: Vec<Opening>,
    pub envelope_width_in: f64,
    pub envelope_height_in: f64,
    pub border_rule: BorderRule,
    pub nameplate_mount: NameplateMount,
    /// Shadowbox depth the contents need, if any
    pub required_depth_in: Option<f64>,
    /// Flat price replacing perimeter frame pricing
    pub base_price: Option<f64>,
}

impl OpeningLayout {
    /// Bottom edge of the lowest opening (envelope coordinates).
    pub fn lowest_opening_bottom_in(&self) -> f64 {
        self.openings.iter().map(Opening::bottom_in).fold(0.0, f64::max)
    }

    pub fn count(&self, kind: OpeningKind) -> usize {
        self.openings.iter().filter(|o| o.kind == kind).count()
    }

    pub fn has(&self, kind: OpeningKind) -> bool {
        self.count(kind) > 0
    }

    pub fn primary(&self) -> Option<&Opening> {
        self.openings.first()
    }

    /// Grow the envelope until no opening reaches past the given borders.
    ///
    /// A reduced row envelope lets openings overhang into the mat border;
    /// with a thin border the overhang would cut past the mat edge.
    pub(crate) fn contain_within(&mut self, borders: &MatBorders) {
        let left = self.openings.iter().map(|o| o.x_in).fold(0.0, f64::min);
        let top = self.openings.iter().map(|o| o.y_in).fold(0.0, f64::min);
        let right = self.openings.iter().map(Opening::right_in).fold(0.0, f64::max);
        let bottom = self.lowest_opening_bottom_in();

        let grow_left = (-left - borders.left_in).max(0.0);
        let grow_top = (-top - borders.top_in).max(0.0);
        let grow_right = (right - self.envelope_width_in - borders.right_in).max(0.0);
        let grow_bottom = (bottom - self.envelope_height_in - borders.bottom_in).max(0.0);
        if grow_left + grow_top + grow_right + grow_bottom == 0.0 {
            return;
        }

        for opening in &mut self.openings {
            opening.x_in += grow_left;
            opening.y_in += grow_top;
        }
        self.envelope_width_in += grow_left + grow_right;
        self.envelope_height_in += grow_top + grow_bottom;
    }
}

/// Single-opening product variants. They differ only in how a nameplate
/// is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingleVariant {
    #[default]
    Standard,
    Certificate,
    Signature,
}

impl SingleVariant {
    pub const ALL: [SingleVariant; 3] = [SingleVariant::Standard, SingleVariant::Certificate, SingleVariant::Signature];

    pub fn id(&self) -> &'static str {
        match self {
            SingleVariant::Standard => "single",
            SingleVariant::Certificate => "certificate",
            SingleVariant::Signature => "signature",
        }
    }

    pub fn mount(&self) -> NameplateMount {
        match self {
            SingleVariant::Standard => NameplateMount::UserOverride,
            SingleVariant::Certificate => NameplateMount::Stretched,
            SingleVariant::Signature => NameplateMount::FixedDistance,
        }
    }
}

/// Layout selector plus its parameters.
///
/// Size variants are kept as catalog ids so an id the variant does not
/// offer can fall back to the default with a notice instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum LayoutSpec {
    Single {
        #[serde(default)]
        variant: SingleVariant,
    },
    Diploma {
        layout: DiplomaLayout,
        #[serde(default)]
        photo_size: Option<String>,
    },
    Wedding {
        layout: WeddingLayout,
        #[serde(default)]
        secondary_size: Option<String>,
        #[serde(default)]
        custom_secondary: Option<CustomSize>,
    },
    Record {
        layout: RecordLayout,
    },
    Cd {
        layout: CdLayout,
    },
    TicketStub {
        arrangement: TicketArrangement,
        #[serde(default)]
        variant: Option<String>,
    },
}

impl Default for LayoutSpec {
    fn default() -> Self {
        LayoutSpec::Single {
            variant: SingleVariant::Standard,
        }
    }
}

impl LayoutSpec {
    pub fn family(&self) -> LayoutFamily {
        match self {
            LayoutSpec::Single { .. } => LayoutFamily::Single,
            LayoutSpec::Diploma { .. } => LayoutFamily::Diploma,
            LayoutSpec::Wedding { .. } => LayoutFamily::Wedding,
            LayoutSpec::Record { .. } => LayoutFamily::Record,
            LayoutSpec::Cd { .. } => LayoutFamily::Cd,
            LayoutSpec::TicketStub { .. } => LayoutFamily::TicketStub,
        }
    }

    /// Canonical layout id as used in share links and cart attributes.
    pub fn layout_id(&self) -> String {
        match self {
            LayoutSpec::Single { variant } => variant.id().to_string(),
            LayoutSpec::Diploma { layout, .. } => layout.id().to_string(),
            LayoutSpec::Wedding { layout, .. } => layout.id().to_string(),
            LayoutSpec::Record { layout } => layout.id().to_string(),
            LayoutSpec::Cd { layout } => layout.id().to_string(),
            LayoutSpec::TicketStub { arrangement, variant } => arrangement.layout_id(variant.as_deref()),
        }
    }

    /// Size variant carried by the spec, if any.
    pub fn size_variant(&self) -> Option<&str> {
        match self {
            LayoutSpec::Diploma { photo_size, .. } => photo_size.as_deref(),
            LayoutSpec::Wedding { secondary_size, .. } => secondary_size.as_deref(),
            LayoutSpec::TicketStub { variant, .. } => variant.as_deref(),
            _ => None,
        }
    }

    /// Whether the customer's artwork size drives the geometry. Fixed
    /// layouts define their own board size.
    pub fn uses_artwork_size(&self) -> bool {
        matches!(
            self,
            LayoutSpec::Single { .. } | LayoutSpec::Diploma { .. } | LayoutSpec::Wedding { .. }
        )
    }

    /// Whether the layout may be framed with backing only. Diplomas and
    /// certificates are always glazed.
    pub fn allows_backing_only(&self) -> bool {
        !matches!(
            self,
            LayoutSpec::Diploma { .. }
                | LayoutSpec::Single {
                    variant: SingleVariant::Certificate
                }
        )
    }

    /// Build a spec from a layout id and optional size variant.
    ///
    /// An id no family recognizes is [`FrameError::UnknownLayout`]; a size
    /// variant is accepted as-is and checked when the layout is resolved.
    pub fn from_layout_id(layout_id: &str, size: Option<&str>) -> FrameResult<Self> {
        let size = size.filter(|s| !s.trim().is_empty()).map(str::to_string);

        if let Some(variant) = SingleVariant::ALL.into_iter().find(|v| v.id() == layout_id) {
            return Ok(LayoutSpec::Single { variant });
        }
        if let Some(layout) = DiplomaLayout::from_id(layout_id) {
            return Ok(LayoutSpec::Diploma { layout, photo_size: size });
        }
        if let Some(layout) = WeddingLayout::from_id(layout_id) {
            return Ok(LayoutSpec::Wedding {
                layout,
                secondary_size: size,
                custom_secondary: None,
            });
        }
        if let Some(layout) = RecordLayout::from_id(layout_id) {
            return Ok(LayoutSpec::Record { layout });
        }
        if let Some(layout) = CdLayout::from_id(layout_id) {
            return Ok(LayoutSpec::Cd { layout });
        }
        if let Some((arrangement, variant)) = TicketArrangement::parse_layout_id(layout_id) {
            return Ok(LayoutSpec::TicketStub {
                arrangement,
                variant: variant.map(str::to_string).or(size),
            });
        }
        Err(FrameError::unknown_layout(layout_id))
    }

    /// Every layout id the engine accepts, for listings.
    pub fn all_layout_ids() -> Vec<String> {
        let mut ids: Vec<String> = SingleVariant::ALL.iter().map(|v| v.id().to_string()).collect();
        ids.extend(DiplomaLayout::ALL.iter().map(|l| l.id().to_string()));
        ids.extend(WeddingLayout::ALL.iter().map(|l| l.id().to_string()));
        ids.extend(RecordLayout::ALL.iter().map(|l| l.id().to_string()));
        ids.extend(CdLayout::ALL.iter().map(|l| l.id().to_string()));
        ids.extend(ticket::all_layout_ids());
        ids
    }
}

/// Resolved layout plus any size fallbacks applied on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResolution {
    pub layout: OpeningLayout,
    pub notices: Vec<Notice>,
}

/// Turn a layout spec into openings.
///
/// `artwork_width_in` / `artwork_height_in` size the primary opening of
/// user-sized families and are ignored by fixed layouts.
pub fn resolve(spec: &LayoutSpec, artwork_width_in: f64, artwork_height_in: f64) -> LayoutResolution {
    let mut notices = Vec::new();
    let layout = match spec {
        LayoutSpec::Single { variant } => single(*variant, artwork_width_in, artwork_height_in),
        LayoutSpec::Diploma { layout, photo_size } => {
            diploma::resolve(*layout, photo_size.as_deref(), artwork_width_in, artwork_height_in, &mut notices)
        }
        LayoutSpec::Wedding {
            layout,
            secondary_size,
            custom_secondary,
        } => wedding::resolve(
            *layout,
            secondary_size.as_deref(),
            custom_secondary.as_ref(),
            artwork_width_in,
            artwork_height_in,
            &mut notices,
        ),
        LayoutSpec::Record { layout } => record::resolve_record(*layout),
        LayoutSpec::Cd { layout } => record::resolve_cd(*layout),
        LayoutSpec::TicketStub { arrangement, variant } => {
            ticket::resolve(*arrangement, variant.as_deref(), &mut notices)
        }
    };
    LayoutResolution { layout, notices }
}

fn single(variant: SingleVariant, width_in: f64, height_in: f64) -> OpeningLayout {
    OpeningLayout {
        layout_id: variant.id().to_string(),
        family: LayoutFamily::Single,
        openings: vec![Opening::rect("primary", OpeningKind::Primary, 0.0, 0.0, width_in, height_in)],
        envelope_width_in: width_in,
        envelope_height_in: height_in,
        border_rule: BorderRule::UserAdjustable,
        nameplate_mount: variant.mount(),
        required_depth_in: None,
        base_price: None,
    }
}

// ============================================================================
// Row placement shared by the diploma and wedding families
// ============================================================================

/// Opening to place in a left-to-right row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowItem {
    pub id: &'static str,
    pub kind: OpeningKind,
    pub width_in: f64,
    pub height_in: f64,
}

/// Lay openings out left to right, each `(gap, item)` following the one
/// before. Every opening is centered on the primary opening's vertical
/// midpoint, then the row is shifted so the envelope starts at y = 0.
///
/// `height_reduction_in` trims the envelope height; the row stays centered
/// in the reduced envelope and the overflow is split into the top and
/// bottom borders.
///
/// Returns the openings and the envelope width and height.
pub(crate) fn place_row(primary: RowItem, rest: &[(f64, RowItem)], height_reduction_in: f64) -> (Vec<Opening>, f64, f64) {
    let midpoint = primary.height_in / 2.0;
    let mut openings = vec![Opening::rect(
        primary.id,
        primary.kind,
        0.0,
        0.0,
        primary.width_in,
        primary.height_in,
    )];
    let mut x = primary.width_in;

    for (gap, item) in rest {
        x += gap;
        openings.push(Opening::rect(
            item.id,
            item.kind,
            x,
            midpoint - item.height_in / 2.0,
            item.width_in,
            item.height_in,
        ));
        x += item.width_in;
    }

    let top = openings.iter().map(|o| o.y_in).fold(f64::INFINITY, f64::min);
    let bottom = openings.iter().map(Opening::bottom_in).fold(f64::NEG_INFINITY, f64::max);
    let content_height = bottom - top;
    let reduction = height_reduction_in.clamp(0.0, content_height);
    let shift = -top - reduction / 2.0;
    for opening in &mut openings {
        opening.y_in += shift;
    }

    (openings, x, content_height - reduction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &'static str, w: f64, h: f64) -> RowItem {
        RowItem {
            id,
            kind: OpeningKind::Secondary,
            width_in: w,
            height_in: h,
        }
    }

    #[test]
    fn test_row_centers_on_primary_midpoint() {
        let (openings, width, height) = place_row(item("a", 10.0, 8.0), &[(1.0, item("b", 4.0, 12.0))], 0.0);
        assert_eq!(width, 15.0);
        assert_eq!(height, 12.0);
        // primary pushed down so the taller secondary starts at 0
        assert_eq!(openings[0].y_in, 2.0);
        assert_eq!(openings[1].y_in, 0.0);
        let primary_mid = openings[0].y_in + 4.0;
        let secondary_mid = openings[1].y_in + 6.0;
        assert_eq!(primary_mid, secondary_mid);
    }

    #[test]
    fn test_row_height_reduction_centers_content() {
        let (openings, _, height) = place_row(item("a", 11.0, 8.5), &[(1.0, item("b", 2.0, 6.0))], 1.5);
        assert_eq!(height, 7.0);
        assert_eq!(openings[0].y_in, -0.75);
    }

    #[test]
    fn test_contain_within_thin_border() {
        let spec = LayoutSpec::from_layout_id("diploma-tassel-photo", Some("5x7")).unwrap();
        let mut layout = resolve(&spec, 11.0, 8.5).layout;
        let height = layout.envelope_height_in;
        assert!(layout.openings[0].y_in < 0.0);

        // a 2" border already holds the overhang
        let mut roomy = layout.clone();
        roomy.contain_within(&MatBorders::uniform(2.0));
        assert_eq!(roomy, layout);

        layout.contain_within(&MatBorders::uniform(0.25));
        assert!(layout.openings.iter().all(|o| o.y_in >= -0.25));
        assert!(layout.lowest_opening_bottom_in() <= layout.envelope_height_in + 0.25 + 1e-9);
        assert!((layout.envelope_height_in - (height + 2.0 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_backing_only_rule() {
        assert!(LayoutSpec::default().allows_backing_only());
        assert!(LayoutSpec::from_layout_id("single-ticket", None).unwrap().allows_backing_only());
        assert!(!LayoutSpec::from_layout_id("diploma-tassel-photo", None).unwrap().allows_backing_only());
        assert!(!LayoutSpec::from_layout_id("certificate", None).unwrap().allows_backing_only());
    }

    #[test]
    fn test_single_layout() {
        let resolved = resolve(&LayoutSpec::default(), 11.0, 8.5);
        assert!(resolved.notices.is_empty());
        assert_eq!(resolved.layout.openings.len(), 1);
        assert_eq!(resolved.layout.envelope_width_in, 11.0);
        assert_eq!(resolved.layout.border_rule, BorderRule::UserAdjustable);
    }

    #[test]
    fn test_layout_id_round_trip() {
        for id in LayoutSpec::all_layout_ids() {
            let spec = LayoutSpec::from_layout_id(&id, None).unwrap();
            assert_eq!(spec.layout_id(), id);
        }
    }

    #[test]
    fn test_unknown_layout_is_fatal() {
        let err = LayoutSpec::from_layout_id("diploma-hologram", None).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_LAYOUT");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_spec_serialization() {
        let spec = LayoutSpec::from_layout_id("ticket-photo-single-8x10", None).unwrap();
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"family\":\"ticket_stub\""));
        let roundtrip: LayoutSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, spec);
    }
}
