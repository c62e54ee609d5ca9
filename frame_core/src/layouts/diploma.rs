//! # Diploma Layouts
//!
//! A diploma opening with optional tassel and photo openings to its right,
//! placed left to right as diploma, tassel, photo:
//!
//! ```text
//! +--------------------+   +--+    +------+
//! |                    |   |  |    |      |
//! |      diploma       | 1 |T | gap| photo|
//! |                    |   |  |    |      |
//! +--------------------+   +--+    +------+
//! ```
//!
//! Envelope width is the sum of the opening widths and gaps. Envelope
//! height is the tallest opening, reduced by 1.5" when all three are
//! present.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{place_row, BorderRule, LayoutFamily, OpeningKind, OpeningLayout, RowItem};
use crate::nameplate::NameplateMount;
use crate::notices::{Notice, NoticeKind};

/// Tassel opening (inches)
pub const TASSEL_WIDTH_IN: f64 = 2.0;
pub const TASSEL_HEIGHT_IN: f64 = 6.0;

/// Diploma to photo, when there is no tassel
pub const PHOTO_GAP_IN: f64 = 2.0;

/// Diploma to tassel
pub const TASSEL_GAP_IN: f64 = 1.0;

/// Envelope height trimmed when diploma, tassel and photo are all present
pub const THREE_OPENING_HEIGHT_REDUCTION_IN: f64 = 1.5;

/// Shadowbox depth for a hanging tassel
pub const TASSEL_DEPTH_IN: f64 = 1.0;

/// Custom diploma sizes accepted (inches, either side)
pub const CUSTOM_MIN_IN: f64 = 4.0;
pub const CUSTOM_MAX_IN: f64 = 40.0;

pub const DEFAULT_PHOTO_SIZE: &str = "5x7";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiplomaLayout {
    DiplomaOnly,
    DiplomaPhoto,
    DiplomaTassel,
    DiplomaTasselPhoto,
}

impl DiplomaLayout {
    pub const ALL: [DiplomaLayout; 4] = [
        DiplomaLayout::DiplomaOnly,
        DiplomaLayout::DiplomaPhoto,
        DiplomaLayout::DiplomaTassel,
        DiplomaLayout::DiplomaTasselPhoto,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DiplomaLayout::DiplomaOnly => "diploma-only",
            DiplomaLayout::DiplomaPhoto => "diploma-photo",
            DiplomaLayout::DiplomaTassel => "diploma-tassel",
            DiplomaLayout::DiplomaTasselPhoto => "diploma-tassel-photo",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id)
    }

    pub fn has_photo(&self) -> bool {
        matches!(self, DiplomaLayout::DiplomaPhoto | DiplomaLayout::DiplomaTasselPhoto)
    }

    pub fn has_tassel(&self) -> bool {
        matches!(self, DiplomaLayout::DiplomaTassel | DiplomaLayout::DiplomaTasselPhoto)
    }
}

/// Portrait photo opening offered beside a diploma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSize {
    pub id: &'static str,
    pub width_in: f64,
    pub height_in: f64,
    /// Gap between the tassel and this photo
    pub tassel_gap_in: f64,
}

pub const PHOTO_SIZES: [PhotoSize; 2] = [
    PhotoSize {
        id: "5x7",
        width_in: 5.0,
        height_in: 7.0,
        tassel_gap_in: 1.5,
    },
    PhotoSize {
        id: "8x10",
        width_in: 8.0,
        height_in: 10.0,
        tassel_gap_in: 2.0,
    },
];

pub fn photo_size(id: &str) -> Option<&'static PhotoSize> {
    PHOTO_SIZES.iter().find(|p| p.id == id)
}

/// Common document size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiplomaPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub width_in: f64,
    pub height_in: f64,
}

pub const DIPLOMA_PRESETS: [DiplomaPreset; 10] = [
    DiplomaPreset { id: "cert-letter", name: "US Letter Certificate", width_in: 11.0, height_in: 8.5 },
    DiplomaPreset { id: "cert-a4", name: "A4 Certificate", width_in: 11.69, height_in: 8.27 },
    DiplomaPreset { id: "license-standard", name: "Professional License", width_in: 10.0, height_in: 8.0 },
    DiplomaPreset { id: "hs-diploma-modern", name: "High School Diploma", width_in: 11.0, height_in: 8.5 },
    DiplomaPreset { id: "college-diploma-modern", name: "College Diploma (Modern)", width_in: 14.0, height_in: 11.0 },
    DiplomaPreset { id: "college-diploma-traditional", name: "College Diploma (Traditional)", width_in: 13.0, height_in: 10.0 },
    DiplomaPreset { id: "award-corporate", name: "Corporate Award", width_in: 14.0, height_in: 11.0 },
    DiplomaPreset { id: "award-letter", name: "Corporate Award (Letter)", width_in: 11.0, height_in: 8.5 },
    DiplomaPreset { id: "military-cert", name: "Military/Government", width_in: 15.0, height_in: 12.0 },
    DiplomaPreset { id: "intl-diploma-large", name: "International Diploma", width_in: 17.0, height_in: 13.0 },
];

pub fn diploma_preset(id: &str) -> Option<&'static DiplomaPreset> {
    DIPLOMA_PRESETS.iter().find(|p| p.id == id)
}

/// Whether a custom document size is within what we cut.
pub fn is_valid_custom_size(width_in: f64, height_in: f64) -> bool {
    let ok = |v: f64| (CUSTOM_MIN_IN..=CUSTOM_MAX_IN).contains(&v);
    ok(width_in) && ok(height_in)
}

pub(crate) fn resolve(
    layout: DiplomaLayout,
    photo_size_id: Option<&str>,
    width_in: f64,
    height_in: f64,
    notices: &mut Vec<Notice>,
) -> OpeningLayout {
    let primary = RowItem {
        id: "diploma",
        kind: OpeningKind::Primary,
        width_in,
        height_in,
    };
    let tassel = RowItem {
        id: "tassel",
        kind: OpeningKind::Tassel,
        width_in: TASSEL_WIDTH_IN,
        height_in: TASSEL_HEIGHT_IN,
    };

    let photo = layout.has_photo().then(|| chosen_photo(photo_size_id, notices));
    let photo_item = |p: &PhotoSize| RowItem {
        id: "photo",
        kind: OpeningKind::Photo,
        width_in: p.width_in,
        height_in: p.height_in,
    };

    let (rest, reduction) = match (layout.has_tassel(), photo) {
        (true, Some(p)) => (
            vec![(TASSEL_GAP_IN, tassel), (p.tassel_gap_in, photo_item(p))],
            THREE_OPENING_HEIGHT_REDUCTION_IN,
        ),
        (true, None) => (vec![(TASSEL_GAP_IN, tassel)], 0.0),
        (false, Some(p)) => (vec![(PHOTO_GAP_IN, photo_item(p))], 0.0),
        (false, None) => (Vec::new(), 0.0),
    };

    let (openings, envelope_width_in, envelope_height_in) = place_row(primary, &rest, reduction);

    OpeningLayout {
        layout_id: layout.id().to_string(),
        family: LayoutFamily::Diploma,
        openings,
        envelope_width_in,
        envelope_height_in,
        border_rule: BorderRule::UserAdjustable,
        nameplate_mount: NameplateMount::UserOverride,
        required_depth_in: layout.has_tassel().then_some(TASSEL_DEPTH_IN),
        base_price: None,
    }
}

fn chosen_photo(photo_size_id: Option<&str>, notices: &mut Vec<Notice>) -> &'static PhotoSize {
    let default = &PHOTO_SIZES[0];
    match photo_size_id {
        None => default,
        Some(id) => photo_size(id).unwrap_or_else(|| {
            warn!(photo_size = id, fallback = default.id, "diploma photo size not offered");
            notices.push(Notice::new(
                NoticeKind::SizeFallback,
                "photo_size",
                format!("Photo size {id} is not available for diplomas; using {}", default.id),
            ));
            default
        }),
    }
}
