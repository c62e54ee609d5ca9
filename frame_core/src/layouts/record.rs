//! # Record and CD Layouts
//!
//! Album cover displays with zero, one or two discs peeking out beside the
//! cover. Each layout has a designed board size and border, so the
//! customer's border slider does not apply. Round disc openings are laid
//! out by their bounding square; a disc may tuck behind the cover.
//!
//! Coordinates below are from the envelope's top-left, i.e. the board
//! inside the fixed border.

use serde::{Deserialize, Serialize};

use super::{BorderRule, LayoutFamily, Opening, OpeningKind, OpeningLayout};
use crate::nameplate::NameplateMount;

// ============================================================================
// Vinyl
// ============================================================================

/// 12" LP jacket
pub const ALBUM_COVER_IN: f64 = 12.25;
pub const RECORD_DIAMETER_IN: f64 = 11.75;
/// Record diameter in the double layout
pub const DOUBLE_RECORD_DIAMETER_IN: f64 = 11.7;
/// Cover right edge to record center (label peeking out)
pub const GAP_TO_LABEL_IN: f64 = 3.0;
/// Center-to-center spacing of two records
pub const RECORD_CENTER_SPACING_IN: f64 = 10.0;
/// Cover opening grows by this on each side so no board shows at the edge
pub const COVER_BLEED_IN: f64 = 0.06;
/// Shadowbox depth for records and CDs
pub const DISPLAY_DEPTH_IN: f64 = 1.0;

const SINGLE_COVER_X_IN: f64 = 0.65;
const DOUBLE_GROUP_OFFSET_X_IN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordLayout {
    CoverOnly,
    SingleWithCover,
    DoubleWithCovers,
}

impl RecordLayout {
    pub const ALL: [RecordLayout; 3] = [
        RecordLayout::CoverOnly,
        RecordLayout::SingleWithCover,
        RecordLayout::DoubleWithCovers,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            RecordLayout::CoverOnly => "cover-only",
            RecordLayout::SingleWithCover => "single-with-cover",
            RecordLayout::DoubleWithCovers => "double-with-covers",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id)
    }

    /// Board width, height and border (inches)
    pub fn board(&self) -> (f64, f64, f64) {
        match self {
            RecordLayout::CoverOnly => (ALBUM_COVER_IN, ALBUM_COVER_IN, 2.0),
            RecordLayout::SingleWithCover => (22.0, 14.0, 1.0),
            RecordLayout::DoubleWithCovers => (32.5, 14.5, 1.0),
        }
    }

    /// Flat display price, replacing perimeter frame pricing
    pub fn base_price(&self) -> f64 {
        match self {
            RecordLayout::CoverOnly => 189.0,
            RecordLayout::SingleWithCover => 249.0,
            RecordLayout::DoubleWithCovers => 329.0,
        }
    }
}

pub(crate) fn resolve_record(layout: RecordLayout) -> OpeningLayout {
    let (width_in, height_in, border_in) = layout.board();
    let openings = match layout {
        RecordLayout::CoverOnly => vec![Opening::rect(
            "cover",
            OpeningKind::Primary,
            0.0,
            0.0,
            ALBUM_COVER_IN,
            ALBUM_COVER_IN,
        )],
        RecordLayout::SingleWithCover => {
            let cover_y = (height_in - ALBUM_COVER_IN) / 2.0;
            let center_x = SINGLE_COVER_X_IN + ALBUM_COVER_IN + GAP_TO_LABEL_IN;
            vec![
                Opening::rect("cover", OpeningKind::Primary, SINGLE_COVER_X_IN, cover_y, ALBUM_COVER_IN, ALBUM_COVER_IN),
                Opening::circle("record", OpeningKind::Disc, center_x, height_in / 2.0, RECORD_DIAMETER_IN),
            ]
        }
        RecordLayout::DoubleWithCovers => {
            let cover_y = (height_in - ALBUM_COVER_IN) / 2.0;
            let left_center_x = ALBUM_COVER_IN + GAP_TO_LABEL_IN + DOUBLE_GROUP_OFFSET_X_IN;
            let center_y = height_in / 2.0;
            vec![
                Opening::rect(
                    "cover",
                    OpeningKind::Primary,
                    DOUBLE_GROUP_OFFSET_X_IN - COVER_BLEED_IN,
                    cover_y - COVER_BLEED_IN,
                    ALBUM_COVER_IN + COVER_BLEED_IN * 2.0,
                    ALBUM_COVER_IN + COVER_BLEED_IN * 2.0,
                ),
                Opening::circle("record-left", OpeningKind::Disc, left_center_x, center_y, DOUBLE_RECORD_DIAMETER_IN),
                Opening::circle(
                    "record-right",
                    OpeningKind::Disc,
                    left_center_x + RECORD_CENTER_SPACING_IN,
                    center_y,
                    DOUBLE_RECORD_DIAMETER_IN,
                ),
            ]
        }
    };

    fixed_layout(layout.id(), LayoutFamily::Record, openings, (width_in, height_in, border_in), layout.base_price())
}

// ============================================================================
// CD
// ============================================================================

/// CD jewel-case insert
pub const CD_COVER_IN: f64 = 4.75;
/// 120 mm disc
pub const CD_DISC_IN: f64 = 4.724;
pub const CD_GAP_IN: f64 = 1.3;

/// The double-disc layout is the single layout scaled up for a larger board
const DOUBLE_SCALE: f64 = 1.75;
const DOUBLE_GAP_IN: f64 = 1.5;
const DOUBLE_DISC_SPACING_IN: f64 = 6.5;
const DOUBLE_DISC_SHRINK_IN: f64 = 0.05;
const DOUBLE_CD_GROUP_OFFSET_X_IN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CdLayout {
    CoverOnly,
    DiscWithCover,
    DoubleDisc,
}

impl CdLayout {
    pub const ALL: [CdLayout; 3] = [CdLayout::CoverOnly, CdLayout::DiscWithCover, CdLayout::DoubleDisc];

    pub fn id(&self) -> &'static str {
        match self {
            CdLayout::CoverOnly => "cd-cover-only",
            CdLayout::DiscWithCover => "cd-disc-with-cover",
            CdLayout::DoubleDisc => "cd-double-disc",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id)
    }

    /// Board width, height and border (inches)
    pub fn board(&self) -> (f64, f64, f64) {
        match self {
            CdLayout::CoverOnly => (CD_COVER_IN, CD_COVER_IN, 1.625),
            CdLayout::DiscWithCover => (9.0, 5.3, 0.75),
            CdLayout::DoubleDisc => (21.0, 9.5, 0.75),
        }
    }

    pub fn base_price(&self) -> f64 {
        match self {
            CdLayout::CoverOnly => 129.0,
            CdLayout::DiscWithCover => 189.0,
            CdLayout::DoubleDisc => 229.0,
        }
    }
}

pub(crate) fn resolve_cd(layout: CdLayout) -> OpeningLayout {
    let (width_in, height_in, border_in) = layout.board();
    let openings = match layout {
        CdLayout::CoverOnly => vec![Opening::rect("cover", OpeningKind::Primary, 0.0, 0.0, CD_COVER_IN, CD_COVER_IN)],
        CdLayout::DiscWithCover => {
            // Cover and half the disc are centered as one group
            let content_width = CD_COVER_IN + CD_GAP_IN + CD_DISC_IN / 2.0;
            let cover_x = (width_in - content_width) / 2.0;
            let cover_y = (height_in - CD_COVER_IN) / 2.0;
            let center_x = cover_x + CD_COVER_IN + CD_GAP_IN;
            vec![
                Opening::rect("cover", OpeningKind::Primary, cover_x, cover_y, CD_COVER_IN, CD_COVER_IN),
                Opening::circle("disc", OpeningKind::Disc, center_x, height_in / 2.0, CD_DISC_IN),
            ]
        }
        CdLayout::DoubleDisc => {
            let cover = CD_COVER_IN * DOUBLE_SCALE;
            let disc = CD_DISC_IN * DOUBLE_SCALE - DOUBLE_DISC_SHRINK_IN;
            let cover_y = (height_in - cover) / 2.0;
            let left_center_x = cover + DOUBLE_GAP_IN + DOUBLE_CD_GROUP_OFFSET_X_IN;
            let center_y = height_in / 2.0;
            vec![
                Opening::rect(
                    "cover",
                    OpeningKind::Primary,
                    DOUBLE_CD_GROUP_OFFSET_X_IN - COVER_BLEED_IN,
                    cover_y - COVER_BLEED_IN,
                    cover + COVER_BLEED_IN * 2.0,
                    cover + COVER_BLEED_IN * 2.0,
                ),
                Opening::circle("disc-left", OpeningKind::Disc, left_center_x, center_y, disc),
                Opening::circle(
                    "disc-right",
                    OpeningKind::Disc,
                    left_center_x + DOUBLE_DISC_SPACING_IN,
                    center_y,
                    disc,
                ),
            ]
        }
    };

    fixed_layout(layout.id(), LayoutFamily::Cd, openings, (width_in, height_in, border_in), layout.base_price())
}

fn fixed_layout(
    id: &str,
    family: LayoutFamily,
    openings: Vec<Opening>,
    (width_in, height_in, border_in): (f64, f64, f64),
    base_price: f64,
) -> OpeningLayout {
    OpeningLayout {
        layout_id: id.to_string(),
        family,
        openings,
        envelope_width_in: width_in,
        envelope_height_in: height_in,
        border_rule: BorderRule::Fixed { border_in },
        nameplate_mount: NameplateMount::PlaqueExtension,
        required_depth_in: Some(DISPLAY_DEPTH_IN),
        base_price: Some(base_price),
    }
}
