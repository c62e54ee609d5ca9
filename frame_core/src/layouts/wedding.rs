//! # Wedding Invitation Layouts
//!
//! An invitation opening with an optional photo or RSVP-card opening beside
//! it. The mat overlaps each card by 1/8" on every side, so a window is
//! 1/4" smaller than its card in both directions. Cards of different aspect
//! ratios are centered on the invitation's vertical midpoint.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{place_row, BorderRule, LayoutFamily, OpeningKind, OpeningLayout, RowItem};
use crate::nameplate::NameplateMount;
use crate::notices::{Notice, NoticeKind};

/// Mat overlap onto each card edge (inches)
pub const MAT_OVERLAP_IN: f64 = 0.125;

/// Gap between the invitation and the second opening
pub const OPENING_SPACING_IN: f64 = 1.0;

/// Border suggested for new wedding designs
pub const DEFAULT_MAT_BORDER_IN: f64 = 2.0;

/// Custom secondary card limits (inches)
pub const CUSTOM_MIN_WIDTH_IN: f64 = 2.0;
pub const CUSTOM_MAX_WIDTH_IN: f64 = 12.0;
pub const CUSTOM_MIN_HEIGHT_IN: f64 = 2.0;
pub const CUSTOM_MAX_HEIGHT_IN: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeddingLayout {
    InviteOnly,
    InvitePhoto,
    InviteRsvp,
}

impl WeddingLayout {
    pub const ALL: [WeddingLayout; 3] = [
        WeddingLayout::InviteOnly,
        WeddingLayout::InvitePhoto,
        WeddingLayout::InviteRsvp,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            WeddingLayout::InviteOnly => "invite-only",
            WeddingLayout::InvitePhoto => "invite-photo",
            WeddingLayout::InviteRsvp => "invite-rsvp",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id)
    }

    /// Secondary card size used when none (or an unavailable one) is chosen.
    pub fn default_secondary(&self) -> Option<&'static CardSize> {
        let id = match self {
            WeddingLayout::InviteOnly => return None,
            WeddingLayout::InvitePhoto => "secondary-5x7",
            WeddingLayout::InviteRsvp => "secondary-3.5x5",
        };
        SECONDARY_SIZES.iter().find(|s| s.id == id)
    }

    fn secondary_kind(&self) -> SecondaryUse {
        match self {
            WeddingLayout::InviteRsvp => SecondaryUse::Rsvp,
            _ => SecondaryUse::Photo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecondaryUse {
    Photo,
    Rsvp,
}

/// A card size preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub id: &'static str,
    pub name: &'static str,
    pub width_in: f64,
    pub height_in: f64,
    pub for_photo: bool,
    pub for_rsvp: bool,
}

const fn card(id: &'static str, name: &'static str, width_in: f64, height_in: f64) -> CardSize {
    CardSize {
        id,
        name,
        width_in,
        height_in,
        for_photo: false,
        for_rsvp: false,
    }
}

/// Standard invitation cards. `size-5x7` is the most popular.
pub const INVITATION_SIZES: [CardSize; 8] = [
    card("size-3.5x5", "3.5\u{d7}5\" Petite", 3.5, 5.0),
    card("size-4x6", "4\u{d7}6\" Classic", 4.0, 6.0),
    card("size-4.25x5.5", "4.25\u{d7}5.5\" A2", 4.25, 5.5),
    card("size-4.5x6.25", "4.5\u{d7}6.25\" A6", 4.5, 6.25),
    card("size-5x7", "5\u{d7}7\" Standard", 5.0, 7.0),
    card("size-5.5x7.5", "5.5\u{d7}7.5\" Boutique", 5.5, 7.5),
    card("size-5x5", "5\u{d7}5\" Square", 5.0, 5.0),
    card("size-6x6", "6\u{d7}6\" Large Square", 6.0, 6.0),
];

pub const DEFAULT_INVITATION_SIZE: &str = "size-5x7";

pub const SECONDARY_SIZES: [CardSize; 4] = [
    CardSize { for_photo: true, for_rsvp: true, ..card("secondary-3.5x5", "3.5\u{d7}5\"", 3.5, 5.0) },
    CardSize { for_photo: true, for_rsvp: true, ..card("secondary-4x6", "4\u{d7}6\"", 4.0, 6.0) },
    CardSize { for_photo: true, ..card("secondary-5x7", "5\u{d7}7\"", 5.0, 7.0) },
    CardSize { for_photo: true, ..card("secondary-8x10", "8\u{d7}10\"", 8.0, 10.0) },
];

pub fn invitation_size(id: &str) -> Option<&'static CardSize> {
    INVITATION_SIZES.iter().find(|s| s.id == id)
}

/// Look up a secondary size by id, accepting `"5x7"` for `"secondary-5x7"`.
pub fn secondary_size(id: &str) -> Option<&'static CardSize> {
    SECONDARY_SIZES
        .iter()
        .find(|s| s.id == id || s.id.strip_prefix("secondary-") == Some(id))
}

/// Customer-measured secondary card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl CustomSize {
    /// Reason the size cannot be cut, if any.
    pub fn problem(&self) -> Option<String> {
        if !(self.width_in >= CUSTOM_MIN_WIDTH_IN) {
            Some(format!("Width must be at least {CUSTOM_MIN_WIDTH_IN}\""))
        } else if self.width_in > CUSTOM_MAX_WIDTH_IN {
            Some(format!("Width cannot exceed {CUSTOM_MAX_WIDTH_IN}\""))
        } else if !(self.height_in >= CUSTOM_MIN_HEIGHT_IN) {
            Some(format!("Height must be at least {CUSTOM_MIN_HEIGHT_IN}\""))
        } else if self.height_in > CUSTOM_MAX_HEIGHT_IN {
            Some(format!("Height cannot exceed {CUSTOM_MAX_HEIGHT_IN}\""))
        } else {
            None
        }
    }
}

/// Visible window for a card of the given size.
pub fn window_size(card_width_in: f64, card_height_in: f64) -> (f64, f64) {
    (
        card_width_in - MAT_OVERLAP_IN * 2.0,
        card_height_in - MAT_OVERLAP_IN * 2.0,
    )
}

pub(crate) fn resolve(
    layout: WeddingLayout,
    secondary_size_id: Option<&str>,
    custom: Option<&CustomSize>,
    card_width_in: f64,
    card_height_in: f64,
    notices: &mut Vec<Notice>,
) -> OpeningLayout {
    let (window_w, window_h) = window_size(card_width_in, card_height_in);
    let primary = RowItem {
        id: "invitation",
        kind: OpeningKind::Primary,
        width_in: window_w.max(0.0),
        height_in: window_h.max(0.0),
    };

    let rest = match secondary_card(layout, secondary_size_id, custom, notices) {
        Some((w, h)) => {
            let (sw, sh) = window_size(w, h);
            let kind = match layout.secondary_kind() {
                SecondaryUse::Photo => OpeningKind::Photo,
                SecondaryUse::Rsvp => OpeningKind::Secondary,
            };
            vec![(
                OPENING_SPACING_IN,
                RowItem {
                    id: if kind == OpeningKind::Photo { "photo" } else { "rsvp" },
                    kind,
                    width_in: sw,
                    height_in: sh,
                },
            )]
        }
        None => Vec::new(),
    };

    let (openings, envelope_width_in, envelope_height_in) = place_row(primary, &rest, 0.0);

    OpeningLayout {
        layout_id: layout.id().to_string(),
        family: LayoutFamily::Wedding,
        openings,
        envelope_width_in,
        envelope_height_in,
        border_rule: BorderRule::UserAdjustable,
        nameplate_mount: NameplateMount::UserOverride,
        required_depth_in: None,
        base_price: None,
    }
}

/// Card size of the second opening, falling back to the layout default
/// when the request cannot be honored.
fn secondary_card(
    layout: WeddingLayout,
    size_id: Option<&str>,
    custom: Option<&CustomSize>,
    notices: &mut Vec<Notice>,
) -> Option<(f64, f64)> {
    let default = layout.default_secondary()?;
    let fallback = |notices: &mut Vec<Notice>, message: String| {
        warn!(layout = layout.id(), fallback = default.id, %message, "wedding secondary size fallback");
        notices.push(Notice::new(NoticeKind::SizeFallback, "secondary_size", message));
        Some((default.width_in, default.height_in))
    };

    if let Some(custom) = custom {
        return match custom.problem() {
            None => Some((custom.width_in, custom.height_in)),
            Some(problem) => fallback(notices, format!("Custom size rejected: {problem}; using {}", default.name)),
        };
    }

    let Some(id) = size_id else {
        return Some((default.width_in, default.height_in));
    };
    let offered = secondary_size(id).filter(|s| match layout.secondary_kind() {
        SecondaryUse::Photo => s.for_photo,
        SecondaryUse::Rsvp => s.for_rsvp,
    });
    match offered {
        Some(size) => Some((size.width_in, size.height_in)),
        None => fallback(
            notices,
            format!("Size {id} is not offered for {}; using {}", layout.id(), default.name),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_only_window() {
        let mut notices = Vec::new();
        let layout = resolve(WeddingLayout::InviteOnly, None, None, 5.0, 7.0, &mut notices);
        assert_eq!(layout.openings.len(), 1);
        assert_eq!(layout.envelope_width_in, 4.75);
        assert_eq!(layout.envelope_height_in, 6.75);
    }

    #[test]
    fn test_invite_photo_side_by_side() {
        let mut notices = Vec::new();
        let layout = resolve(WeddingLayout::InvitePhoto, Some("secondary-8x10"), None, 5.0, 7.0, &mut notices);
        assert!(notices.is_empty());
        assert_eq!(layout.envelope_width_in, 4.75 + 1.0 + 7.75);
        assert_eq!(layout.envelope_height_in, 9.75);

        let invitation = &layout.openings[0];
        let photo = &layout.openings[1];
        assert_eq!(photo.x_in, 5.75);
        assert_eq!(photo.y_in, 0.0);
        assert_eq!(invitation.y_in, (9.75 - 6.75) / 2.0);
    }

    #[test]
    fn test_rsvp_rejects_photo_only_size() {
        let mut notices = Vec::new();
        let layout = resolve(WeddingLayout::InviteRsvp, Some("5x7"), None, 5.0, 7.0, &mut notices);
        assert_eq!(notices.len(), 1);
        let rsvp = &layout.openings[1];
        assert_eq!(rsvp.kind, OpeningKind::Secondary);
        assert_eq!(rsvp.width_in, 3.25);
    }

    #[test]
    fn test_custom_secondary() {
        let mut notices = Vec::new();
        let custom = CustomSize { width_in: 6.0, height_in: 9.0 };
        let layout = resolve(WeddingLayout::InvitePhoto, None, Some(&custom), 5.0, 7.0, &mut notices);
        assert!(notices.is_empty());
        assert_eq!(layout.openings[1].width_in, 5.75);

        let too_tall = CustomSize { width_in: 6.0, height_in: 17.0 };
        let layout = resolve(WeddingLayout::InvitePhoto, None, Some(&too_tall), 5.0, 7.0, &mut notices);
        assert_eq!(notices.len(), 1);
        assert_eq!(layout.openings[1].width_in, 4.75);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(secondary_size("4x6").map(|s| s.id), Some("secondary-4x6"));
        assert!(invitation_size(DEFAULT_INVITATION_SIZE).is_some());
        assert!(CustomSize { width_in: 1.0, height_in: 5.0 }.problem().is_some());
    }
}
