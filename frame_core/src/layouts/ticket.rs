//! # Ticket Stub Layouts
//!
//! Fixed boards for concert and event tickets, alone or with a landscape
//! photo or a portrait poster. Every arrangement has a designed board and
//! explicit opening positions, so the mat border is fixed at zero. The
//! photo and poster arrangements come in a few sizes, encoded in the
//! layout id (`ticket-photo-single-5x7`, `concert-poster-tickets-18x24`).

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{BorderRule, LayoutFamily, Opening, OpeningKind, OpeningLayout};
use crate::nameplate::NameplateMount;
use crate::notices::{Notice, NoticeKind};

/// Standard ticket stub (inches)
pub const TICKET_WIDTH_IN: f64 = 5.625;
pub const TICKET_HEIGHT_IN: f64 = 2.125;

pub const DEFAULT_PHOTO_VARIANT: &str = "5x7";
pub const DEFAULT_POSTER_VARIANT: &str = "11x17";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketArrangement {
    Single,
    TicketPhoto,
    Trio,
    Grid4,
    PosterTickets,
    FestivalTimeline,
}

/// Opening position on a board, top-left in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    kind: OpeningKind,
    x_in: f64,
    y_in: f64,
    width_in: f64,
    height_in: f64,
}

const fn ticket(x_in: f64, y_in: f64) -> Slot {
    Slot {
        kind: OpeningKind::Ticket,
        x_in,
        y_in,
        width_in: TICKET_WIDTH_IN,
        height_in: TICKET_HEIGHT_IN,
    }
}

const fn other(kind: OpeningKind, x_in: f64, y_in: f64, width_in: f64, height_in: f64) -> Slot {
    Slot {
        kind,
        x_in,
        y_in,
        width_in,
        height_in,
    }
}

/// Designed board for one arrangement (and size variant).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Board {
    variant: Option<&'static str>,
    width_in: f64,
    height_in: f64,
    slots: &'static [Slot],
}

const SINGLE_BOARDS: &[Board] = &[Board {
    variant: None,
    width_in: 10.0,
    height_in: 6.0,
    slots: &[ticket(2.1875, 1.9375)],
}];

// Photos sit landscape under the ticket
const PHOTO_BOARDS: &[Board] = &[
    Board {
        variant: Some("4x6"),
        width_in: 12.0,
        height_in: 13.0,
        slots: &[ticket(3.1875, 3.0), other(OpeningKind::Photo, 3.0, 6.0, 6.0, 4.0)],
    },
    Board {
        variant: Some("5x7"),
        width_in: 13.0,
        height_in: 14.0,
        slots: &[ticket(3.6875, 3.0), other(OpeningKind::Photo, 3.0, 6.0, 7.0, 5.0)],
    },
    Board {
        variant: Some("8x10"),
        width_in: 16.0,
        height_in: 17.0,
        slots: &[ticket(5.1875, 3.0), other(OpeningKind::Photo, 3.0, 6.0, 10.0, 8.0)],
    },
];

const TRIO_BOARDS: &[Board] = &[Board {
    variant: None,
    width_in: 24.0,
    height_in: 8.0,
    slots: &[ticket(3.0, 3.0), ticket(9.125, 3.0), ticket(15.25, 3.0)],
}];

const GRID_BOARDS: &[Board] = &[Board {
    variant: None,
    width_in: 17.5,
    height_in: 10.5,
    slots: &[ticket(3.0, 3.0), ticket(9.125, 3.0), ticket(3.0, 5.625), ticket(9.125, 5.625)],
}];

const POSTER_BOARDS: &[Board] = &[
    Board {
        variant: Some("11x17"),
        width_in: 17.0,
        height_in: 25.0,
        slots: &[other(OpeningKind::Poster, 3.0, 3.0, 11.0, 17.0), ticket(5.6875, 20.5)],
    },
    Board {
        variant: Some("18x24"),
        width_in: 24.0,
        height_in: 32.0,
        slots: &[
            other(OpeningKind::Poster, 3.0, 3.0, 18.0, 24.0),
            ticket(5.375, 27.5),
            ticket(13.0, 27.5),
        ],
    },
];

const FESTIVAL_BOARDS: &[Board] = &[Board {
    variant: None,
    width_in: 41.5,
    height_in: 8.0,
    slots: &[
        ticket(2.5, 3.0),
        ticket(8.625, 3.0),
        ticket(14.75, 3.0),
        ticket(20.875, 3.0),
        ticket(27.0, 3.0),
        ticket(33.125, 3.0),
    ],
}];

impl TicketArrangement {
    pub const ALL: [TicketArrangement; 6] = [
        TicketArrangement::Single,
        TicketArrangement::TicketPhoto,
        TicketArrangement::Trio,
        TicketArrangement::Grid4,
        TicketArrangement::PosterTickets,
        TicketArrangement::FestivalTimeline,
    ];

    /// Id of an unsized arrangement, or the prefix of a sized one.
    fn base_id(&self) -> &'static str {
        match self {
            TicketArrangement::Single => "single-ticket",
            TicketArrangement::TicketPhoto => "ticket-photo-single",
            TicketArrangement::Trio => "ticket-trio",
            TicketArrangement::Grid4 => "ticket-grid-4",
            TicketArrangement::PosterTickets => "concert-poster-tickets",
            TicketArrangement::FestivalTimeline => "festival-timeline",
        }
    }

    fn boards(&self) -> &'static [Board] {
        match self {
            TicketArrangement::Single => SINGLE_BOARDS,
            TicketArrangement::TicketPhoto => PHOTO_BOARDS,
            TicketArrangement::Trio => TRIO_BOARDS,
            TicketArrangement::Grid4 => GRID_BOARDS,
            TicketArrangement::PosterTickets => POSTER_BOARDS,
            TicketArrangement::FestivalTimeline => FESTIVAL_BOARDS,
        }
    }

    /// Default size variant, for arrangements that have them.
    pub fn default_variant(&self) -> Option<&'static str> {
        match self {
            TicketArrangement::TicketPhoto => Some(DEFAULT_PHOTO_VARIANT),
            TicketArrangement::PosterTickets => Some(DEFAULT_POSTER_VARIANT),
            _ => None,
        }
    }

    pub fn variants(&self) -> Vec<&'static str> {
        self.boards().iter().filter_map(|b| b.variant).collect()
    }

    pub fn offers_variant(&self, variant: &str) -> bool {
        self.boards().iter().any(|b| b.variant == Some(variant))
    }

    /// Split a layout id into arrangement and size suffix. Any suffix is
    /// accepted for sized arrangements; unoffered sizes fall back on
    /// resolve.
    pub fn parse_layout_id(layout_id: &str) -> Option<(TicketArrangement, Option<&str>)> {
        for arrangement in Self::ALL {
            let base = arrangement.base_id();
            if layout_id == base {
                return Some((arrangement, None));
            }
            if arrangement.default_variant().is_none() {
                continue;
            }
            if let Some(variant) = layout_id.strip_prefix(base).and_then(|rest| rest.strip_prefix('-')) {
                if !variant.is_empty() {
                    return Some((arrangement, Some(variant)));
                }
            }
        }
        None
    }

    /// Canonical id. Sized arrangements always carry a size; one that is
    /// not offered is replaced by the default.
    pub fn layout_id(&self, variant: Option<&str>) -> String {
        match self.default_variant() {
            None => self.base_id().to_string(),
            Some(default) => {
                let variant = variant.filter(|v| self.offers_variant(v)).unwrap_or(default);
                format!("{}-{}", self.base_id(), variant)
            }
        }
    }
}

/// Every concrete ticket layout id.
pub fn all_layout_ids() -> Vec<String> {
    TicketArrangement::ALL
        .iter()
        .flat_map(|arrangement| match arrangement.default_variant() {
            None => vec![arrangement.layout_id(None)],
            Some(_) => arrangement
                .variants()
                .into_iter()
                .map(|v| arrangement.layout_id(Some(v)))
                .collect(),
        })
        .collect()
}

pub(crate) fn resolve(arrangement: TicketArrangement, variant: Option<&str>, notices: &mut Vec<Notice>) -> OpeningLayout {
    let board = choose_board(arrangement, variant, notices);

    let mut tickets = 0;
    let openings = board
        .slots
        .iter()
        .map(|slot| {
            let id = match slot.kind {
                OpeningKind::Ticket => {
                    tickets += 1;
                    format!("ticket-{tickets}")
                }
                OpeningKind::Photo => "photo".to_string(),
                _ => "poster".to_string(),
            };
            Opening::rect(id, slot.kind, slot.x_in, slot.y_in, slot.width_in, slot.height_in)
        })
        .collect();

    OpeningLayout {
        layout_id: arrangement.layout_id(board.variant),
        family: LayoutFamily::TicketStub,
        openings,
        envelope_width_in: board.width_in,
        envelope_height_in: board.height_in,
        border_rule: BorderRule::Fixed { border_in: 0.0 },
        nameplate_mount: NameplateMount::PlaqueExtension,
        required_depth_in: None,
        base_price: None,
    }
}

fn choose_board(arrangement: TicketArrangement, variant: Option<&str>, notices: &mut Vec<Notice>) -> &'static Board {
    let boards = arrangement.boards();
    let default = arrangement.default_variant();
    let fallback = boards.iter().find(|b| b.variant == default).unwrap_or(&boards[0]);

    let Some(requested) = variant.filter(|_| default.is_some()) else {
        return fallback;
    };
    match boards.iter().find(|b| b.variant == Some(requested)) {
        Some(board) => board,
        None => {
            let fallback_id = fallback.variant.unwrap_or_default();
            warn!(
                arrangement = arrangement.base_id(),
                requested,
                fallback = fallback_id,
                "ticket size variant not offered"
            );
            notices.push(Notice::new(
                NoticeKind::SizeFallback,
                "layout",
                format!(
                    "Size {requested} is not available for {}; using {fallback_id}",
                    arrangement.base_id()
                ),
            ));
            fallback
        }
    }
}
