//! # Mat Borders
//!
//! Turns the customer's border slider, mat type, bottom weighting and
//! nameplate into the four mat borders around a layout's envelope.
//!
//! ## Rules
//!
//! - User-adjustable layouts start from a uniform border. No mat means no
//!   border. An active nameplate raises the bottom border according to the
//!   layout's [`NameplateMount`], and bottom weighting then adds its extra
//!   on top.
//! - Fixed layouts (tickets, records, CDs) use their designed border on
//!   every side. The slider and bottom weighting do not apply; a nameplate
//!   extends the frame height by the clearance shortfall instead.
//!
//! [`BorderControl`] models the slider itself: the value the customer last
//! chose and the value currently displayed, which the nameplate can raise.

use serde::{Deserialize, Serialize};

use crate::catalog::PricingConfig;
use crate::configuration::{FrameConfiguration, MatType};
use crate::layouts::{BorderRule, OpeningLayout};
use crate::nameplate::{plaque_extension, NameplateMount};
use crate::notices::{Notice, NoticeKind};

/// Border widths on each side of the envelope (inches).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatBorders {
    pub top_in: f64,
    pub right_in: f64,
    pub bottom_in: f64,
    pub left_in: f64,
}

impl MatBorders {
    pub fn uniform(border_in: f64) -> Self {
        MatBorders {
            top_in: border_in,
            right_in: border_in,
            bottom_in: border_in,
            left_in: border_in,
        }
    }

    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// Symmetric border with the same perimeter as these borders.
    pub fn average(&self) -> f64 {
        (self.top_in + self.right_in + self.bottom_in + self.left_in) / 4.0
    }

    pub fn horizontal(&self) -> f64 {
        self.left_in + self.right_in
    }

    pub fn vertical(&self) -> f64 {
        self.top_in + self.bottom_in
    }
}

/// Borders for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderOutcome {
    pub borders: MatBorders,
    /// Extra frame height below the board for a nameplate on a fixed layout
    pub plaque_extension_in: f64,
    /// Whether a nameplate is actually mounted
    pub nameplate_active: bool,
    /// Bottom border moved off the customer's value by the nameplate mount
    pub mount_change: Option<BorderNotice>,
}

/// A nameplate is mounted only where there is mat to carry it: any fixed
/// layout, or a user layout with a mat.
pub fn nameplate_active(layout: &OpeningLayout, config: &FrameConfiguration) -> bool {
    config.nameplate_enabled()
        && (matches!(layout.border_rule, BorderRule::Fixed { .. }) || config.mat_type.has_mat())
}

/// Compute borders for a resolved layout. `config` should already be
/// [normalized](FrameConfiguration::normalized).
pub fn compute_borders(layout: &OpeningLayout, config: &FrameConfiguration, pricing: &PricingConfig) -> BorderOutcome {
    let specs = &pricing.nameplate;
    let active = nameplate_active(layout, config);

    match layout.border_rule {
        BorderRule::Fixed { border_in } => {
            let borders = MatBorders::uniform(border_in);
            let extension = if active {
                let natural_margin = borders.bottom_in + layout.envelope_height_in - layout.lowest_opening_bottom_in();
                plaque_extension(natural_margin, specs)
            } else {
                0.0
            };
            BorderOutcome {
                borders,
                plaque_extension_in: extension,
                nameplate_active: active,
                mount_change: None,
            }
        }
        BorderRule::UserAdjustable => {
            if !config.mat_type.has_mat() {
                return BorderOutcome {
                    borders: MatBorders::zero(),
                    plaque_extension_in: 0.0,
                    nameplate_active: false,
                    mount_change: None,
                };
            }
            let user = config.mat_border_in.max(0.0);
            let mut borders = MatBorders::uniform(user);
            let mut mount_change = None;
            if active {
                let mounted = match layout.nameplate_mount {
                    // a fixed-layout mount on a user layout behaves as the default
                    NameplateMount::PlaqueExtension => NameplateMount::UserOverride.bottom_border(user, specs),
                    mount => mount.bottom_border(user, specs),
                };
                if mounted > user {
                    mount_change = Some(BorderNotice::Raised {
                        from_in: user,
                        to_in: mounted,
                    });
                } else if mounted < user {
                    mount_change = Some(BorderNotice::Lowered {
                        from_in: user,
                        to_in: mounted,
                    });
                }
                borders.bottom_in = mounted;
            }
            if config.bottom_weighted {
                borders.bottom_in += pricing.bottom_weight_extra_in;
            }
            BorderOutcome {
                borders,
                plaque_extension_in: 0.0,
                nameplate_active: active,
                mount_change,
            }
        }
    }
}

// ============================================================================
// Slider state
// ============================================================================

/// Why the displayed border changed without the customer moving the slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum BorderNotice {
    /// Raised to the nameplate minimum
    Raised { from_in: f64, to_in: f64 },
    /// Bottom border set below the customer's value by a fixed mount
    Lowered { from_in: f64, to_in: f64 },
    /// Restored to the customer's own value after the nameplate was removed
    Restored { to_in: f64 },
}

impl BorderNotice {
    pub fn to_notice(&self) -> Notice {
        let message = match self {
            BorderNotice::Raised { from_in, to_in } => {
                format!("Mat border raised from {from_in}\" to {to_in}\" to make room for the nameplate")
            }
            BorderNotice::Lowered { from_in, to_in } => {
                format!("Bottom mat border set from {from_in}\" to {to_in}\" to mount the nameplate")
            }
            BorderNotice::Restored { to_in } => format!("Mat border restored to {to_in}\""),
        };
        Notice::new(NoticeKind::BorderAdjusted, "mat_border_in", message)
    }
}

/// Border slider: the customer's last explicit value and what is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderControl {
    pub user_border_in: f64,
    pub displayed_border_in: f64,
    pub nameplate_enabled: bool,
    pub mat_type: MatType,
    pub min_bottom_border_in: f64,
}

impl BorderControl {
    pub fn new(user_border_in: f64, mat_type: MatType, min_bottom_border_in: f64) -> Self {
        BorderControl {
            user_border_in,
            displayed_border_in: user_border_in,
            nameplate_enabled: false,
            mat_type,
            min_bottom_border_in,
        }
    }

    fn enforces_minimum(&self) -> bool {
        self.nameplate_enabled && self.mat_type.has_mat()
    }

    /// Customer moved the slider.
    pub fn set_user_border(self, value_in: f64) -> (Self, Option<BorderNotice>) {
        let mut next = self;
        next.user_border_in = value_in;
        next.displayed_border_in = value_in;
        let mut notice = None;
        if next.enforces_minimum() && value_in < next.min_bottom_border_in {
            next.displayed_border_in = next.min_bottom_border_in;
            notice = Some(BorderNotice::Raised {
                from_in: value_in,
                to_in: next.min_bottom_border_in,
            });
        }
        (next, notice)
    }

    /// Customer toggled the nameplate.
    pub fn set_nameplate(self, enabled: bool) -> (Self, Option<BorderNotice>) {
        let mut next = self;
        next.nameplate_enabled = enabled;
        if next.enforces_minimum() {
            if next.displayed_border_in < next.min_bottom_border_in {
                let from_in = next.displayed_border_in;
                next.displayed_border_in = next.min_bottom_border_in;
                return (
                    next,
                    Some(BorderNotice::Raised {
                        from_in,
                        to_in: next.min_bottom_border_in,
                    }),
                );
            }
            return (next, None);
        }
        if next.displayed_border_in != next.user_border_in {
            next.displayed_border_in = next.user_border_in;
            return (
                next,
                Some(BorderNotice::Restored {
                    to_in: next.user_border_in,
                }),
            );
        }
        (next, None)
    }
}
