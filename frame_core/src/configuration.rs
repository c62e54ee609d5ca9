//! # Frame Configuration
//!
//! The customer's choices, passed into the engine on every change. The
//! engine never holds on to a configuration; each recomputation takes a
//! fresh value and returns a fresh result.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::configuration::{FrameConfiguration, MatType};
//!
//! let config = FrameConfiguration {
//!     mat_type: MatType::Double,
//!     mat_border_in: 2.5,
//!     mat_reveal_in: 0.25,
//!     ..FrameConfiguration::new(11.0, 8.5, "black-classic")
//! };
//! assert!(config.reveal_in() > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::layouts::LayoutSpec;
use crate::nameplate::NameplateConfig;

/// What the customer is buying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// Customer ships their own artwork
    #[default]
    FrameOnly,
    /// We print the customer's uploaded image
    PrintAndFrame,
}

impl ServiceType {
    pub fn id(&self) -> &'static str {
        match self {
            ServiceType::FrameOnly => "frame-only",
            ServiceType::PrintAndFrame => "print-and-frame",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "frame-only" => Some(ServiceType::FrameOnly),
            "print-and-frame" => Some(ServiceType::PrintAndFrame),
            _ => None,
        }
    }
}

/// Mat layers around the artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatType {
    None,
    #[default]
    Single,
    Double,
}

impl MatType {
    pub const ALL: [MatType; 3] = [MatType::None, MatType::Single, MatType::Double];

    pub fn id(&self) -> &'static str {
        match self {
            MatType::None => "none",
            MatType::Single => "single",
            MatType::Double => "double",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn has_mat(&self) -> bool {
        !matches!(self, MatType::None)
    }
}

/// Hanging hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hardware {
    #[default]
    Standard,
    /// Tamper-resistant security hangers, flat upcharge
    Security,
}

impl Hardware {
    pub fn id(&self) -> &'static str {
        match self {
            Hardware::Standard => "standard",
            Hardware::Security => "security",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "standard" => Some(Hardware::Standard),
            "security" => Some(Hardware::Security),
            _ => None,
        }
    }
}

/// A complete set of customer choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfiguration {
    #[serde(default)]
    pub service_type: ServiceType,

    /// Artwork width in inches. For a wedding layout this is the invitation
    /// card; fixed layouts (tickets, records, CDs) ignore it.
    pub artwork_width_in: f64,

    /// Artwork height in inches
    pub artwork_height_in: f64,

    pub frame_style_id: String,

    #[serde(default)]
    pub mat_type: MatType,

    /// Uniform mat border set by the customer (inches, non-negative)
    #[serde(default)]
    pub mat_border_in: f64,

    /// Inner mat reveal (inches). Only used with a double mat.
    #[serde(default)]
    pub mat_reveal_in: f64,

    #[serde(default)]
    pub mat_color_id: Option<String>,

    /// Inner mat color for a double mat
    #[serde(default)]
    pub mat_inner_color_id: Option<String>,

    pub glazing_id: String,

    #[serde(default)]
    pub hardware: Hardware,

    /// Uploaded image for print-and-frame
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub nameplate: Option<NameplateConfig>,

    #[serde(default)]
    pub bottom_weighted: bool,

    /// Landing page or campaign the order came from
    #[serde(default)]
    pub order_source: Option<String>,

    #[serde(default)]
    pub layout: LayoutSpec,
}

impl FrameConfiguration {
    /// Single-opening configuration with a 2" white single mat and
    /// standard glazing.
    pub fn new(artwork_width_in: f64, artwork_height_in: f64, frame_style_id: impl Into<String>) -> Self {
        FrameConfiguration {
            service_type: ServiceType::FrameOnly,
            artwork_width_in,
            artwork_height_in,
            frame_style_id: frame_style_id.into(),
            mat_type: MatType::Single,
            mat_border_in: 2.0,
            mat_reveal_in: 0.0,
            mat_color_id: Some("white".to_string()),
            mat_inner_color_id: None,
            glazing_id: "standard".to_string(),
            hardware: Hardware::Standard,
            image_url: None,
            nameplate: None,
            bottom_weighted: false,
            order_source: None,
            layout: LayoutSpec::default(),
        }
    }

    /// Copy with interacting fields reconciled: negative border and reveal
    /// clamp to zero, and bottom weighting is dropped when there is no mat.
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();
        config.mat_border_in = clamp_non_negative(config.mat_border_in);
        config.mat_reveal_in = clamp_non_negative(config.mat_reveal_in);
        if !config.mat_type.has_mat() {
            config.bottom_weighted = false;
        }
        config
    }

    /// Reveal that contributes to geometry: zero unless double mat.
    pub fn reveal_in(&self) -> f64 {
        if self.mat_type == MatType::Double {
            clamp_non_negative(self.mat_reveal_in)
        } else {
            0.0
        }
    }

    pub fn nameplate_enabled(&self) -> bool {
        self.nameplate.as_ref().is_some_and(|n| n.enabled)
    }

    /// Print fee applies only when there is something to print.
    pub fn wants_print(&self) -> bool {
        self.service_type == ServiceType::PrintAndFrame
            && self.image_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

impl Default for FrameConfiguration {
    fn default() -> Self {
        FrameConfiguration::new(11.0, 14.0, "black-classic")
    }
}

fn clamp_non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
