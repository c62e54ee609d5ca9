//! # Product Catalog
//!
//! Read-only frame styles, mats, glazing and pricing coefficients. The
//! catalog is validated once when loaded: malformed records are dropped
//! with a warning, and a section that validates to nothing is fatal.
//! After that it is immutable and shared freely between computations.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::catalog::default_catalog;
//!
//! let catalog = default_catalog().unwrap();
//! let style = catalog.frame_style("black-classic").unwrap();
//! assert!(style.moulding_width_in > 0.0);
//! ```

pub mod frame_style;
pub mod glazing;
pub mod mat;
pub mod pricing_config;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use frame_style::{FrameCategory, FrameStyle};
pub use glazing::GlassType;
pub use mat::{Mat, MatSheet, MatSizes, SheetSize};
pub use pricing_config::{LayoutFees, MatMultipliers, NameplateSpecs, OversizePolicy, PricingConfig};

use crate::errors::{FrameError, FrameResult};

/// Current schema version for catalog files
pub const CATALOG_SCHEMA_VERSION: &str = "0.1.0";

static DEFAULT_CATALOG_JSON: &str = include_str!("../../data/catalog.json");

static DEFAULT_CATALOG: Lazy<FrameResult<Catalog>> = Lazy::new(|| -> FrameResult<Catalog> {
    let raw: RawCatalog = serde_json::from_str(DEFAULT_CATALOG_JSON)?;
    Catalog::from_raw(raw).map(|(catalog, _)| catalog)
});

/// The catalog bundled with the crate, parsed and validated on first use.
pub fn default_catalog() -> FrameResult<&'static Catalog> {
    DEFAULT_CATALOG.as_ref().map_err(Clone::clone)
}

/// Catalog as delivered, before validation. Records are kept as raw JSON so
/// one malformed record cannot reject the whole file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub frames: Vec<serde_json::Value>,
    #[serde(default)]
    pub mats: Vec<serde_json::Value>,
    #[serde(default)]
    pub glass: Vec<serde_json::Value>,
    #[serde(default)]
    pub pricing: PricingConfig,
}

fn default_version() -> String {
    CATALOG_SCHEMA_VERSION.to_string()
}

/// A record removed during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRecord {
    pub section: String,
    pub index: usize,
    pub id: Option<String>,
    pub reason: String,
}

/// Validated, immutable catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub frames: Vec<FrameStyle>,
    pub mats: Vec<Mat>,
    pub glass: Vec<GlassType>,
    pub pricing: PricingConfig,
}

impl Catalog {
    /// Validate a raw catalog.
    ///
    /// Returns the catalog and the records dropped along the way. Fails with
    /// [`FrameError::EmptyCatalog`] when a section has no valid records, or
    /// [`FrameError::InvalidInput`] when the pricing section is unusable.
    pub fn from_raw(raw: RawCatalog) -> FrameResult<(Catalog, Vec<DroppedRecord>)> {
        let mut dropped = Vec::new();

        let frames = validate_section("frames", raw.frames, FrameStyle::problems, &mut dropped);
        let mats = validate_section("mats", raw.mats, Mat::problems, &mut dropped);
        let glass = validate_section("glass", raw.glass, GlassType::problems, &mut dropped);

        if frames.is_empty() {
            return Err(FrameError::empty_catalog("frames"));
        }
        if mats.is_empty() {
            return Err(FrameError::empty_catalog("mats"));
        }
        if glass.is_empty() {
            return Err(FrameError::empty_catalog("glass"));
        }

        let pricing_problems = raw.pricing.problems();
        if !pricing_problems.is_empty() {
            return Err(FrameError::invalid_input(
                "pricing",
                pricing_problems.join(", "),
                "Pricing coefficients must be finite and non-negative",
            ));
        }

        let catalog = Catalog {
            version: raw.version,
            frames,
            mats,
            glass,
            pricing: raw.pricing,
        };
        Ok((catalog, dropped))
    }

    pub fn frame_style(&self, id: &str) -> FrameResult<&FrameStyle> {
        self.frames
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| FrameError::not_found("frame style", id))
    }

    pub fn mat(&self, id: &str) -> FrameResult<&Mat> {
        self.mats
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| FrameError::not_found("mat", id))
    }

    pub fn glazing(&self, id: &str) -> FrameResult<&GlassType> {
        self.glass
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| FrameError::not_found("glazing", id))
    }

    /// First glazing that is actual glass or acrylic.
    pub fn first_glazed(&self) -> Option<&GlassType> {
        self.glass.iter().find(|g| !g.backing_only)
    }

    /// First mat that can be cut at the given outer size.
    pub fn first_mat_available_for(&self, width_in: f64, height_in: f64) -> Option<&Mat> {
        self.mats.iter().find(|m| m.available_for(width_in, height_in))
    }

    /// First shadowbox style deep enough for the required depth.
    pub fn first_style_with_depth(&self, required_depth_in: f64) -> Option<&FrameStyle> {
        self.frames.iter().find(|f| f.fits_depth(required_depth_in))
    }

    pub fn styles_in(&self, category: FrameCategory) -> impl Iterator<Item = &FrameStyle> {
        self.frames.iter().filter(move |f| f.category == category)
    }
}

fn validate_section<T: DeserializeOwned>(
    section: &str,
    records: Vec<serde_json::Value>,
    problems: fn(&T) -> Vec<String>,
    dropped: &mut Vec<DroppedRecord>,
) -> Vec<T> {
    let mut valid = Vec::with_capacity(records.len());
    for (index, value) in records.into_iter().enumerate() {
        let id = value.get("id").and_then(|v| v.as_str()).map(str::to_string);
        let reason = match serde_json::from_value::<T>(value) {
            Ok(record) => {
                let found = problems(&record);
                if found.is_empty() {
                    valid.push(record);
                    continue;
                }
                found.join(", ")
            }
            Err(e) => e.to_string(),
        };
        warn!(section, index, id = ?id, %reason, "dropping malformed catalog record");
        dropped.push(DroppedRecord {
            section: section.to_string(),
            index,
            id,
            reason,
        });
    }
    valid
}

pub(crate) fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
