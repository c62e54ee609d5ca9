//! Mat boards and the sheet sizes they are stocked in.
//!
//! Mats are cut from full sheets. Every mat comes in the standard 32×40
//! sheet; only some are also stocked as 40×60 oversize sheets, so a mat
//! without one cannot be cut for a piece larger than 32×40.

use serde::{Deserialize, Serialize};

/// Standard sheet (inches, short × long)
pub const STANDARD_SHEET_IN: (f64, f64) = (32.0, 40.0);

/// Oversize sheet (inches, short × long)
pub const OVERSIZE_SHEET_IN: (f64, f64) = (40.0, 60.0);

/// A stocked sheet of a mat color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatSheet {
    pub sku: String,
    pub price: f64,
}

/// Sheet sizes a mat color is stocked in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatSizes {
    #[serde(rename = "32x40", default)]
    pub standard: Option<MatSheet>,
    #[serde(rename = "40x60", default)]
    pub oversize: Option<MatSheet>,
}

/// Smallest sheet a piece needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSize {
    Standard,
    Oversize,
}

impl SheetSize {
    /// Sheet needed for a mat of the given outer size, or `None` when it
    /// exceeds even the oversize sheet. Either orientation fits.
    pub fn required_for(width_in: f64, height_in: f64) -> Option<SheetSize> {
        let short = width_in.min(height_in);
        let long = width_in.max(height_in);
        if short <= STANDARD_SHEET_IN.0 && long <= STANDARD_SHEET_IN.1 {
            Some(SheetSize::Standard)
        } else if short <= OVERSIZE_SHEET_IN.0 && long <= OVERSIZE_SHEET_IN.1 {
            Some(SheetSize::Oversize)
        } else {
            None
        }
    }
}

/// A mat color from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mat {
    pub id: String,
    pub name: String,
    pub hex_color: String,

    /// Added to the base mat rate per inch of mat perimeter
    #[serde(default)]
    pub surcharge_per_inch: Option<f64>,

    #[serde(default)]
    pub is_premium: bool,

    #[serde(default)]
    pub sizes: MatSizes,
}

impl Mat {
    /// Whether this mat can be cut for a piece of the given outer size.
    pub fn available_for(&self, width_in: f64, height_in: f64) -> bool {
        match SheetSize::required_for(width_in, height_in) {
            // Every catalog mat is stocked in the standard sheet.
            Some(SheetSize::Standard) => true,
            Some(SheetSize::Oversize) => self.sizes.oversize.is_some(),
            None => false,
        }
    }

    /// Stocked sheet a mat of the given outer size is cut from.
    pub fn sheet_for(&self, width_in: f64, height_in: f64) -> Option<&MatSheet> {
        match SheetSize::required_for(width_in, height_in)? {
            SheetSize::Standard => self.sizes.standard.as_ref(),
            SheetSize::Oversize => self.sizes.oversize.as_ref(),
        }
    }

    pub fn surcharge(&self) -> f64 {
        self.surcharge_per_inch.unwrap_or(0.0)
    }

    pub(crate) fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.id.trim().is_empty() {
            problems.push("empty id".to_string());
        }
        if !super::is_hex_color(&self.hex_color) {
            problems.push(format!("hex_color {}", self.hex_color));
        }
        if let Some(s) = self.surcharge_per_inch {
            if !s.is_finite() || s < 0.0 {
                problems.push(format!("surcharge_per_inch {}", s));
            }
        }
        for (size, sheet) in [("32x40", &self.sizes.standard), ("40x60", &self.sizes.oversize)] {
            let Some(sheet) = sheet else { continue };
            if sheet.sku.trim().is_empty() {
                problems.push(format!("{size} sheet without sku"));
            }
            if !sheet.price.is_finite() || sheet.price < 0.0 {
                problems.push(format!("{size} sheet price {}", sheet.price));
            }
        }
        problems
    }
}
