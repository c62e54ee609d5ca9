//! Glazing (glass and acrylic) options.

use serde::{Deserialize, Serialize};

/// A glazing option from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassType {
    pub id: String,
    pub name: String,
    pub price_per_sq_ft: f64,

    /// Backing only, no glazing. Prices as zero and shows as included.
    #[serde(default)]
    pub backing_only: bool,
}

impl GlassType {
    pub(crate) fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.id.trim().is_empty() {
            problems.push("empty id".to_string());
        }
        if !self.price_per_sq_ft.is_finite() || self.price_per_sq_ft < 0.0 {
            problems.push(format!("price_per_sq_ft {}", self.price_per_sq_ft));
        }
        problems
    }
}
