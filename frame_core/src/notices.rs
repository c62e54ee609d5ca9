//! Non-fatal messages surfaced alongside a computed quote.
//!
//! A [`Notice`] tells the customer the engine changed something on their
//! behalf (a size fell back to a default, a mat was swapped for one stocked
//! at this size). A [`ValidationMessage`] explains why a configuration
//! cannot be priced or checked out.

use serde::{Deserialize, Serialize};

/// What kind of adjustment a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A size variant was not offered and the default was used instead
    SizeFallback,
    /// A catalog selection was swapped for an available one
    Substitution,
    /// The displayed mat border was raised or restored
    BorderAdjusted,
    /// A share-link value could not be read and a default was used
    LinkValueIgnored,
}

/// A user-visible, non-blocking adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Configuration field the adjustment applies to
    pub field: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Why a configuration cannot be priced or added to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    /// Artwork below the minimum size, unreadable dimension, bad text
    InvalidInput,
    /// Finished frame exceeds the hard cap
    OversizeHardCap,
}

/// A blocking problem with the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub kind: ValidationKind,
    pub field: String,
    pub message: String,
}

impl ValidationMessage {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationMessage {
            kind: ValidationKind::InvalidInput,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn hard_cap(message: impl Into<String>) -> Self {
        ValidationMessage {
            kind: ValidationKind::OversizeHardCap,
            field: "frame_size".to_string(),
            message: message.into(),
        }
    }
}
