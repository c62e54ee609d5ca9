//! # Error Types
//!
//! Structured error types for frame_core. Only conditions the caller cannot
//! recover from locally are errors; user-facing problems (artwork too small,
//! a mat unavailable at the chosen size) are reported on the computed
//! [`Quote`](crate::engine::Quote) as validation messages and notices.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::errors::{FrameError, FrameResult};
//!
//! fn validate_border(border_in: f64) -> FrameResult<()> {
//!     if border_in < 0.0 {
//!         return Err(FrameError::InvalidInput {
//!             field: "mat_border_in".to_string(),
//!             value: border_in.to_string(),
//!             reason: "Mat border cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for frame_core operations
pub type FrameResult<T> = Result<T, FrameError>;

/// Structured error type for framing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FrameError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Layout or variant id the engine does not know. Programming error.
    #[error("Unknown layout: {layout_id}")]
    UnknownLayout { layout_id: String },

    /// A catalog lookup failed
    #[error("{kind} not found in catalog: {id}")]
    CatalogItemNotFound { kind: String, id: String },

    /// A catalog section validated to nothing
    #[error("Catalog has no valid {kind} records")]
    EmptyCatalog { kind: String },

    /// The quote cannot be added to the cart
    #[error("Checkout rejected: {reason}")]
    CheckoutRejected { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FrameError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        FrameError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownLayout error
    pub fn unknown_layout(layout_id: impl Into<String>) -> Self {
        FrameError::UnknownLayout {
            layout_id: layout_id.into(),
        }
    }

    /// Create a CatalogItemNotFound error
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        FrameError::CatalogItemNotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create an EmptyCatalog error
    pub fn empty_catalog(kind: impl Into<String>) -> Self {
        FrameError::EmptyCatalog { kind: kind.into() }
    }

    /// Create a CheckoutRejected error
    pub fn checkout_rejected(reason: impl Into<String>) -> Self {
        FrameError::CheckoutRejected {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        FrameError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        FrameError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Fatal errors indicate a programming or deployment mistake and
    /// should halt the caller rather than be shown to a customer.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FrameError::UnknownLayout { .. } | FrameError::EmptyCatalog { .. } | FrameError::Internal { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FrameError::InvalidInput { .. } => "INVALID_INPUT",
            FrameError::UnknownLayout { .. } => "UNKNOWN_LAYOUT",
            FrameError::CatalogItemNotFound { .. } => "CATALOG_ITEM_NOT_FOUND",
            FrameError::EmptyCatalog { .. } => "EMPTY_CATALOG",
            FrameError::CheckoutRejected { .. } => "CHECKOUT_REJECTED",
            FrameError::FileError { .. } => "FILE_ERROR",
            FrameError::SerializationError { .. } => "SERIALIZATION_ERROR",
            FrameError::VersionMismatch { .. } => "VERSION_MISMATCH",
            FrameError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(e: serde_json::Error) -> Self {
        FrameError::serialization(e.to_string())
    }
}
