//! # frame_core - Framing Layout & Pricing Engine
//!
//! `frame_core` turns a customer's framing configuration into exact frame
//! geometry, a priced breakdown and a pixel-accurate preview. All inputs and
//! outputs are JSON-serializable so the engine can sit behind a web
//! configurator, a CLI or a back-office tool unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every computation is a pure function of configuration
//!   and catalog, producing a fresh immutable [`Quote`]
//! - **One geometry**: pricing and preview are both driven from the same
//!   [`AggregatedGeometry`], so the price always matches the picture
//! - **Rich Errors**: structured error types; customer-fixable problems are
//!   validation messages on the quote, not errors
//!
//! ## Quick Start
//!
//! ```rust
//! use frame_core::catalog::default_catalog;
//! use frame_core::configuration::FrameConfiguration;
//! use frame_core::engine::compute;
//!
//! let catalog = default_catalog().unwrap();
//! let config = FrameConfiguration::new(11.0, 14.0, "black-classic");
//! let quote = compute(&config, catalog).unwrap();
//! assert!(quote.pricing.total.value() > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`dimensions`] - Parsing "16 1/2" style measurements and size checks
//! - [`layouts`] - Opening geometry for every layout family
//! - [`borders`] - Per-side mat borders and plaque extension
//! - [`geometry`] - Aggregated frame dimensions and oversize status
//! - [`pricing`] - Priced breakdown from geometry and catalog
//! - [`preview`] - Projection of geometry into a pixel container
//! - [`engine`] - The full pipeline, with substitutions and validation
//! - [`catalog`] - Frame styles, mats, glazing and pricing coefficients
//! - [`share_link`] - Configuration to and from URL query strings
//! - [`checkout`] - Cart line items from an orderable quote
//! - [`file_io`] - Atomic saves and versioned loads

pub mod borders;
pub mod catalog;
pub mod checkout;
pub mod configuration;
pub mod dimensions;
pub mod engine;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod layouts;
pub mod nameplate;
pub mod notices;
pub mod preview;
pub mod pricing;
pub mod share_link;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::{default_catalog, Catalog};
pub use configuration::{FrameConfiguration, MatType};
pub use engine::{compute, Quote};
pub use errors::{FrameError, FrameResult};
pub use geometry::AggregatedGeometry;
pub use layouts::LayoutSpec;
pub use preview::{project, PreviewContainer, PreviewLayout};
pub use pricing::PricingBreakdown;
