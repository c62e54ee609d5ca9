//! # File I/O Module
//!
//! Reading and writing configuration, quote and catalog files:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Version validation**: saved configurations and catalogs carry a
//!   schema version that must be compatible with this build
//!
//! ## File Format
//!
//! Saved configurations are JSON documents (`.frame`) wrapping a
//! [`FrameConfiguration`] with its schema version and save time. Catalogs use
//! the same layout as the bundled `data/catalog.json`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frame_core::configuration::FrameConfiguration;
//! use frame_core::file_io::{load_configuration, save_configuration};
//! use std::path::Path;
//!
//! let config = FrameConfiguration::new(16.0, 20.0, "black-classic");
//! save_configuration(&config, Path::new("living-room.frame"))?;
//!
//! let loaded = load_configuration(Path::new("living-room.frame"))?;
//! assert_eq!(loaded.artwork_width_in, 16.0);
//! # Ok::<(), frame_core::errors::FrameError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Catalog, DroppedRecord, RawCatalog, CATALOG_SCHEMA_VERSION};
use crate::configuration::FrameConfiguration;
use crate::engine::Quote;
use crate::errors::{FrameError, FrameResult};

/// Current schema version for saved configuration files
pub const CONFIGURATION_SCHEMA_VERSION: &str = "0.1.0";

/// On-disk wrapper around a saved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationFile {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub configuration: FrameConfiguration,
}

impl ConfigurationFile {
    pub fn new(configuration: FrameConfiguration) -> Self {
        ConfigurationFile {
            version: CONFIGURATION_SCHEMA_VERSION.to_string(),
            saved_at: Utc::now(),
            configuration,
        }
    }
}

/// Save a configuration with atomic write semantics.
///
/// The configuration is normalized before it is written, so negative
/// borders and stray reveal values never reach disk.
pub fn save_configuration(config: &FrameConfiguration, path: &Path) -> FrameResult<()> {
    let file = ConfigurationFile::new(config.normalized());
    let json = serde_json::to_string_pretty(&file)?;
    write_atomic(path, json.as_bytes())
}

/// Load a saved configuration.
///
/// # Returns
///
/// * `Ok(FrameConfiguration)` - Loaded and normalized
/// * `Err(FrameError::VersionMismatch)` - File version is incompatible
/// * `Err(FrameError::SerializationError)` - Invalid JSON
/// * `Err(FrameError::FileError)` - I/O error
pub fn load_configuration(path: &Path) -> FrameResult<FrameConfiguration> {
    let contents = read_to_string(path)?;
    let file: ConfigurationFile = serde_json::from_str(&contents)
        .map_err(|e| FrameError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&file.version, CONFIGURATION_SCHEMA_VERSION)?;

    Ok(file.configuration.normalized())
}

/// Write a computed quote as pretty JSON.
pub fn save_quote(quote: &Quote, path: &Path) -> FrameResult<()> {
    let json = serde_json::to_string_pretty(quote)?;
    write_atomic(path, json.as_bytes())
}

/// Load and validate a catalog file.
///
/// Returns the catalog together with the records dropped during
/// validation. A version this build cannot read is rejected before any
/// record is looked at.
pub fn load_catalog(path: &Path) -> FrameResult<(Catalog, Vec<DroppedRecord>)> {
    let contents = read_to_string(path)?;
    let raw: RawCatalog = serde_json::from_str(&contents)
        .map_err(|e| FrameError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&raw.version, CATALOG_SCHEMA_VERSION)?;

    let (catalog, dropped) = Catalog::from_raw(raw)?;
    if !dropped.is_empty() {
        warn!(path = %path.display(), count = dropped.len(), "catalog loaded with dropped records");
    }
    Ok((catalog, dropped))
}

/// Write to `<path>.tmp`, sync, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> FrameResult<()> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = Path::new(&tmp_path);

    let mut tmp_file = File::create(tmp_path)
        .map_err(|e| FrameError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(bytes)
        .map_err(|e| FrameError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| FrameError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        FrameError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

fn read_to_string(path: &Path) -> FrameResult<String> {
    let mut file =
        File::open(path).map_err(|e| FrameError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| FrameError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Major versions must match; on 0.x a newer minor is rejected too.
fn validate_version(file_version: &str, expected: &str) -> FrameResult<()> {
    let mismatch = || FrameError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: expected.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = expected.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}
