//! # File I/O Module
//!
//! JSON persistence for calculation settings and computed properties:
//! - **Atomic saves**: write to `.tmp`, sync, read back, rename
//! - **Version validation**: property files carry the schema version they
//!   were written with
//!
//! ## Example
//!
//! ```rust,no_run
//! use section_core::calculations::SectionCalculator;
//! use section_core::file_io::{load_property, save_property};
//! use section_core::shapes::Rectangle;
//! use std::path::Path;
//!
//! let property = SectionCalculator::default().calculate(&Rectangle::new(0.1, 0.01))?;
//! save_property(&property, Path::new("plate.json"))?;
//! let loaded = load_property(Path::new("plate.json"))?;
//! assert_eq!(loaded, property);
//! # Ok::<(), section_core::errors::SectionError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::calculations::Property;
use crate::errors::{SectionError, SectionResult};
use crate::settings::CalculationSettings;

/// Schema version written into property files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// On-disk envelope of a saved property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyFile {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub property: Property,
}

/// Serialize `value` and write it to `path` atomically.
///
/// The JSON goes to a sibling `.tmp` file first, is synced and read back to
/// confirm it parses, and only then renamed over `path`.
fn save_json<T: Serialize + DeserializeOwned>(value: &T, path: &Path) -> SectionResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = path.with_extension("json.tmp");
    let tmp_display = tmp_path.display().to_string();

    write_temp(&tmp_path, File::create(&tmp_path), json.as_bytes())?;

    // verify what landed on disk before replacing the target
    let written = fs::read_to_string(&tmp_path)
        .map_err(|e| SectionError::file_error("verify temp file", tmp_display.clone(), e.to_string()));
    if let Err(e) = written.and_then(|text| serde_json::from_str::<T>(&text).map_err(SectionError::from)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SectionError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved");
    Ok(())
}

/// Write and sync the temp file; a failed write removes it again.
fn write_temp<W: Write + SyncAll>(tmp_path: &Path, file: std::io::Result<W>, bytes: &[u8]) -> SectionResult<()> {
    let display = tmp_path.display().to_string();
    let mut file =
        file.map_err(|e| SectionError::file_error("create temp file", display.clone(), e.to_string()))?;
    let written = file
        .write_all(bytes)
        .map_err(|e| SectionError::file_error("write temp file", display.clone(), e.to_string()))
        .and_then(|()| {
            file.sync_all()
                .map_err(|e| SectionError::file_error("sync temp file", display.clone(), e.to_string()))
        });
    drop(file);
    if written.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    written
}

trait SyncAll {
    fn sync_all(&self) -> std::io::Result<()>;
}

impl SyncAll for File {
    fn sync_all(&self) -> std::io::Result<()> {
        File::sync_all(self)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> SectionResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SectionError::file_error("read", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| SectionError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load calculation settings; missing fields take their defaults.
pub fn load_settings(path: &Path) -> SectionResult<CalculationSettings> {
    let settings: CalculationSettings = load_json(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Save calculation settings with atomic write semantics.
pub fn save_settings(settings: &CalculationSettings, path: &Path) -> SectionResult<()> {
    settings.validate()?;
    save_json(settings, path)
}

/// Save a computed property with atomic write semantics.
pub fn save_property(property: &Property, path: &Path) -> SectionResult<()> {
    let file = PropertyFile {
        version: SCHEMA_VERSION.to_string(),
        saved_at: Utc::now(),
        property: property.clone(),
    };
    save_json(&file, path)
}

/// Load a property saved by [`save_property`].
///
/// # Returns
///
/// * `Err(SectionError::InvalidInput)` - file written by an incompatible version
/// * `Err(SectionError::SerializationError)` - invalid JSON
/// * `Err(SectionError::FileError)` - I/O error
pub fn load_property(path: &Path) -> SectionResult<Property> {
    let file: PropertyFile = load_json(path)?;
    validate_version(&file.version)?;
    Ok(file.property)
}

/// Check that a file version is readable by this schema.
fn validate_version(file_version: &str) -> SectionResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || {
        SectionError::invalid_input(
            "version",
            file_version,
            format!("Property file schema is not compatible with {}", SCHEMA_VERSION),
        )
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }
    // 0.x: a newer minor may have broken the layout
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::SectionCalculator;
    use crate::settings::NonConvergencePolicy;
    use crate::shapes::Rectangle;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("section_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_settings_roundtrip() {
        let path = temp_path("settings");
        let settings = CalculationSettings {
            on_non_convergence: NonConvergencePolicy::Error,
            max_iterations: 50,
            ..Default::default()
        };
        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_settings_file() {
        let path = temp_path("partial");
        fs::write(&path, r#"{ "principal_axis": "Search" }"#).unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.max_iterations, 200);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_settings_file() {
        let path = temp_path("invalid");
        fs::write(&path, r#"{ "area_tolerance": 2.0 }"#).unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "INVALID_INPUT");
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_property_roundtrip_leaves_no_tmp_file() {
        let path = temp_path("property");
        let property = SectionCalculator::default().calculate(&Rectangle::new(0.1, 0.01)).unwrap();
        save_property(&property, &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_property(&path).unwrap(), property);
        let _ = fs::remove_file(&path);
    }

    /// Writer failing at the chosen step
    struct Failing {
        on_write: bool,
    }

    impl Write for Failing {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.on_write {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            } else {
                Ok(buf.len())
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SyncAll for Failing {
        fn sync_all(&self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_failed_write_removes_tmp_file() {
        for (on_write, step) in [(true, "write temp file"), (false, "sync temp file")] {
            let tmp = temp_path(&format!("failing_{}", on_write)).with_extension("json.tmp");
            fs::write(&tmp, "partial").unwrap();

            let err = write_temp(&tmp, Ok(Failing { on_write }), b"{}").unwrap_err();
            match err {
                SectionError::FileError { operation, .. } => assert_eq!(operation, step),
                other => panic!("unexpected error {:?}", other),
            }
            assert!(!tmp.exists(), "{} left behind", tmp.display());
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_property(Path::new("/nonexistent/section.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
