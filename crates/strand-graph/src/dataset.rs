//! Initial dataset loading, export and import.
//!
//! The starting collection ships as a static JSON document
//! `{ "version": ..., "hairstyles": [...] }`. A missing or malformed
//! document yields an empty catalog with a warning; startup never fails
//! on bad seed data.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strand_core::{EntityId, Hairstyle};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The static seed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub version: String,
    pub hairstyles: Vec<Hairstyle>,
}

/// Loads the seed dataset. Absence or a malformed shape is logged and
/// degrades to an empty collection.
pub fn load_dataset(path: &Path) -> Vec<Hairstyle> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), %err, "dataset not readable, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Dataset>(&text) {
        Ok(dataset) => {
            info!(
                path = %path.display(),
                version = dataset.version,
                count = dataset.hairstyles.len(),
                "loaded seed dataset"
            );
            dataset.hairstyles
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed dataset, starting empty");
            Vec::new()
        }
    }
}

/// Export document shape. Only ever written; imports go through
/// [`ImportData`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    version: &'a str,
    last_updated: String,
    hairstyles: &'a [Hairstyle],
}

/// Serializes the collection as a formatted export artifact.
pub fn export_document(entities: &[Hairstyle], now: DateTime<Utc>) -> Result<String, DatasetError> {
    let doc = ExportDocument {
        version: "1.0",
        last_updated: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        hairstyles: entities,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parsed import payload. Either section may be absent; absent sections
/// leave the current state untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportData {
    #[serde(default)]
    pub hairstyles: Option<Vec<Hairstyle>>,
    #[serde(default)]
    pub favorites: Option<Vec<EntityId>>,
}

/// Parses an import document. Unlike the seed loader this is strict:
/// the user asked for an import, so a malformed document is an error.
pub fn parse_import(text: &str) -> Result<ImportData, DatasetError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_load_dataset_missing_file_is_empty() {
        assert!(load_dataset(Path::new("/nonexistent/hairstyles.json")).is_empty());
    }

    #[test]
    fn test_load_dataset_malformed_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"version\": 1, \"hairstyles\": \"oops\"}}").unwrap();
        assert!(load_dataset(file.path()).is_empty());
    }

    #[test]
    fn test_load_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "1.0", "hairstyles": [{{"id": 1, "name": "Fade", "type": "parent", "childrenIds": [2]}}]}}"#
        )
        .unwrap();
        let entities = load_dataset(file.path());
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].children_ids(), &[2]);
    }

    #[test]
    fn test_export_shape() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let text = export_document(&[Hairstyle::new(1, "Fade", "desc")], now).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["lastUpdated"], "2026-08-30T12:00:00Z");
        assert_eq!(value["hairstyles"][0]["name"], "Fade");
    }

    #[test]
    fn test_parse_import_sections_optional() {
        let data = parse_import(r#"{"favorites": [1, 2]}"#).unwrap();
        assert!(data.hairstyles.is_none());
        assert_eq!(data.favorites, Some(vec![1, 2]));

        assert!(parse_import("not json").is_err());
    }
}
