//! Decoder for JSON dataset files.
//!
//! A JSON dataset is a serialized [`Record`]: an ordered list of
//! `{ "name": ..., "value": ... }` fields and an optional pixel buffer in
//! ndarray's serde layout (`{ "v": 1, "dim": [...], "data": [...] }`).

use std::path::Path;

use crate::data::Record;
use crate::data::loader::{DatasetDecoder, LoaderError};

/// Loader for `.json` dataset files.
pub struct JsonDatasetLoader;

impl JsonDatasetLoader {
    /// Parse a record from JSON text.
    pub fn parse(json: &str) -> Result<Record, LoaderError> {
        serde_json::from_str(json).map_err(|e| LoaderError::new(format!("Invalid dataset JSON: {}", e)))
    }
}

impl DatasetDecoder for JsonDatasetLoader {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "JSON Dataset (.json)"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn decode(&self, path: &Path) -> Result<Record, LoaderError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::new(format!("Failed to read {:?}: {}", path, e)))?;
        let record = Self::parse(&json)?.with_source(path);

        log::debug!(
            "JsonDatasetLoader: {:?} has {} fields, {} frame(s)",
            path,
            record.fields.len(),
            record.pixels.as_ref().map_or(0, |p| p.frame_count())
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FieldValue, PixelData};

    #[test]
    fn test_parse_fields_and_pixels() {
        let json = r#"{
            "fields": [
                { "name": "PatientName", "value": "Doe^Jane" },
                { "name": "Rows", "value": 2 },
                { "name": "SliceThickness", "value": 1.25 },
                { "name": "PixelSpacing", "value": [0.5, 0.5] },
                { "name": "StudyID", "value": null }
            ],
            "pixels": { "single": { "v": 1, "dim": [2, 2], "data": [0.0, 1.0, 2.0, 3.0] } }
        }"#;

        let record = JsonDatasetLoader::parse(json).unwrap();
        assert_eq!(record.get("PatientName"), Some(&FieldValue::from("Doe^Jane")));
        assert_eq!(record.get("Rows"), Some(&FieldValue::Integer(2)));
        assert_eq!(record.get("SliceThickness"), Some(&FieldValue::Decimal(1.25)));
        assert_eq!(record.get("StudyID"), Some(&FieldValue::Empty));
        assert_eq!(record.get("PixelSpacing").unwrap().to_string(), "0.5\\0.5");

        match record.pixels {
            Some(PixelData::Single(frame)) => assert_eq!(frame.dim(), (2, 2)),
            other => panic!("unexpected pixels: {:?}", other),
        }
    }

    #[test]
    fn test_missing_pixels_is_allowed() {
        let record = JsonDatasetLoader::parse(r#"{ "fields": [] }"#).unwrap();
        assert!(record.pixels.is_none());
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = JsonDatasetLoader::parse("{ not json").unwrap_err();
        assert!(err.message.contains("Invalid dataset JSON"));
    }

    #[test]
    fn test_decode_sets_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, r#"{ "fields": [ { "name": "Modality", "value": "MR" } ] }"#).unwrap();

        let record = JsonDatasetLoader.decode(&path).unwrap();
        assert_eq!(record.source.as_deref(), Some(path.as_path()));
    }
}
