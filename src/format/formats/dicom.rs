//! DICOM writer.
//!
//! Records decoded from DICOM keep a reference to their source file. The
//! writer re-reads that file, applies every text field whose value differs
//! from the source element, and writes the result as a new Part 10 file.
//! Pixel data and non-text elements are carried over from the source as-is.

use std::path::Path;

use dicom_core::header::Header;
use dicom_core::value::{PrimitiveValue, Value};
use dicom_core::{DataElement, Tag, VR};
use dicom_object::open_file;

use crate::data::Record;
use crate::data::loaders::DicomLoader;
use crate::format::error::WriteError;
use crate::format::traits::DatasetWriter;

/// Writes records back into DICOM files.
pub struct DicomWriter;

impl DatasetWriter for DicomWriter {
    fn id(&self) -> &'static str {
        "dicom"
    }

    fn display_name(&self) -> &'static str {
        "DICOM (.dcm)"
    }

    fn extension(&self) -> &'static str {
        "dcm"
    }

    fn write(&self, record: &Record, path: &Path) -> Result<(), WriteError> {
        let source = record.source.as_deref().ok_or(WriteError::MissingSource)?;
        let mut obj = open_file(source).map_err(|e| WriteError::SourceUnreadable {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut changes: Vec<(Tag, VR, String)> = Vec::new();
        for element in obj.iter() {
            if !matches!(element.value(), Value::Primitive(_)) {
                continue;
            }
            let tag = element.tag();
            let Some(text) = record
                .get(&DicomLoader::keyword(tag))
                .and_then(|value| value.as_text())
            else {
                continue;
            };
            let current = element
                .to_str()
                .map(|s| s.trim_end_matches(['\0', ' ']).trim().to_string())
                .unwrap_or_default();
            if current != text {
                changes.push((tag, element.vr(), text.to_string()));
            }
        }

        for (tag, vr, text) in changes {
            log::trace!("DicomWriter: updating {} on {:?}", DicomLoader::keyword(tag), path);
            obj.put(DataElement::new(tag, vr, PrimitiveValue::from(text)));
        }

        obj.write_to_file(path)
            .map_err(|e| WriteError::encode(e.to_string()))?;
        log::debug!("Wrote DICOM file {:?}", path);
        Ok(())
    }
}
