//! Loader for DICOM Part 10 files (`.dcm`).
//!
//! Metadata elements are exposed under their standard dictionary keyword
//! (e.g. `PatientName`); elements without a keyword (private tags) use
//! `(GGGG,EEEE)`. Pixel data is decoded with `dicom-pixeldata`, with the
//! modality LUT applied, into a 2-D or 3-D `f32` buffer. Multi-sample
//! (color) images are averaged to a single intensity channel.

use std::path::Path;

use dicom_core::dictionary::DataDictionary;
use dicom_core::header::Header;
use dicom_core::value::Value;
use dicom_core::{Tag, VR};
use dicom_dictionary_std::{StandardDataDictionary, tags};
use dicom_object::{DefaultDicomObject, InMemDicomObject, open_file};
use dicom_pixeldata::PixelDecoder;
use ndarray::{Array2, Array3};

use crate::data::loader::{DatasetDecoder, LoaderError};
use crate::data::{FieldValue, Fields, PixelData, Record};

type InMemElement = dicom_core::DataElement<InMemDicomObject>;

/// Loader for DICOM files.
pub struct DicomLoader;

impl DicomLoader {
    /// Field name used for an element: dictionary keyword, or the tag itself.
    pub fn keyword(tag: Tag) -> String {
        StandardDataDictionary
            .by_tag(tag)
            .map(|entry| entry.alias.to_string())
            .unwrap_or_else(|| format!("({:04X},{:04X})", tag.group(), tag.element()))
    }

    fn field_value(element: &InMemElement) -> FieldValue {
        match element.value() {
            Value::Sequence(seq) => {
                return FieldValue::Text(format!("<sequence of {} item(s)>", seq.items().len()));
            }
            Value::PixelSequence(_) => return FieldValue::Text("<encapsulated data>".to_string()),
            Value::Primitive(_) => {}
        }

        let Ok(text) = element.to_str() else {
            return FieldValue::Empty;
        };
        let text = text.trim_end_matches(['\0', ' ']).to_string();
        if text.is_empty() {
            return FieldValue::Empty;
        }

        let parts: Vec<&str> = text.split('\\').collect();
        if parts.len() > 1 {
            return FieldValue::Multi(
                parts
                    .into_iter()
                    .map(|p| Self::scalar(element.vr(), p.trim()))
                    .collect(),
            );
        }

        Self::scalar(element.vr(), text.trim())
    }

    fn scalar(vr: VR, text: &str) -> FieldValue {
        match vr {
            VR::IS | VR::SS | VR::US | VR::SL | VR::UL | VR::SV | VR::UV => text
                .parse::<i64>()
                .map(FieldValue::Integer)
                .unwrap_or_else(|_| FieldValue::Text(text.to_string())),
            VR::DS | VR::FL | VR::FD => text
                .parse::<f64>()
                .map(FieldValue::Decimal)
                .unwrap_or_else(|_| FieldValue::Text(text.to_string())),
            _ => FieldValue::Text(text.to_string()),
        }
    }

    fn read_fields(obj: &DefaultDicomObject) -> Fields {
        let mut fields = Fields::new();
        for element in obj.iter() {
            let tag = element.tag();
            if tag == tags::PIXEL_DATA {
                continue;
            }
            fields.set(Self::keyword(tag), Self::field_value(element));
        }
        fields
    }

    fn read_pixels(obj: &DefaultDicomObject) -> Result<Option<PixelData>, LoaderError> {
        if obj.element_opt(tags::PIXEL_DATA).ok().flatten().is_none() {
            return Ok(None);
        }

        let decoded = obj
            .decode_pixel_data()
            .map_err(|e| LoaderError::new(format!("Failed to decode pixel data: {}", e)))?;
        let array = decoded
            .to_ndarray::<f32>()
            .map_err(|e| LoaderError::new(format!("Failed to convert pixel data: {}", e)))?;

        // (frames, rows, columns, samples)
        let shape = array.shape().to_vec();
        let &[frames, rows, cols, samples] = shape.as_slice() else {
            return Err(LoaderError::new(format!(
                "Unexpected pixel array shape {:?}",
                shape
            )));
        };

        let raw: Vec<f32> = array.iter().copied().collect();
        let values: Vec<f32> = if samples > 1 {
            raw.chunks(samples)
                .map(|px| px.iter().sum::<f32>() / samples as f32)
                .collect()
        } else {
            raw
        };

        let pixels = if frames > 1 {
            Array3::from_shape_vec((frames, rows, cols), values)
                .map(PixelData::MultiFrame)
        } else {
            Array2::from_shape_vec((rows, cols), values).map(PixelData::Single)
        }
        .map_err(|e| LoaderError::new(format!("Pixel buffer shape mismatch: {}", e)))?;

        Ok(Some(pixels))
    }
}

impl DatasetDecoder for DicomLoader {
    fn id(&self) -> &'static str {
        "dicom"
    }

    fn display_name(&self) -> &'static str {
        "DICOM (.dcm)"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["dcm"]
    }

    fn decode(&self, path: &Path) -> Result<Record, LoaderError> {
        let obj = open_file(path)
            .map_err(|e| LoaderError::new(format!("Failed to open {:?}: {}", path, e)))?;

        let fields = Self::read_fields(&obj);
        let pixels = Self::read_pixels(&obj)?;

        log::debug!(
            "DicomLoader: {:?} has {} elements, {} frame(s)",
            path,
            fields.len(),
            pixels.as_ref().map_or(0, PixelData::frame_count)
        );

        Ok(Record::new(fields, pixels).with_source(path))
    }

    fn priority(&self) -> i32 {
        10
    }
}
