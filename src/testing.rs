//! Fixtures shared by unit tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{Array2, Array3};

use crate::data::{DatasetDecoder, FieldValue, Fields, LoaderError, PixelData, Record};
use crate::format::formats::JsonDatasetWriter;
use crate::format::{DatasetWriter, WriteError};

/// Single-frame record `i` with a ramp of distinct intensities.
///
/// `InstanceNumber` is `i + 1`; every identity field the anonymizer touches
/// is present.
pub fn sample_slice(i: usize, rows: usize, cols: usize) -> Record {
    let fields: Fields = [
        ("InstanceNumber", FieldValue::Integer(i as i64 + 1)),
        ("PatientName", FieldValue::from("Doe^John")),
        ("PatientID", FieldValue::from(format!("PID{:03}", i))),
        ("StudyID", FieldValue::from("STUDY1")),
        ("Modality", FieldValue::from("CT")),
        ("Rows", FieldValue::Integer(rows as i64)),
        ("Columns", FieldValue::Integer(cols as i64)),
    ]
    .into_iter()
    .collect();

    let pixels = Array2::from_shape_fn((rows, cols), |(r, c)| (i * 100 + r * cols + c) as f32);
    Record::new(fields, Some(PixelData::Single(pixels)))
}

/// Multi-frame record declaring `frames` frames.
pub fn sample_volume(frames: usize, rows: usize, cols: usize) -> Record {
    let fields: Fields = [
        ("PatientName", FieldValue::from("Doe^Jane")),
        ("PatientID", FieldValue::from("VOL001")),
        ("StudyID", FieldValue::from("STUDY2")),
        ("Modality", FieldValue::from("MR")),
        ("Rows", FieldValue::Integer(rows as i64)),
        ("Columns", FieldValue::Integer(cols as i64)),
        ("NumberOfFrames", FieldValue::Integer(frames as i64)),
    ]
    .into_iter()
    .collect();

    let pixels = Array3::from_shape_fn((frames, rows, cols), |(f, r, c)| {
        (f * rows * cols + r * cols + c) as f32
    });
    Record::new(fields, Some(PixelData::MultiFrame(pixels)))
}

/// Write records as JSON files whose sorted order matches `records`.
pub fn write_json_records(dir: &Path, records: &[Record]) {
    for (i, record) in records.iter().enumerate() {
        let path = dir.join(format!("slice_{:03}.json", i));
        JsonDatasetWriter.write(record, &path).unwrap();
    }
}

/// Decoder that always fails, registered for `.bad` files.
pub struct FailingDecoder;

impl DatasetDecoder for FailingDecoder {
    fn id(&self) -> &'static str {
        "failing"
    }

    fn display_name(&self) -> &'static str {
        "Always Failing"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["bad"]
    }

    fn decode(&self, path: &Path) -> Result<Record, LoaderError> {
        Err(LoaderError::new(format!("cannot decode {:?}", path)))
    }
}

/// JSON writer that fails on its n-th call (1-based).
pub struct FailingWriter {
    fail_at: usize,
    calls: AtomicUsize,
}

impl FailingWriter {
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: call,
            calls: AtomicUsize::new(0),
        }
    }
}

impl DatasetWriter for FailingWriter {
    fn id(&self) -> &'static str {
        "failing"
    }

    fn display_name(&self) -> &'static str {
        "Failing JSON"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, record: &Record, path: &Path) -> Result<(), WriteError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_at {
            return Err(WriteError::encode(format!("refusing to write {:?}", path)));
        }
        JsonDatasetWriter.write(record, path)
    }
}

/// Write a minimal uncompressed 16-bit MONOCHROME2 DICOM file.
///
/// Pixel values count up from 0 across frames, rows and columns. Identity
/// fields match [`sample_volume`].
#[cfg(feature = "dicom")]
pub fn write_dicom_volume(path: &Path, frames: u16, rows: u16, cols: u16) {
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};
    use dicom_dictionary_std::tags;
    use dicom_object::{FileMetaTableBuilder, InMemDicomObject};

    const SECONDARY_CAPTURE: &str = "1.2.840.10008.5.1.4.1.1.7";
    const EXPLICIT_VR_LE: &str = "1.2.840.10008.1.2.1";
    const INSTANCE_UID: &str = "1.2.826.0.1.3680043.2.1125.1";

    let pixel_count = usize::from(frames) * usize::from(rows) * usize::from(cols);
    let pixels = PrimitiveValue::U16((0..pixel_count).map(|i| i as u16).collect());

    let obj = InMemDicomObject::from_element_iter([
        DataElement::new(tags::SOP_CLASS_UID, VR::UI, PrimitiveValue::from(SECONDARY_CAPTURE)),
        DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from(INSTANCE_UID)),
        DataElement::new(tags::STUDY_ID, VR::SH, PrimitiveValue::from("STUDY2")),
        DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("MR")),
        DataElement::new(tags::PATIENT_NAME, VR::PN, PrimitiveValue::from("Doe^Jane")),
        DataElement::new(tags::PATIENT_ID, VR::LO, PrimitiveValue::from("VOL001")),
        DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)),
        DataElement::new(
            tags::PHOTOMETRIC_INTERPRETATION,
            VR::CS,
            PrimitiveValue::from("MONOCHROME2"),
        ),
        DataElement::new(
            tags::NUMBER_OF_FRAMES,
            VR::IS,
            PrimitiveValue::from(frames.to_string()),
        ),
        DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(rows)),
        DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(cols)),
        DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)),
        DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16)),
        DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)),
        DataElement::new(tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(0_u16)),
        DataElement::new(tags::PIXEL_DATA, VR::OW, pixels),
    ]);

    let file = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .media_storage_sop_class_uid(SECONDARY_CAPTURE)
                .media_storage_sop_instance_uid(INSTANCE_UID)
                .transfer_syntax(EXPLICIT_VR_LE),
        )
        .unwrap();
    file.write_to_file(path).unwrap();
}
