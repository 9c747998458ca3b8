//! Decoded dataset record: open metadata field set plus optional pixel buffer.

use std::fmt;
use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::FRAME_COUNT_FIELD;

/// A single metadata value.
///
/// The field set of a record is not known at compile time, so values are
/// carried as a small tagged union rather than typed struct members.
///
/// JSON has no NaN or infinity, so a non-finite `Decimal` is written as its
/// text form (`"NaN"`, `"inf"`) and reads back as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value present (zero-length element)
    Empty,
    /// Whole number
    Integer(i64),
    /// Floating point number
    #[serde(serialize_with = "serialize_decimal")]
    Decimal(f64),
    /// Free text, names, identifiers, dates
    Text(String),
    /// Multi-valued element
    Multi(Vec<FieldValue>),
}

fn serialize_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.collect_str(value)
    }
}

impl FieldValue {
    /// Interpret the value as an integer.
    ///
    /// Text is accepted when it parses after trimming, since many formats
    /// store counts as numeric strings.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Decimal(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Borrow the value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Multi(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Decimal(v)
    }
}

/// One named field, as stored in [`Fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field keyword (e.g. `PatientName`)
    pub name: String,
    /// Field value
    pub value: FieldValue,
}

/// Ordered name → value mapping.
///
/// Preserves the decoder's enumeration order, which is the order shown to
/// the user. Lookups are linear; records carry at most a few hundred fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Vec<Field>);

impl Fields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Whether a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|f| f.name == name)
    }

    /// Insert or replace a field. New fields are appended; replaced fields
    /// keep their position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.0.push(Field { name, value }),
        }
    }

    /// Replace an existing field. Returns `false` (and creates nothing) if
    /// the field is absent.
    pub fn replace(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        match self.0.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Iterate fields in order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> + '_ {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<FieldValue>> FromIterator<(N, V)> for Fields {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.set(name, value);
        }
        fields
    }
}

/// Raw pixel intensities of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelData {
    /// Single frame, (rows, columns)
    Single(Array2<f32>),
    /// Multiple frames, (frames, rows, columns)
    MultiFrame(Array3<f32>),
}

impl PixelData {
    /// Number of frames in the buffer.
    pub fn frame_count(&self) -> usize {
        match self {
            PixelData::Single(_) => 1,
            PixelData::MultiFrame(frames) => frames.len_of(Axis(0)),
        }
    }

    /// Borrow a single frame. Index 0 is the only valid index for a
    /// single-frame buffer.
    pub fn frame(&self, index: usize) -> Option<ArrayView2<'_, f32>> {
        match self {
            PixelData::Single(frame) if index == 0 => Some(frame.view()),
            PixelData::Single(_) => None,
            PixelData::MultiFrame(frames) if index < frames.len_of(Axis(0)) => {
                Some(frames.index_axis(Axis(0), index))
            }
            PixelData::MultiFrame(_) => None,
        }
    }

    /// Frame dimensions as (rows, columns).
    pub fn frame_shape(&self) -> (usize, usize) {
        match self {
            PixelData::Single(frame) => frame.dim(),
            PixelData::MultiFrame(frames) => {
                let (_, rows, cols) = frames.dim();
                (rows, cols)
            }
        }
    }
}

/// One decoded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Metadata fields in decoder order
    pub fields: Fields,
    /// Pixel buffer, if the file carries image data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixels: Option<PixelData>,
    /// File the record was decoded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Record {
    /// Create a record from fields and an optional pixel buffer.
    pub fn new(fields: Fields, pixels: Option<PixelData>) -> Self {
        Self {
            fields,
            pixels,
            source: None,
        }
    }

    /// Remember the file this record was decoded from.
    pub fn with_source(mut self, path: impl AsRef<Path>) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Declared frame count (`NumberOfFrames`), if present and numeric.
    pub fn frame_count(&self) -> Option<i64> {
        self.fields.get(FRAME_COUNT_FIELD).and_then(FieldValue::as_integer)
    }
}
