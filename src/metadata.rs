//! Metadata inspection: flat field listing, name filter and the main-elements
//! summary.

use std::fmt;

use crate::constants::NOT_AVAILABLE;
use crate::data::Record;

/// One displayed metadata row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Field name as decoded
    pub name: String,
    /// Value rendered as text
    pub value: String,
}

/// All fields of a record, in the record's own order.
pub fn fields(record: &Record) -> Vec<FieldEntry> {
    record
        .fields
        .iter()
        .map(|field| FieldEntry {
            name: field.name.clone(),
            value: field.value.to_string(),
        })
        .collect()
}

/// Entries whose name contains `query`, ignoring case. Values are not searched.
///
/// An empty query returns every entry. Order is preserved.
pub fn filter_fields<'a>(entries: &'a [FieldEntry], query: &str) -> Vec<&'a FieldEntry> {
    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query))
        .collect()
}

/// Summary label and the field it reads from.
const SUMMARY_SOURCES: [(&str, &str); 5] = [
    ("Patient Name", "PatientName"),
    ("Patient ID", "PatientID"),
    ("Study Description", "StudyDescription"),
    ("Modality", "Modality"),
    ("Physician's Name", "ReferringPhysicianName"),
];

const DIMENSIONS_LABEL: &str = "Image Dimensions";

/// One labelled summary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Human-readable label
    pub label: &'static str,
    /// Field value, or `N/A`
    pub value: String,
}

/// Six labelled values describing a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainElements {
    entries: Vec<SummaryEntry>,
}

impl MainElements {
    /// Value for a label, if the label exists.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &SummaryEntry> + '_ {
        self.entries.iter()
    }
}

impl fmt::Display for MainElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", entry.label, entry.value)?;
        }
        Ok(())
    }
}

/// Build the main-elements summary of a record.
pub fn summarize(record: &Record) -> MainElements {
    let lookup = |name: &str| {
        record
            .get(name)
            .map(ToString::to_string)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    let mut entries: Vec<SummaryEntry> = SUMMARY_SOURCES
        .into_iter()
        .map(|(label, name)| SummaryEntry {
            label,
            value: lookup(name),
        })
        .collect();

    let dimensions = match (record.get("Rows"), record.get("Columns")) {
        (Some(rows), Some(cols)) => format!("{}x{}", rows, cols),
        _ => NOT_AVAILABLE.to_string(),
    };
    entries.push(SummaryEntry {
        label: DIMENSIONS_LABEL,
        value: dimensions,
    });

    MainElements { entries }
}
