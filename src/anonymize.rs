//! De-identification of a loaded collection.
//!
//! Identity fields of every record are replaced by `prefix + random digits`
//! and each record is written to the output folder as
//! `anonymized_<N>.<ext>`. Records are mutated in place: after a run the
//! loaded collection shows the anonymized values too.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::config::Preferences;
use crate::constants::{ANONYMIZED_FIELDS, ANONYMIZED_FILE_STEM, DEFAULT_TOKEN_LENGTH};
use crate::data::{FieldValue, Record};
use crate::error::ViewerError;
use crate::format::DatasetWriter;
use crate::state::Collection;

/// `len` uniformly random decimal digits. Tokens are not unique.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Outcome of a successful anonymization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymizationReport {
    /// Files written, in collection order
    pub files: Vec<PathBuf>,
    /// Number of field values replaced across all records
    pub replaced_fields: usize,
}

/// Field replacement settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anonymizer {
    fields: Vec<String>,
    token_length: usize,
}

impl Anonymizer {
    /// Create an anonymizer rewriting `fields` with tokens of `token_length`
    /// digits.
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>, token_length: usize) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            token_length,
        }
    }

    /// Settings from user preferences.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self::new(prefs.anonymized_fields.iter().cloned(), prefs.token_length)
    }

    /// Fields that get replaced.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Replace the identity fields present in `record`. Absent fields are not
    /// created. Each field gets its own token. Returns the number replaced.
    pub fn anonymize_record<R: Rng + ?Sized>(&self, record: &mut Record, prefix: &str, rng: &mut R) -> usize {
        let mut replaced = 0;
        for name in &self.fields {
            if !record.fields.contains(name) {
                continue;
            }
            let value = format!("{}{}", prefix, random_token(rng, self.token_length));
            if record.fields.replace(name, FieldValue::Text(value)) {
                replaced += 1;
            }
        }
        replaced
    }

    /// Anonymize every record of `collection` and write it through `writer`.
    ///
    /// An empty or whitespace-only prefix fails before anything is touched.
    /// All records are rewritten first, then written in collection order. A
    /// failed write stops the batch: files already written stay on disk and
    /// the in-memory records stay rewritten.
    pub fn anonymize<R: Rng + ?Sized>(
        &self,
        collection: &mut Collection,
        prefix: &str,
        output_folder: &Path,
        writer: &dyn DatasetWriter,
        rng: &mut R,
    ) -> Result<AnonymizationReport, ViewerError> {
        if prefix.trim().is_empty() {
            return Err(ViewerError::InvalidPrefix);
        }

        let replaced_fields: usize = collection
            .records_mut()
            .iter_mut()
            .map(|record| self.anonymize_record(record, prefix, rng))
            .sum();
        log::debug!(
            "Replaced {} identity fields across {} records",
            replaced_fields,
            collection.len()
        );

        std::fs::create_dir_all(output_folder)?;

        let mut files = Vec::with_capacity(collection.len());
        for (i, record) in collection.records().iter().enumerate() {
            let index = i + 1;
            let path = output_folder.join(output_file_name(index, writer.extension()));
            writer
                .write(record, &path)
                .map_err(|source| ViewerError::AnonymizationWriteFailed {
                    index,
                    path: path.clone(),
                    source,
                })?;
            log::debug!("Wrote anonymized record {} to {:?}", index, path);
            files.push(path);
        }

        log::info!(
            "Anonymized {} records into {:?} ({} fields replaced)",
            files.len(),
            output_folder,
            replaced_fields
        );
        Ok(AnonymizationReport {
            files,
            replaced_fields,
        })
    }
}

impl Default for Anonymizer {
    fn default() -> Self {
        Self::new(ANONYMIZED_FIELDS.iter().copied(), DEFAULT_TOKEN_LENGTH)
    }
}

/// `anonymized_<index>.<ext>`, index 1-based.
pub fn output_file_name(index: usize, extension: &str) -> String {
    format!("{}_{}.{}", ANONYMIZED_FILE_STEM, index, extension)
}

/// Anonymize with the default field list and token length.
pub fn anonymize<R: Rng + ?Sized>(
    collection: &mut Collection,
    prefix: &str,
    output_folder: &Path,
    writer: &dyn DatasetWriter,
    rng: &mut R,
) -> Result<AnonymizationReport, ViewerError> {
    Anonymizer::default().anonymize(collection, prefix, output_folder, writer, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::formats::JsonDatasetWriter;
    use crate::testing::{FailingWriter, sample_slice};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn collection(count: usize) -> Collection {
        Collection::new((0..count).map(|i| sample_slice(i, 2, 2)).collect(), "/data").unwrap()
    }

    fn is_token(value: &FieldValue, prefix: &str) -> bool {
        let Some(text) = value.as_text() else {
            return false;
        };
        text.strip_prefix(prefix)
            .is_some_and(|digits| digits.len() == 5 && digits.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn test_random_token() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = random_token(&mut rng, 5);
        assert_eq!(token.len(), 5);
        assert!(token.chars().all(|c| c.is_ascii_digit()));
        assert!(random_token(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_seeded_tokens_repeat() {
        let a = random_token(&mut StdRng::seed_from_u64(42), 5);
        let b = random_token(&mut StdRng::seed_from_u64(42), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_replaces_present_fields_only() {
        let mut record = sample_slice(0, 2, 2);
        record.fields = record
            .fields
            .iter()
            .filter(|f| f.name != "StudyID")
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();

        let mut rng = StdRng::seed_from_u64(1);
        let replaced = Anonymizer::default().anonymize_record(&mut record, "ANON", &mut rng);

        assert_eq!(replaced, 2);
        assert!(is_token(record.get("PatientName").unwrap(), "ANON"));
        assert!(is_token(record.get("PatientID").unwrap(), "ANON"));
        assert!(record.get("StudyID").is_none());
        assert_eq!(record.get("Modality"), Some(&FieldValue::from("CT")));
    }

    #[test]
    fn test_blank_prefix_rejected_without_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut collection = collection(2);
        let before = collection.records().to_vec();
        let mut rng = StdRng::seed_from_u64(1);

        for prefix in ["", "   "] {
            let err = anonymize(&mut collection, prefix, &out, &JsonDatasetWriter, &mut rng).unwrap_err();
            assert!(matches!(err, ViewerError::InvalidPrefix));
        }
        assert_eq!(collection.records(), before.as_slice());
        assert!(!out.exists());
    }

    #[test]
    fn test_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let mut collection = collection(3);
        let mut rng = StdRng::seed_from_u64(3);

        let report = anonymize(&mut collection, "ANON", &out, &JsonDatasetWriter, &mut rng).unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.replaced_fields, 9);
        for i in 1..=3 {
            assert!(out.join(format!("anonymized_{}.json", i)).exists());
        }
        assert!(
            collection
                .records()
                .iter()
                .all(|r| is_token(r.get("PatientID").unwrap(), "ANON"))
        );

        let written = std::fs::read_to_string(&report.files[0]).unwrap();
        assert!(!written.contains("Doe"));
    }

    #[test]
    fn test_prefix_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = collection(1);
        let mut rng = StdRng::seed_from_u64(5);

        anonymize(&mut collection, " X ", dir.path(), &JsonDatasetWriter, &mut rng).unwrap();
        assert!(is_token(collection.first().get("PatientName").unwrap(), " X "));
    }

    #[test]
    fn test_configured_fields_and_length() {
        let anonymizer = Anonymizer::new(["Modality"], 3);
        let mut record = sample_slice(0, 2, 2);
        let mut rng = StdRng::seed_from_u64(9);

        assert_eq!(anonymizer.anonymize_record(&mut record, "M", &mut rng), 1);
        let modality = record.get("Modality").and_then(FieldValue::as_text).unwrap();
        assert_eq!(modality.len(), 4);
        assert!(record.get("PatientName").unwrap().as_text().unwrap().starts_with("Doe"));
    }

    #[test]
    fn test_partial_write_keeps_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = collection(4);
        let writer = FailingWriter::failing_at(3);
        let mut rng = StdRng::seed_from_u64(11);

        let err = anonymize(&mut collection, "ANON", dir.path(), &writer, &mut rng).unwrap_err();
        match err {
            ViewerError::AnonymizationWriteFailed { index, path, .. } => {
                assert_eq!(index, 3);
                assert!(path.ends_with("anonymized_3.json"));
            }
            other => panic!("expected write failure, got {:?}", other),
        }

        assert!(dir.path().join("anonymized_1.json").exists());
        assert!(dir.path().join("anonymized_2.json").exists());
        assert!(!dir.path().join("anonymized_3.json").exists());
        assert!(!dir.path().join("anonymized_4.json").exists());
        // Records stay rewritten even though the batch failed
        assert!(is_token(collection.records()[3].get("StudyID").unwrap(), "ANON"));
    }
}
