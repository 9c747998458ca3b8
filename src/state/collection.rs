//! In-memory collection of decoded records and its display classification.

use std::path::{Path, PathBuf};

use crate::data::{DecoderRegistry, Record};
use crate::error::ViewerError;
use crate::state::discovery::discover_files;

/// How a collection is displayed.
#[derive(Debug, Clone, Copy)]
pub enum CollectionMode<'a> {
    /// First record is a multi-frame volume, played back as a cine loop
    Volume(&'a Record),
    /// Every record is shown as a static tile
    MultiFile(&'a [Record]),
}

impl CollectionMode<'_> {
    /// Whether this is the single-volume mode.
    pub fn is_volume(&self) -> bool {
        matches!(self, CollectionMode::Volume(_))
    }
}

/// Decide between single-volume and multi-file display.
///
/// Only the first record is inspected: if it declares more than one frame the
/// collection is a volume, and only that record is displayed.
pub fn classify(records: &[Record]) -> Result<CollectionMode<'_>, ViewerError> {
    let first = records.first().ok_or_else(|| ViewerError::EmptyCollection {
        folder: PathBuf::new(),
    })?;
    Ok(mode_for(first, records))
}

fn mode_for<'a>(first: &'a Record, records: &'a [Record]) -> CollectionMode<'a> {
    match first.frame_count() {
        Some(frames) if frames > 1 => CollectionMode::Volume(first),
        _ => CollectionMode::MultiFile(records),
    }
}

/// Records from one load, in discovery order. Never empty.
#[derive(Debug, Clone)]
pub struct Collection {
    records: Vec<Record>,
    folder: PathBuf,
}

impl Collection {
    /// Wrap decoded records. Fails if there are none.
    pub fn new(records: Vec<Record>, folder: impl Into<PathBuf>) -> Result<Self, ViewerError> {
        let folder = folder.into();
        if records.is_empty() {
            return Err(ViewerError::EmptyCollection { folder });
        }
        Ok(Self { records, folder })
    }

    /// Discover and decode every matching file in `folder`.
    ///
    /// Any decode failure aborts the whole load; there is no skip-and-continue.
    pub fn load(
        folder: &Path,
        registry: &DecoderRegistry,
        extensions: &[impl AsRef<str>],
    ) -> Result<Self, ViewerError> {
        let files = discover_files(folder, extensions)?;
        if files.is_empty() {
            log::warn!("No dataset files found in {:?}", folder);
            return Err(ViewerError::EmptyCollection {
                folder: folder.to_path_buf(),
            });
        }

        let records = files
            .into_iter()
            .map(|path| {
                registry
                    .decode(&path)
                    .map_err(|source| ViewerError::DecodeFailure { path, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Loaded {} records from {:?}", records.len(), folder);
        Self::new(records, folder)
    }

    /// Display classification, derived from the first record.
    pub fn mode(&self) -> CollectionMode<'_> {
        mode_for(&self.records[0], &self.records)
    }

    /// Whether the collection is displayed as a single volume.
    pub fn is_volume(&self) -> bool {
        self.mode().is_volume()
    }

    /// First record; used for tags and the summary.
    pub fn first(&self) -> &Record {
        &self.records[0]
    }

    /// All records in collection order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access for in-place operations such as anonymization.
    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    /// Folder the collection was loaded from.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
