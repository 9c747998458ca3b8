//! Viewer session: the loaded collection, its playback and the user commands.

use std::path::Path;

use rand::Rng;

use crate::anonymize::{AnonymizationReport, Anonymizer};
use crate::config::Preferences;
use crate::data::{DecoderRegistry, Record};
use crate::error::ViewerError;
use crate::format::DatasetWriter;
use crate::metadata::{self, FieldEntry, MainElements};
use crate::playback::{FramePlayer, PlaybackState, TickSource};
use crate::render::{NormalizedBuffer, Tile, TileLayout, build_tiles, normalize_frame};
use crate::state::collection::{Collection, CollectionMode};

/// What the presentation layer should show for the current collection.
#[derive(Debug, Clone, Copy)]
pub enum DisplayPlan<'a> {
    /// Animate the frames of one record
    Cine {
        /// Record being played
        record: &'a Record,
        /// Current playback position
        playback: PlaybackState,
    },
    /// Show every record as a static tile
    Tiles {
        /// Records in tile order
        records: &'a [Record],
        /// Grid layout
        layout: TileLayout,
    },
}

/// Owns the loaded collection and the playback state machine.
///
/// All user actions are methods here; front ends only translate input into
/// these calls and render what comes back.
pub struct ViewerSession {
    registry: DecoderRegistry,
    prefs: Preferences,
    collection: Option<Collection>,
    player: FramePlayer,
}

impl ViewerSession {
    /// Create a session with no collection loaded.
    pub fn new(registry: DecoderRegistry, prefs: Preferences) -> Self {
        Self {
            registry,
            prefs,
            collection: None,
            player: FramePlayer::Stopped,
        }
    }

    /// Active preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Loaded collection, if any.
    pub fn collection(&self) -> Option<&Collection> {
        self.collection.as_ref()
    }

    /// Playback state machine.
    pub fn player(&self) -> &FramePlayer {
        &self.player
    }

    /// Tile grid layout from preferences.
    pub fn tile_layout(&self) -> TileLayout {
        TileLayout::new(self.prefs.tile_columns)
    }

    /// Load every dataset file in `folder`, replacing the current collection.
    ///
    /// The new collection is decoded and its playback prepared before
    /// anything is replaced, so on error the previous collection and its
    /// playback are left untouched.
    pub fn load_folder(&mut self, folder: &Path) -> Result<&Collection, ViewerError> {
        let collection = Collection::load(folder, &self.registry, &self.prefs.file_extensions)?;

        let mut player = FramePlayer::Stopped;
        if let CollectionMode::Volume(record) = collection.mode() {
            let frames = record.pixels.as_ref().map_or(0, |pixels| pixels.frame_count());
            player.start(frames, self.prefs.frame_interval())?;
        }

        self.player.stop();
        self.player = player;
        log::info!(
            "Showing {:?} as {}",
            folder,
            if collection.is_volume() { "cine loop" } else { "tiles" }
        );
        Ok(self.collection.insert(collection))
    }

    /// Drop the current collection and stop playback.
    pub fn close(&mut self) {
        self.player.stop();
        self.collection = None;
    }

    fn loaded(&self) -> Result<&Collection, ViewerError> {
        self.collection.as_ref().ok_or(ViewerError::NoCollection)
    }

    /// Describe what to display for the loaded collection.
    pub fn display_plan(&self) -> Result<DisplayPlan<'_>, ViewerError> {
        let collection = self.loaded()?;
        match (collection.mode(), self.player.state()) {
            (CollectionMode::Volume(record), Some(playback)) => Ok(DisplayPlan::Cine {
                record,
                playback: *playback,
            }),
            (CollectionMode::Volume(_), None) => Err(ViewerError::EmptyVolume),
            (CollectionMode::MultiFile(records), _) => Ok(DisplayPlan::Tiles {
                records,
                layout: self.tile_layout(),
            }),
        }
    }

    /// Normalized tiles for multi-file mode. Empty in cine mode.
    pub fn tiles(&self) -> Result<Vec<Tile>, ViewerError> {
        match self.display_plan()? {
            DisplayPlan::Tiles { records, layout } => build_tiles(records, layout),
            DisplayPlan::Cine { .. } => Ok(Vec::new()),
        }
    }

    /// Normalized frame at the current playback position, or `None` outside
    /// cine mode.
    pub fn current_frame(&self) -> Result<Option<NormalizedBuffer>, ViewerError> {
        let DisplayPlan::Cine { record, playback } = self.display_plan()? else {
            return Ok(None);
        };
        record
            .pixels
            .as_ref()
            .and_then(|pixels| normalize_frame(pixels, playback.current_frame_index()))
            .map(Some)
            .ok_or(ViewerError::MissingPixelData { index: 0 })
    }

    /// Advance playback if `ticks` has a tick due and return the new frame.
    ///
    /// Returns `None` when no tick was due or nothing is playing.
    pub fn poll_playback(&mut self, ticks: &mut impl TickSource) -> Result<Option<NormalizedBuffer>, ViewerError> {
        if self.player.poll(ticks).is_none() {
            return Ok(None);
        }
        self.current_frame()
    }

    /// Flattened metadata of record `index`.
    pub fn fields(&self, index: usize) -> Result<Vec<FieldEntry>, ViewerError> {
        let collection = self.loaded()?;
        collection
            .records()
            .get(index)
            .map(metadata::fields)
            .ok_or(ViewerError::RecordOutOfRange {
                index,
                len: collection.len(),
            })
    }

    /// Metadata of record `index` whose names contain `query`.
    pub fn filter_fields(&self, index: usize, query: &str) -> Result<Vec<FieldEntry>, ViewerError> {
        let entries = self.fields(index)?;
        Ok(metadata::filter_fields(&entries, query).into_iter().cloned().collect())
    }

    /// Main-elements summary of the first record.
    pub fn summary(&self) -> Result<MainElements, ViewerError> {
        Ok(metadata::summarize(self.loaded()?.first()))
    }

    /// Anonymize the loaded collection in place and write it to
    /// `output_folder`.
    pub fn anonymize<R: Rng + ?Sized>(
        &mut self,
        prefix: &str,
        output_folder: &Path,
        writer: &dyn DatasetWriter,
        rng: &mut R,
    ) -> Result<AnonymizationReport, ViewerError> {
        let anonymizer = Anonymizer::from_preferences(&self.prefs);
        let collection = self.collection.as_mut().ok_or(ViewerError::NoCollection)?;
        anonymizer.anonymize(collection, prefix, output_folder, writer, rng)
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(DecoderRegistry::new(), Preferences::default())
    }
}
