//! Global constants for dcmview

/// Field holding the number of frames in a multi-frame record
pub const FRAME_COUNT_FIELD: &str = "NumberOfFrames";

/// Identity fields rewritten by the anonymizer
pub const ANONYMIZED_FIELDS: &[&str] = &["PatientName", "PatientID", "StudyID"];

/// Number of random digits appended to the anonymization prefix
pub const DEFAULT_TOKEN_LENGTH: usize = 5;

/// Prefix of anonymized output files (`anonymized_<N>.<ext>`)
pub const ANONYMIZED_FILE_STEM: &str = "anonymized";

/// Columns in the multi-file tile grid
pub const DEFAULT_TILE_COLUMNS: usize = 8;

/// Edge length (pixels) of a tile in the contact sheet
pub const DEFAULT_TILE_SIZE: u32 = 150;

/// Edge length (pixels) of a cine frame in exported previews
pub const DEFAULT_CINE_SIZE: u32 = 400;

/// Cine playback interval in milliseconds
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 100;

/// Placeholder for summary fields missing from a record
pub const NOT_AVAILABLE: &str = "N/A";

