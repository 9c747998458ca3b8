//! Viewer state: folder discovery, the loaded collection and the session
//! that ties them to playback.

mod collection;
mod discovery;
mod session;

pub use collection::{Collection, CollectionMode, classify};
pub use discovery::{discover_files, has_extension};
pub use session::{DisplayPlan, ViewerSession};
