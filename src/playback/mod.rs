//! Cine playback for multi-frame volumes.
//!
//! Playback is a small explicit state machine ([`FramePlayer`]) advanced by
//! polling a [`TickSource`]. Nothing runs in the background: the caller polls,
//! handles the tick completely, then polls again, so ticks never overlap.

mod player;
mod ticker;

pub use player::{FramePlayer, PlaybackState};
pub use ticker::{IntervalTicker, ManualTicker, TickSource};
