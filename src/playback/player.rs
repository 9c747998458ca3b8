//! Frame playback state machine.

use std::time::Duration;

use crate::error::ViewerError;
use crate::playback::ticker::TickSource;

/// Position of a running cine loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    current_frame_index: usize,
    frame_count: usize,
    interval: Duration,
}

impl PlaybackState {
    /// Frame currently shown. Always `< frame_count()`.
    pub fn current_frame_index(&self) -> usize {
        self.current_frame_index
    }

    /// Number of frames in the loop (at least 1).
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Time between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Cyclic frame index, either stopped or running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePlayer {
    /// No volume is playing
    #[default]
    Stopped,
    /// A volume is playing
    Running(PlaybackState),
}

impl FramePlayer {
    /// Start a new loop at frame 0, replacing any loop already running.
    pub fn start(&mut self, frame_count: usize, interval: Duration) -> Result<PlaybackState, ViewerError> {
        self.stop();
        if frame_count == 0 {
            return Err(ViewerError::EmptyVolume);
        }

        log::debug!("Starting playback: {} frames every {:?}", frame_count, interval);
        let state = PlaybackState {
            current_frame_index: 0,
            frame_count,
            interval,
        };
        *self = FramePlayer::Running(state);
        Ok(state)
    }

    /// Advance one frame, wrapping at the end. Returns the new index, or
    /// `None` when stopped.
    pub fn tick(&mut self) -> Option<usize> {
        let FramePlayer::Running(state) = self else {
            return None;
        };
        state.current_frame_index = (state.current_frame_index + 1) % state.frame_count;
        log::trace!("Playback tick -> frame {}", state.current_frame_index);
        Some(state.current_frame_index)
    }

    /// Advance if `ticks` has a tick due. The tick source is not consulted
    /// while stopped.
    pub fn poll(&mut self, ticks: &mut impl TickSource) -> Option<usize> {
        if !self.is_running() || !ticks.tick_due() {
            return None;
        }
        self.tick()
    }

    /// Halt playback and discard its state.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("Stopping playback");
        }
        *self = FramePlayer::Stopped;
    }

    /// Current state, if running.
    pub fn state(&self) -> Option<&PlaybackState> {
        match self {
            FramePlayer::Running(state) => Some(state),
            FramePlayer::Stopped => None,
        }
    }

    /// Index of the frame currently shown, if running.
    pub fn current_frame_index(&self) -> Option<usize> {
        self.state().map(PlaybackState::current_frame_index)
    }

    /// Whether a loop is running.
    pub fn is_running(&self) -> bool {
        matches!(self, FramePlayer::Running(_))
    }
}
