//! Sounds
//!
//! Playback is not implemented; a [`Sound`] only remembers its file and
//! tracks the state it would be in.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Playback state of a [`Sound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// A sound file.
#[derive(Debug, Clone)]
pub struct Sound {
    path: PathBuf,
    state: PlaybackState,
}

impl Sound {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: PlaybackState::Stopped,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn play(&mut self) {
        debug!("Sound {:?}: play", self.path);
        self.state = PlaybackState::Playing;
    }

    /// Pause if playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            debug!("Sound {:?}: pause", self.path);
            self.state = PlaybackState::Paused;
        }
    }

    pub fn stop(&mut self) {
        debug!("Sound {:?}: stop", self.path);
        self.state = PlaybackState::Stopped;
    }
}
