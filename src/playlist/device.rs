//! The playback device capability consumed by the controller.
//!
//! The real implementation lives in `crate::audio` on top of rodio; the
//! controller tests drive an in-memory fake instead.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Errors the device can produce when loading or starting a source.
///
/// These are terminal for the operation that caused them; nothing retries.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("no source loaded")]
    NoSource,
}

/// External media-rendering capability: source, play/pause, position,
/// volume, duration and an end-of-content signal.
pub trait PlaybackDevice {
    /// Load `source` into the device, replacing whatever was loaded before.
    /// Leaves the device paused at position zero.
    fn set_source(&mut self, source: &Path) -> Result<(), PlaybackError>;

    /// Begin playback of the loaded source.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn resume(&mut self);

    /// Stop playback and unload the current source.
    fn stop(&mut self);

    /// Elapsed playback position of the loaded source.
    fn position(&self) -> Duration;

    /// Move the playback position. Implementations clamp to the duration.
    fn seek_to(&mut self, position: Duration);

    /// Total length of the loaded source, when known.
    fn duration(&self) -> Option<Duration>;

    /// Playback gain in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);

    fn volume(&self) -> f32;

    /// True once the loaded source has played to its end.
    fn finished(&self) -> bool;
}
