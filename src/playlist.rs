//! Playlist core: the controller state machine and the playback device
//! capability it drives.

mod controller;
mod device;
mod track;

pub use controller::{PlaybackState, PlaylistController};
pub use device::{PlaybackDevice, PlaybackError};
pub use track::Track;

use thiserror::Error;

/// Raised at startup when the scan produced no playable tracks. Fatal to the
/// controller; there is nothing to control.
#[derive(Debug, Error)]
#[error("playlist is empty, nothing to play")]
pub struct EmptyPlaylistError;
