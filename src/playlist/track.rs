use std::path::PathBuf;
use std::time::Duration;

/// One playable entry in the ordered playlist.
#[derive(Clone)]
pub struct Track {
    /// Stable zero-based position in the playlist.
    pub index: usize,
    /// Path to the audio content.
    pub source: PathBuf,
    /// Text label shown in the playlist.
    pub display: String,
    /// Total length, when the scanner could read it.
    pub duration: Option<Duration>,
    /// Whether this entry is the one loaded into the playback device.
    /// At most one entry is active at any time; the controller enforces it.
    pub(super) active: bool,
}

impl Track {
    pub fn is_active(&self) -> bool {
        self.active
    }
}
