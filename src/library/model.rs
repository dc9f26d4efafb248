use std::path::PathBuf;
use std::time::Duration;

/// One audio file found by the scanner.
#[derive(Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}
