//! Sink construction for the rodio device.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::playlist::PlaybackError;

/// Open and decode `source`, returning a paused `Sink` positioned at
/// `start_at` together with the total duration when the decoder knows it.
pub(super) fn build_sink_at(
    stream: &OutputStream,
    source: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), PlaybackError> {
    let file = File::open(source).map_err(|err| PlaybackError::Open {
        path: source.to_path_buf(),
        source: err,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|err| PlaybackError::Decode {
        path: source.to_path_buf(),
        reason: err.to_string(),
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is the seeking primitive; Duration::ZERO is a plain start.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();

    Ok((sink, total))
}
