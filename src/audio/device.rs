use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::playlist::{PlaybackDevice, PlaybackError};

use super::sink::build_sink_at;

/// Playback device over a rodio output stream.
///
/// Elapsed time is tracked with a start instant plus the time accumulated
/// across pauses. Seeking rebuilds the sink with `skip_duration`, which works
/// for the common formats without needing a seekable decoder.
pub struct RodioDevice {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    duration: Option<Duration>,
    started_at: Option<Instant>,
    accumulated: Duration,
    volume: f32,
}

impl RodioDevice {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, rodio::StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            duration: None,
            started_at: None,
            accumulated: Duration::ZERO,
            volume: 1.0,
        })
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |at| at.elapsed())
    }
}

impl PlaybackDevice for RodioDevice {
    fn set_source(&mut self, source: &Path) -> Result<(), PlaybackError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.started_at = None;
        self.accumulated = Duration::ZERO;

        let (sink, duration) = build_sink_at(&self.stream, source, Duration::ZERO)?;
        sink.set_volume(self.volume);
        self.sink = Some(sink);
        self.source = Some(source.to_path_buf());
        self.duration = duration;
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let Some(sink) = self.sink.as_ref() else {
            return Err(PlaybackError::NoSource);
        };
        sink.play();
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        if let Some(at) = self.started_at.take() {
            self.accumulated += at.elapsed();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
            self.started_at = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.source = None;
        self.duration = None;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn position(&self) -> Duration {
        let elapsed = self.elapsed();
        match self.duration {
            Some(total) => elapsed.min(total),
            None => elapsed,
        }
    }

    fn seek_to(&mut self, position: Duration) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let position = match self.duration {
            Some(total) => position.min(total),
            None => position,
        };
        let was_playing = self.started_at.is_some();

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let Ok((sink, duration)) = build_sink_at(&self.stream, &source, position) else {
            // The file was readable moments ago; treat a failed rebuild as a stop.
            self.stop();
            return;
        };
        sink.set_volume(self.volume);
        if was_playing {
            sink.play();
            self.started_at = Some(Instant::now());
        } else {
            self.started_at = None;
        }
        self.accumulated = position;
        self.duration = duration.or(self.duration);
        self.sink = Some(sink);
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.empty())
    }
}
