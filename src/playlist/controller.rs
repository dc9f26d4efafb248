//! The playlist controller: mediates between user input and the playback
//! device, owning track activation, next/previous/random selection, seeking
//! and volume.

use std::time::Duration;

use rand::Rng;

use crate::library;

use super::EmptyPlaylistError;
use super::device::{PlaybackDevice, PlaybackError};
use super::track::Track;

/// Where playback currently stands for the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Loading,
    Playing,
    Paused,
}

/// Relative seeks closer to an edge than this window snap to the start
/// (backward) or do nothing (forward). Avoids repeated tiny rewinds near the
/// beginning of a track.
const SEEK_SNAP_WINDOW: Duration = Duration::from_secs(6);

/// Owns the ordered track list, the single active entry and the playback
/// device. All operations run on the event loop thread; `activate` gates
/// itself so at most one activation is ever in flight.
pub struct PlaylistController<D> {
    device: D,
    tracks: Vec<Track>,
    active: Option<usize>,
    random: bool,
    volume: u8,
    state: PlaybackState,
    controls_enabled: bool,
}

impl<D: PlaybackDevice> PlaylistController<D> {
    /// Build the playlist from scanned entries, indexed `0..N-1`, and apply
    /// the startup volume.
    pub fn new(
        entries: Vec<library::Track>,
        device: D,
        initial_volume: u8,
    ) -> Result<Self, EmptyPlaylistError> {
        if entries.is_empty() {
            return Err(EmptyPlaylistError);
        }

        let tracks = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Track {
                index,
                source: entry.path,
                display: entry.display,
                duration: entry.duration,
                active: false,
            })
            .collect();

        let mut controller = Self {
            device,
            tracks,
            active: None,
            random: false,
            volume: 0,
            state: PlaybackState::Stopped,
            controls_enabled: true,
        };
        controller.set_volume(i64::from(initial_volume));
        Ok(controller)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_track(&self) -> Option<&Track> {
        self.active.map(|i| &self.tracks[i])
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_random(&self) -> bool {
        self.random
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn position(&self) -> Duration {
        if self.active.is_some() {
            self.device.position()
        } else {
            Duration::ZERO
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        if self.active.is_some() {
            self.device.duration()
        } else {
            None
        }
    }

    /// Fraction of the current track already played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let Some(duration) = self.duration() else {
            return 0.0;
        };
        if duration.is_zero() {
            return 0.0;
        }
        (self.position().as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Load and start the track at `index`.
    ///
    /// Ignored while a previous activation is still in flight. Every other
    /// entry is deactivated before the device touches the new source, so the
    /// single-active invariant holds through the failure path too. On failure
    /// the playlist is re-enabled, no track stays active and the error is the
    /// caller's to surface.
    pub fn activate(&mut self, index: usize) -> Result<(), PlaybackError> {
        if !self.controls_enabled || index >= self.tracks.len() {
            return Ok(());
        }

        self.controls_enabled = false;
        self.state = PlaybackState::Loading;
        self.active = None;
        for track in &mut self.tracks {
            track.active = false;
        }

        let source = self.tracks[index].source.clone();
        let result = self
            .device
            .set_source(&source)
            .and_then(|()| self.device.play());

        self.controls_enabled = true;
        match result {
            Ok(()) => {
                self.tracks[index].active = true;
                self.active = Some(index);
                self.state = PlaybackState::Playing;
                Ok(())
            }
            Err(err) => {
                self.device.stop();
                self.state = PlaybackState::Stopped;
                Err(err)
            }
        }
    }

    /// Pause a playing track or resume a paused one. No-op when nothing is
    /// active.
    pub fn toggle_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                self.device.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.device.resume();
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Stopped | PlaybackState::Loading => {}
        }
    }

    /// Relative seek in seconds. Backward seeks inside the snap window land
    /// on zero; forward seeks with less than the snap window remaining do
    /// nothing. The result never leaves `[0, duration]`.
    pub fn seek_by(&mut self, delta_seconds: i64) {
        if self.active.is_none() {
            return;
        }
        let Some(duration) = self.device.duration() else {
            return;
        };
        let position = self.device.position();

        if delta_seconds < 0 {
            let step = Duration::from_secs(delta_seconds.unsigned_abs());
            let target = if position < SEEK_SNAP_WINDOW {
                Duration::ZERO
            } else {
                position.saturating_sub(step)
            };
            self.device.seek_to(target);
        } else if delta_seconds > 0 {
            let step = Duration::from_secs(delta_seconds as u64);
            if duration.saturating_sub(position) >= SEEK_SNAP_WINDOW {
                self.device.seek_to((position + step).min(duration));
            }
        }
    }

    /// Absolute seek to a fraction of the duration, for progress bar clicks.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if self.active.is_none() {
            return;
        }
        let Some(duration) = self.device.duration() else {
            return;
        };
        self.device.seek_to(duration.mul_f64(fraction.clamp(0.0, 1.0)));
    }

    /// Set the session volume, clamped to `[0, 100]`. The device gets the
    /// value scaled down to `[0.0, 1.0]`.
    pub fn set_volume(&mut self, value: i64) {
        let clamped = value.clamp(0, 100) as u8;
        self.volume = clamped;
        self.device.set_volume(f32::from(clamped) / 100.0);
    }

    pub fn adjust_volume(&mut self, delta: i64) {
        self.set_volume(i64::from(self.volume) + delta);
    }

    /// Advance to the next track: random when random mode is on, otherwise
    /// +1 with last-to-first wraparound. No-op when nothing is active.
    pub fn play_next(&mut self) -> Result<(), PlaybackError> {
        let Some(current) = self.active else {
            return Ok(());
        };
        let target = if self.random {
            self.pick_random(current)
        } else if current + 1 == self.tracks.len() {
            0
        } else {
            current + 1
        };
        self.activate(target)
    }

    /// Retreat to the previous track: random when random mode is on,
    /// otherwise -1 with first-to-last wraparound. No-op when nothing is
    /// active.
    pub fn play_previous(&mut self) -> Result<(), PlaybackError> {
        let Some(current) = self.active else {
            return Ok(());
        };
        let target = if self.random {
            self.pick_random(current)
        } else if current == 0 {
            self.tracks.len() - 1
        } else {
            current - 1
        };
        self.activate(target)
    }

    /// Flip random mode. Only the flag changes; the active track stays put.
    pub fn toggle_random(&mut self) {
        self.random = !self.random;
    }

    /// Auto-advance when the device reports the current source exhausted.
    /// Behaves exactly like `play_next` once the end-of-content signal fires.
    pub fn advance_if_finished(&mut self) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Playing && self.device.finished() {
            self.play_next()
        } else {
            Ok(())
        }
    }

    /// Uniform draw over the playlist excluding `current`, redrawing on
    /// collision. A single-track playlist returns `current` right away
    /// instead of redrawing forever.
    fn pick_random(&self, current: usize) -> usize {
        if self.tracks.len() < 2 {
            return current;
        }
        let mut rng = rand::rng();
        loop {
            let candidate = rng.random_range(0..self.tracks.len());
            if candidate != current {
                return candidate;
            }
        }
    }
}
