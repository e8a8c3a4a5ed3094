//! Media engine capability interface
//!
//! The controller never talks to a platform player directly; it drives an
//! opaque engine handle through this fixed trait. Engines that lack a
//! capability (e.g. no track enumeration) return empty lists rather than
//! callers probing for property existence.

use strix_common::types::Track;

/// Engine-reported lifecycle status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    /// No source loaded
    Idle,
    /// Source set, buffering toward first frame
    Loading,
    /// Enough buffered to begin or continue playback
    ReadyToPlay,
    /// Source played to its end
    Ended,
    /// Unrecoverable engine failure
    Failed(String),
}

/// One snapshot of the engine's readable properties
///
/// Sampled on every poll tick; the last snapshot is cached so teardown logic
/// never has to touch the engine handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSample {
    pub position_ms: u64,
    pub duration_ms: u64,
    pub playing: bool,
    pub status: EngineStatus,
}

impl Default for EngineSample {
    fn default() -> Self {
        Self {
            position_ms: 0,
            duration_ms: 0,
            playing: false,
            status: EngineStatus::Idle,
        }
    }
}

/// Capability interface for the platform media engine
///
/// Handles are expected to be cheap to call and internally synchronized;
/// commands apply asynchronously inside the engine and become observable
/// through subsequent [`MediaEngine::sample`] calls.
pub trait MediaEngine: Send + Sync {
    /// Swap the loaded source; resets position and track state engine-side
    fn replace_source(&self, uri: &str);

    fn play(&self);
    fn pause(&self);

    /// Absolute seek in milliseconds
    fn seek_to(&self, position_ms: u64);

    /// Relative seek; negative deltas rewind, clamped engine-side
    fn seek_by(&self, delta_ms: i64);

    /// Volume in `[0.0, 1.0]`
    fn set_volume(&self, volume: f64);

    /// Playback rate multiplier
    fn set_rate(&self, rate: f64);

    /// Select an audio track by engine id; `None` reverts to the default
    fn select_audio_track(&self, id: Option<&str>);

    /// Select a subtitle track by engine id; `None` disables subtitles
    fn select_subtitle_track(&self, id: Option<&str>);

    /// Snapshot the readable properties
    fn sample(&self) -> EngineSample;

    /// Audio tracks discovered for the current source; empty until the
    /// engine has populated them (some engines do so well after ready)
    fn audio_tracks(&self) -> Vec<Track>;

    /// Subtitle tracks discovered for the current source
    fn subtitle_tracks(&self) -> Vec<Track>;
}
