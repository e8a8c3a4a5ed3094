//! Audio and subtitle track discovery and selection
//!
//! Some engines populate their track lists well after signalling ready, so
//! the session loop keeps re-reading while a list is still empty. Once a
//! non-empty list has been observed the re-reads become state no-ops.
//! Selection failures are logged and non-fatal; the engine keeps its default
//! track.

use strix_common::types::{Track, TrackKind};
use tracing::{debug, info};

use crate::engine::MediaEngine;

/// Per-source track state
#[derive(Debug, Default)]
pub struct TrackManager {
    audio: Vec<Track>,
    subtitles: Vec<Track>,
    selected_audio: Option<String>,
    selected_subtitle: Option<String>,
    audio_seen: bool,
    subtitles_seen: bool,
}

impl TrackManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state; called whenever the source URI changes
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Both lists have been observed non-empty
    pub fn discovery_done(&self) -> bool {
        self.audio_seen && self.subtitles_seen
    }

    /// Re-read still-empty lists from the engine; returns the kinds that
    /// were newly discovered (for event emission)
    pub fn refresh_from(&mut self, engine: &dyn MediaEngine) -> Vec<(TrackKind, Vec<Track>)> {
        let mut discovered = Vec::new();

        if !self.audio_seen {
            let list = engine.audio_tracks();
            if !list.is_empty() {
                info!(count = list.len(), "audio tracks discovered");
                self.audio = list.clone();
                self.audio_seen = true;
                discovered.push((TrackKind::Audio, list));
            }
        }

        if !self.subtitles_seen {
            let list = engine.subtitle_tracks();
            if !list.is_empty() {
                info!(count = list.len(), "subtitle tracks discovered");
                self.subtitles = list.clone();
                self.subtitles_seen = true;
                discovered.push((TrackKind::Subtitle, list));
            }
        }

        discovered
    }

    pub fn audio_tracks(&self) -> &[Track] {
        &self.audio
    }

    pub fn subtitle_tracks(&self) -> &[Track] {
        &self.subtitles
    }

    pub fn selected_audio(&self) -> Option<&str> {
        self.selected_audio.as_deref()
    }

    /// Selected subtitle id; `None` means subtitles are off
    pub fn selected_subtitle(&self) -> Option<&str> {
        self.selected_subtitle.as_deref()
    }

    /// Write the chosen audio track to the engine and remember it
    pub fn select_audio(&mut self, engine: &dyn MediaEngine, track: &Track) {
        debug!(id = %track.id, label = %track.label, "selecting audio track");
        engine.select_audio_track(Some(&track.id));
        self.selected_audio = Some(track.id.clone());
    }

    /// Write the chosen subtitle track to the engine; `None` disables
    /// subtitles explicitly
    pub fn select_subtitle(&mut self, engine: &dyn MediaEngine, track: Option<&Track>) {
        match track {
            Some(track) => {
                debug!(id = %track.id, label = %track.label, "selecting subtitle track");
                engine.select_subtitle_track(Some(&track.id));
                self.selected_subtitle = Some(track.id.clone());
            }
            None => {
                debug!("disabling subtitles");
                engine.select_subtitle_track(None);
                self.selected_subtitle = None;
            }
        }
    }
}
