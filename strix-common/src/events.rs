//! Event types for the Strix player event system
//!
//! Events are broadcast from the playback controller to any number of host
//! listeners (UI overlays, now-playing widgets, diagnostics).

use crate::types::{MediaKind, Track, TrackKind};
use serde::{Deserialize, Serialize};

/// Playback session status
///
/// `Error` is terminal until a new source is set on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Resolving,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
    Error,
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Resolving => "resolving",
            PlaybackStatus::Loading => "loading",
            PlaybackStatus::Ready => "ready",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Ended => "ended",
            PlaybackStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Transient overlay categories shown by the controller
///
/// At most one overlay is visible per category; a new event of the same
/// category replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Directional double-tap seek indicator
    Seek,
    /// "Now showing" channel toast
    Channel,
    /// Volume HUD
    Volume,
    /// Brightness HUD
    Brightness,
    /// Transport controls visibility
    Controls,
}

/// Strix player event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// Playback status changed
    StatusChanged {
        status: PlaybackStatus,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Playback position update (sampled from the engine)
    Progress {
        position_ms: u64,
        duration_ms: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A non-empty track list was discovered for the current source
    TracksDiscovered {
        kind: TrackKind,
        tracks: Vec<Track>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The active channel changed through carousel navigation
    ChannelChanged {
        index: usize,
        channel_id: i64,
        name: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A transient overlay became visible
    OverlayShown {
        overlay: OverlayKind,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A relative seek was applied (positive = forward)
    SeekApplied {
        delta_ms: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Content is PIN-locked and not yet authorized this session
    PinRequired {
        content_id: i64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Playback failed; `reason` is suitable for a full-screen error view
    PlaybackError {
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Favorite status resolved for the session's content
    FavoriteStatus {
        content_id: i64,
        kind: MediaKind,
        is_favorite: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl PlayerEvent {
    /// Convenience constructor stamping the current time
    pub fn status(status: PlaybackStatus) -> Self {
        PlayerEvent::StatusChanged {
            status,
            timestamp: chrono::Utc::now(),
        }
    }
}
