//! Shared playback state
//!
//! Thread-safe shared state for coordination between the session loop, input
//! handlers, and host observers. Uses RwLock for concurrent read access with
//! rare writes, plus a broadcast channel for event fan-out.

use strix_common::events::{PlaybackStatus, PlayerEvent};
use strix_common::types::ContentFit;
use tokio::sync::{broadcast, RwLock};

/// Shared state accessible by all controller components
pub struct SharedState {
    /// Current session status
    pub status: RwLock<PlaybackStatus>,

    /// Last sampled position/duration in milliseconds
    position: RwLock<(u64, u64)>,

    /// True between source hand-off and the first ready observation
    buffering: RwLock<bool>,

    /// Master volume (0.0-1.0)
    volume: RwLock<f64>,

    /// Screen brightness (0.0-1.0); applied by the host, owned here
    brightness: RwLock<f64>,

    /// Playback rate multiplier
    playback_rate: RwLock<f64>,

    /// Video fit mode
    content_fit: RwLock<ContentFit>,

    /// Effective source URI after resolution and quality selection
    source_uri: RwLock<Option<String>>,

    /// Human-readable reason when status is Error
    error_reason: RwLock<Option<String>>,

    /// Event broadcaster for host listeners
    pub event_tx: broadcast::Sender<PlayerEvent>,
}

impl SharedState {
    /// Create new shared state with default values
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100); // Buffer up to 100 events
        Self {
            status: RwLock::new(PlaybackStatus::Idle),
            position: RwLock::new((0, 0)),
            buffering: RwLock::new(false),
            volume: RwLock::new(0.75), // Default 75% volume
            brightness: RwLock::new(0.5),
            playback_rate: RwLock::new(1.0),
            content_fit: RwLock::new(ContentFit::Contain),
            source_uri: RwLock::new(None),
            error_reason: RwLock::new(None),
            event_tx,
        }
    }

    /// Broadcast an event to all listeners
    pub fn broadcast_event(&self, event: PlayerEvent) {
        // Ignore send errors (no receivers is OK)
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to the event stream
    pub fn subscribe_events(&self) -> broadcast::Receiver<PlayerEvent> {
        self.event_tx.subscribe()
    }

    pub async fn get_status(&self) -> PlaybackStatus {
        *self.status.read().await
    }

    pub async fn set_status(&self, status: PlaybackStatus) {
        *self.status.write().await = status;
    }

    /// Get last sampled (position_ms, duration_ms)
    pub async fn get_position(&self) -> (u64, u64) {
        *self.position.read().await
    }

    pub async fn set_position(&self, position_ms: u64, duration_ms: u64) {
        *self.position.write().await = (position_ms, duration_ms);
    }

    pub async fn is_buffering(&self) -> bool {
        *self.buffering.read().await
    }

    pub async fn set_buffering(&self, buffering: bool) {
        *self.buffering.write().await = buffering;
    }

    pub async fn get_volume(&self) -> f64 {
        *self.volume.read().await
    }

    pub async fn set_volume(&self, volume: f64) {
        *self.volume.write().await = volume.clamp(0.0, 1.0);
    }

    pub async fn get_brightness(&self) -> f64 {
        *self.brightness.read().await
    }

    pub async fn set_brightness(&self, brightness: f64) {
        *self.brightness.write().await = brightness.clamp(0.0, 1.0);
    }

    pub async fn get_playback_rate(&self) -> f64 {
        *self.playback_rate.read().await
    }

    pub async fn set_playback_rate(&self, rate: f64) {
        *self.playback_rate.write().await = rate;
    }

    pub async fn get_content_fit(&self) -> ContentFit {
        *self.content_fit.read().await
    }

    pub async fn set_content_fit(&self, fit: ContentFit) {
        *self.content_fit.write().await = fit;
    }

    pub async fn get_source_uri(&self) -> Option<String> {
        self.source_uri.read().await.clone()
    }

    pub async fn set_source_uri(&self, uri: Option<String>) {
        *self.source_uri.write().await = uri;
    }

    pub async fn get_error_reason(&self) -> Option<String> {
        self.error_reason.read().await.clone()
    }

    pub async fn set_error_reason(&self, reason: Option<String>) {
        *self.error_reason.write().await = reason;
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
