//! Transport control: play/pause, seeks, playback rate
//!
//! Double-tap seeking classifies each tap into a horizontal zone; only a
//! second tap in the same zone inside the double-tap window seeks. Every
//! other tap just re-arms the controls auto-hide timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use strix_common::events::{OverlayKind, PlayerEvent};
use strix_common::types::MediaKind;
use tokio::time::Instant;
use tracing::debug;

use crate::engine::MediaEngine;
use crate::error::{Error, Result};
use crate::playback::osd::OsdState;
use crate::state::SharedState;

/// Relative seek step for a double-tap
pub const SEEK_STEP_MS: i64 = 10_000;

/// Two taps within this window form a double-tap
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// The closed set of selectable playback rates
pub const PLAYBACK_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Horizontal tap zones (x as a 0..1 screen ratio)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    Rewind,
    Neutral,
    Forward,
}

/// Classify a tap's x position into its zone
pub fn classify_tap(x_ratio: f64) -> TapZone {
    if x_ratio < 0.35 {
        TapZone::Rewind
    } else if x_ratio > 0.65 {
        TapZone::Forward
    } else {
        TapZone::Neutral
    }
}

/// Direction of an applied double-tap seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Back,
    Forward,
}

/// Tracks the previous tap to detect double-taps
#[derive(Debug, Default)]
pub struct TapTracker {
    last: Option<(TapZone, Instant)>,
}

impl TapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tap; returns a seek direction when it completes a
    /// double-tap in a seek zone
    pub fn register(&mut self, zone: TapZone, now: Instant) -> Option<SeekDirection> {
        if zone == TapZone::Neutral {
            self.last = None;
            return None;
        }

        let completes = matches!(
            self.last,
            Some((prev_zone, prev_at))
                if prev_zone == zone && now.duration_since(prev_at) <= DOUBLE_TAP_WINDOW
        );

        if completes {
            self.last = None;
            Some(match zone {
                TapZone::Rewind => SeekDirection::Back,
                TapZone::Forward => SeekDirection::Forward,
                TapZone::Neutral => unreachable!(),
            })
        } else {
            self.last = Some((zone, now));
            None
        }
    }
}

/// Whether the rate belongs to the selectable set
pub fn is_valid_rate(rate: f64) -> bool {
    PLAYBACK_RATES.iter().any(|r| (r - rate).abs() < f64::EPSILON)
}

/// Issues transport commands against the engine
pub struct TransportController {
    engine: Arc<dyn MediaEngine>,
    state: Arc<SharedState>,
    osd: Arc<OsdState>,
    media_kind: MediaKind,
    /// Shared with the owning session; set when the engine must no longer
    /// be touched
    closed: Arc<AtomicBool>,
    taps: Mutex<TapTracker>,
}

impl TransportController {
    pub fn new(
        engine: Arc<dyn MediaEngine>,
        state: Arc<SharedState>,
        osd: Arc<OsdState>,
        media_kind: MediaKind,
        closed: Arc<AtomicBool>,
    ) -> Self {
        Self {
            engine,
            state,
            osd,
            media_kind,
            closed,
            taps: Mutex::new(TapTracker::new()),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Flip play/pause based on the engine's current playing flag
    pub async fn toggle_play_pause(&self) {
        if self.is_closed() {
            return;
        }
        let sample = self.engine.sample();
        if sample.playing {
            self.engine.pause();
        } else {
            self.engine.play();
        }
        self.osd.show(OverlayKind::Controls);
    }

    /// Handle a screen tap; returns the seek direction when the tap
    /// completed a double-tap
    pub async fn tap(&self, x_ratio: f64) -> Option<SeekDirection> {
        if self.is_closed() {
            return None;
        }
        let zone = classify_tap(x_ratio);
        let direction = self.taps.lock().unwrap().register(zone, Instant::now());

        match direction {
            Some(dir) => {
                let delta = match dir {
                    SeekDirection::Back => -SEEK_STEP_MS,
                    SeekDirection::Forward => SEEK_STEP_MS,
                };
                debug!(delta_ms = delta, "double-tap seek");
                self.engine.seek_by(delta);
                self.osd.show(OverlayKind::Seek);
                self.state.broadcast_event(PlayerEvent::SeekApplied {
                    delta_ms: delta,
                    timestamp: chrono::Utc::now(),
                });
            }
            None => {
                // Single or mismatched tap: only toggles controls visibility
                self.osd.show(OverlayKind::Controls);
            }
        }
        direction
    }

    /// Absolute seek from a progress-track drag; VOD only
    pub async fn seek_absolute(&self, ratio: f64) -> Result<()> {
        if !self.media_kind.is_vod() {
            return Err(Error::InvalidState(
                "absolute seek is only available for movies and series".into(),
            ));
        }
        if self.is_closed() {
            return Ok(());
        }
        let (_, duration_ms) = self.state.get_position().await;
        if duration_ms == 0 {
            return Ok(());
        }
        let target = (ratio.clamp(0.0, 1.0) * duration_ms as f64) as u64;
        self.engine.seek_to(target);
        self.osd.show(OverlayKind::Controls);
        Ok(())
    }

    /// Select a playback rate from the closed set
    pub async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        if !is_valid_rate(rate) {
            return Err(Error::InvalidInput(format!(
                "unsupported playback rate {}",
                rate
            )));
        }
        if self.is_closed() {
            return Ok(());
        }
        self.engine.set_rate(rate);
        self.state.set_playback_rate(rate).await;
        Ok(())
    }
}
