//! Transient overlay (OSD) timers
//!
//! Each overlay category owns a single deadline; showing a category replaces
//! its deadline, so rapid repeats (channel zapping, volume drags) never stack
//! toasts. Visibility is a pure deadline comparison, which keeps the timers
//! testable under a paused tokio clock.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use strix_common::events::{OverlayKind, PlayerEvent};
use tokio::sync::broadcast;
use tokio::time::Instant;

/// Seek direction indicator fades in/out over this window
pub const SEEK_OVERLAY_TTL: Duration = Duration::from_millis(500);
/// "Now showing" channel toast
pub const CHANNEL_TOAST_TTL: Duration = Duration::from_millis(1400);
/// Volume/brightness HUD
pub const HUD_TTL: Duration = Duration::from_millis(1500);
/// Transport controls auto-hide after this much inactivity
pub const CONTROLS_TTL: Duration = Duration::from_millis(4000);

fn ttl_for(kind: OverlayKind) -> Duration {
    match kind {
        OverlayKind::Seek => SEEK_OVERLAY_TTL,
        OverlayKind::Channel => CHANNEL_TOAST_TTL,
        OverlayKind::Volume | OverlayKind::Brightness => HUD_TTL,
        OverlayKind::Controls => CONTROLS_TTL,
    }
}

/// Per-category overlay deadlines
pub struct OsdState {
    deadlines: Mutex<HashMap<OverlayKind, Instant>>,
    event_tx: broadcast::Sender<PlayerEvent>,
}

impl OsdState {
    pub fn new(event_tx: broadcast::Sender<PlayerEvent>) -> Self {
        Self {
            deadlines: Mutex::new(HashMap::new()),
            event_tx,
        }
    }

    /// Show (or re-arm) an overlay; replaces any pending deadline for the
    /// same category
    pub fn show(&self, kind: OverlayKind) {
        let deadline = Instant::now() + ttl_for(kind);
        self.deadlines.lock().unwrap().insert(kind, deadline);
        let _ = self.event_tx.send(PlayerEvent::OverlayShown {
            overlay: kind,
            timestamp: chrono::Utc::now(),
        });
    }

    /// True while the category's deadline has not elapsed
    pub fn is_visible(&self, kind: OverlayKind) -> bool {
        self.deadlines
            .lock()
            .unwrap()
            .get(&kind)
            .is_some_and(|deadline| Instant::now() < *deadline)
    }

    /// Hide a category immediately
    pub fn hide(&self, kind: OverlayKind) {
        self.deadlines.lock().unwrap().remove(&kind);
    }
}
