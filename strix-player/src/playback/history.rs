//! Throttled resume-position persistence
//!
//! Only movies and series persist a position; live and radio never do.
//! While playing, at most one save goes out per throttle interval, always
//! from the most recent engine sample. Content watched past the finish
//! threshold has its history entry removed instead, and nothing further is
//! written for that session. The final teardown decision works from the
//! cached last sample so the engine is never touched during teardown.

use std::sync::Arc;
use std::time::Duration;

use strix_common::types::MediaKind;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::stores::CatalogStore;

/// Position/duration ratio past which content counts as finished
pub const FINISHED_RATIO: f64 = 0.95;

/// What to do with the current sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// Upsert the resume position
    Save,
    /// Remove the entry, content is finished
    Finish,
    /// Nothing useful to record yet
    Skip,
}

/// Decide the history action for a sampled position
pub fn classify(position_ms: u64, duration_ms: u64) -> HistoryAction {
    if duration_ms == 0 {
        return HistoryAction::Skip;
    }
    let ratio = position_ms as f64 / duration_ms as f64;
    if ratio > FINISHED_RATIO {
        HistoryAction::Finish
    } else {
        HistoryAction::Save
    }
}

/// Per-session persistence state for one piece of VOD content
pub struct PositionPersistence {
    catalog: Arc<dyn CatalogStore>,
    content_id: i64,
    kind: MediaKind,
    save_interval: Duration,
    last_save: Option<Instant>,
    finished: bool,
}

impl PositionPersistence {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        content_id: i64,
        kind: MediaKind,
        save_interval: Duration,
    ) -> Self {
        Self {
            catalog,
            content_id,
            kind,
            save_interval,
            last_save: None,
            finished: false,
        }
    }

    /// Called on every poll tick; throttles by wall clock, not tick count
    pub async fn on_tick(&mut self, playing: bool, position_ms: u64, duration_ms: u64) {
        if self.finished || !playing {
            return;
        }
        let now = Instant::now();
        if let Some(last) = self.last_save {
            if now.duration_since(last) < self.save_interval {
                return;
            }
        }
        self.apply(position_ms, duration_ms).await;
        self.last_save = Some(now);
    }

    /// One last save/removal decision at teardown, from the cached sample
    pub async fn flush(&mut self, position_ms: u64, duration_ms: u64) {
        if self.finished {
            return;
        }
        self.apply(position_ms, duration_ms).await;
    }

    async fn apply(&mut self, position_ms: u64, duration_ms: u64) {
        match classify(position_ms, duration_ms) {
            HistoryAction::Save => {
                if let Err(e) = self
                    .catalog
                    .update_history(self.content_id, self.kind, position_ms, duration_ms)
                    .await
                {
                    warn!(content_id = self.content_id, "history save failed: {}", e);
                }
            }
            HistoryAction::Finish => {
                debug!(content_id = self.content_id, "content finished, removing history entry");
                if let Err(e) = self.catalog.remove_from_history(self.content_id).await {
                    warn!(content_id = self.content_id, "history removal failed: {}", e);
                }
                self.finished = true;
            }
            HistoryAction::Skip => {}
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
