//! strix-player specific configuration

use std::time::Duration;

/// Timing knobs for the playback controller
///
/// Defaults match the shipping behavior; tests shrink them where useful.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Engine status sampling period
    pub poll_interval: Duration,
    /// Fallback track re-read period while a list is still empty
    pub track_probe_interval: Duration,
    /// Minimum wall-clock gap between resume-position saves
    pub history_save_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            track_probe_interval: Duration::from_millis(2000),
            history_save_interval: Duration::from_millis(5000),
        }
    }
}
