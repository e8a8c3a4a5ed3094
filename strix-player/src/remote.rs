//! Remote-control command mapping
//!
//! Platforms deliver remote/media-key events as raw strings; the controller
//! only ever sees this closed enum. Per-platform adapters call
//! [`RemoteCommand::from_raw`] with whatever their event system produced.

use serde::{Deserialize, Serialize};

/// Closed set of remote-control commands the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteCommand {
    Play,
    Pause,
    TogglePlayPause,
    SeekForward,
    SeekBack,
    NextChannel,
    PreviousChannel,
    Stop,
}

impl RemoteCommand {
    /// Translate a raw platform event string
    ///
    /// Accepts the media-session style names the mobile platforms emit;
    /// unknown strings map to `None` and are ignored by callers.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "play" | "remote-play" => Some(RemoteCommand::Play),
            "pause" | "remote-pause" => Some(RemoteCommand::Pause),
            "playpause" | "toggleplaypause" => Some(RemoteCommand::TogglePlayPause),
            "seekforward" | "fastforward" => Some(RemoteCommand::SeekForward),
            "seekbackward" | "rewind" => Some(RemoteCommand::SeekBack),
            "nexttrack" | "next" => Some(RemoteCommand::NextChannel),
            "previoustrack" | "previous" => Some(RemoteCommand::PreviousChannel),
            "stop" => Some(RemoteCommand::Stop),
            _ => None,
        }
    }
}
