//! Domain types shared between the player controller and its host
//!
//! These mirror the shapes an Xtream-style backend hands out: integer stream
//! ids, per-kind URL segments, and container extensions carried alongside the
//! stream id.

use serde::{Deserialize, Serialize};

/// Kind of content a playback session was opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Live,
    Movie,
    Series,
    Radio,
}

impl MediaKind {
    /// True for kinds with a finite duration and a resumable position
    pub fn is_vod(&self) -> bool {
        matches!(self, MediaKind::Movie | MediaKind::Series)
    }

    /// URL path segment used when assembling a stream URI from credentials
    ///
    /// Radio stations are served through the live endpoint on Xtream-style
    /// backends.
    pub fn url_segment(&self) -> &'static str {
        match self {
            MediaKind::Live | MediaKind::Radio => "live",
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }

    /// Container extension used when the request does not carry one
    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaKind::Live | MediaKind::Radio => "m3u8",
            MediaKind::Movie | MediaKind::Series => "mp4",
        }
    }

    /// Stable string form used for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Live => "live",
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Radio => "radio",
        }
    }

    /// Parse the stored string form back into a kind
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "live" => Some(MediaKind::Live),
            "movie" => Some(MediaKind::Movie),
            "series" => Some(MediaKind::Series),
            "radio" => Some(MediaKind::Radio),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a discoverable media track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Subtitle,
}

/// An audio or subtitle track exposed by the media engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Engine-assigned identifier, opaque to the controller
    pub id: String,
    /// Human-readable label ("English", "Forced", ...)
    pub label: String,
    /// ISO 639 language code when the engine reports one
    pub language_code: Option<String>,
    pub kind: TrackKind,
}

/// One entry of the live-channel list supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    /// Xtream stream id
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
}

/// How the rendered video is fitted into the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFit {
    Contain,
    Cover,
    Fill,
}

impl ContentFit {
    /// Next mode in the user-facing cycle order
    pub fn next(&self) -> Self {
        match self {
            ContentFit::Contain => ContentFit::Cover,
            ContentFit::Cover => ContentFit::Fill,
            ContentFit::Fill => ContentFit::Contain,
        }
    }
}

/// Stored server credentials used to assemble stream URIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Server base URL, with or without a trailing slash
    pub base_url: String,
}

/// Route-parameter contract between the navigation layer and the controller
///
/// The host builds one of these when opening the player screen. Everything a
/// session needs to start is in here; nothing else is read from globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Xtream stream/content id; may be absent when a direct URL is supplied
    pub stream_id: Option<i64>,
    pub media_kind: MediaKind,
    /// Pre-resolved URL; used as-is when no channel list is active
    pub stream_url: Option<String>,
    /// Container extension for credential-assembled URIs ("mkv", "ts", ...)
    pub container_ext: Option<String>,
    /// Live channel list for prev/next navigation; empty when not applicable
    #[serde(default)]
    pub channel_list: Vec<ChannelEntry>,
    /// Starting index into `channel_list`
    #[serde(default)]
    pub current_channel_index: usize,
    /// Explicit resume position; overrides any stored history offset
    pub start_time_ms: Option<u64>,
    // TODO: catch-up semantics are unresolved product-side; these are carried
    // through unchanged and not applied to URI resolution.
    pub catch_up_start_epoch: Option<i64>,
    pub catch_up_duration_sec: Option<u32>,
    pub cover_image_url: Option<String>,
}

impl Default for MediaKind {
    fn default() -> Self {
        MediaKind::Live
    }
}

impl PlayRequest {
    /// Content id the session is currently pointed at
    ///
    /// The active channel wins over the route's stream id once a channel
    /// list drives playback.
    pub fn content_id(&self) -> Option<i64> {
        if !self.channel_list.is_empty() {
            self.channel_list
                .get(self.current_channel_index)
                .map(|c| c.id)
        } else {
            self.stream_id
        }
    }

    /// True when a non-empty channel list was supplied for a live kind
    pub fn has_channel_list(&self) -> bool {
        self.media_kind == MediaKind::Live && !self.channel_list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_segments() {
        assert_eq!(MediaKind::Live.url_segment(), "live");
        assert_eq!(MediaKind::Radio.url_segment(), "live");
        assert_eq!(MediaKind::Movie.url_segment(), "movie");
        assert_eq!(MediaKind::Series.url_segment(), "series");
    }

    #[test]
    fn test_media_kind_vod() {
        assert!(MediaKind::Movie.is_vod());
        assert!(MediaKind::Series.is_vod());
        assert!(!MediaKind::Live.is_vod());
        assert!(!MediaKind::Radio.is_vod());
    }

    #[test]
    fn test_media_kind_round_trip() {
        for kind in [
            MediaKind::Live,
            MediaKind::Movie,
            MediaKind::Series,
            MediaKind::Radio,
        ] {
            assert_eq!(MediaKind::from_str_loose(kind.as_str()), Some(kind));
        }
        assert_eq!(MediaKind::from_str_loose("podcast"), None);
    }

    #[test]
    fn test_content_fit_cycle() {
        let mut fit = ContentFit::Contain;
        fit = fit.next();
        assert_eq!(fit, ContentFit::Cover);
        fit = fit.next();
        assert_eq!(fit, ContentFit::Fill);
        fit = fit.next();
        assert_eq!(fit, ContentFit::Contain);
    }

    #[test]
    fn test_content_id_prefers_active_channel() {
        let request = PlayRequest {
            stream_id: Some(42),
            media_kind: MediaKind::Live,
            channel_list: vec![
                ChannelEntry {
                    id: 100,
                    name: "One".into(),
                    icon: None,
                },
                ChannelEntry {
                    id: 200,
                    name: "Two".into(),
                    icon: None,
                },
            ],
            current_channel_index: 1,
            ..Default::default()
        };
        assert_eq!(request.content_id(), Some(200));

        let direct = PlayRequest {
            stream_id: Some(42),
            media_kind: MediaKind::Movie,
            ..Default::default()
        };
        assert_eq!(direct.content_id(), Some(42));
    }
}
