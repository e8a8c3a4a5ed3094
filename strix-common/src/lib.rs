//! # Strix Common Library
//!
//! Shared code for the Strix IPTV player modules including:
//! - Media/domain types (kinds, tracks, channels, play requests)
//! - Event types (PlayerEvent enum)

pub mod events;
pub mod types;

pub use events::{PlaybackStatus, PlayerEvent};
pub use types::MediaKind;
