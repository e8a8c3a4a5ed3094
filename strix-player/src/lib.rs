//! # Strix Player Controller (strix-player)
//!
//! Media playback controller for the Strix IPTV client.
//!
//! **Purpose:** Resolve playable stream URIs against an Xtream-style
//! backend, drive an opaque platform media engine through its lifecycle,
//! map gestures and remote commands to transport control, discover tracks,
//! select live-stream quality variants, navigate channel lists, and persist
//! resume positions.
//!
//! **Architecture:** One [`playback::PlaybackSession`] per player screen,
//! created with the route parameters and injected collaborator stores,
//! sampling the engine on a fixed interval and broadcasting
//! [`strix_common::events::PlayerEvent`]s to the host.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod playback;
pub mod remote;
pub mod state;
pub mod stores;

pub use error::{Error, Result};
pub use playback::{PlaybackSession, Stores};
pub use state::SharedState;
