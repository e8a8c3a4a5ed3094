//! Playback controller components
//!
//! `session` is the orchestrator; the sibling modules are its collaborators:
//! access gating, channel carousel, gestures, history persistence, overlay
//! timers, quality selection, source resolution, track management, and
//! transport control.

pub mod access;
pub mod carousel;
pub mod gesture;
pub mod history;
pub mod osd;
pub mod quality;
pub mod session;
pub mod source;
pub mod tracks;
pub mod transport;

pub use session::{PlaybackSession, Stores};
