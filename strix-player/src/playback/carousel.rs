//! Live channel carousel
//!
//! Ordered channel list with wraparound prev/next. Only active when a
//! non-empty list was supplied for a live source; otherwise every operation
//! is inert.

use strix_common::types::ChannelEntry;

/// Channel list and cursor for live navigation
#[derive(Debug, Clone)]
pub struct ChannelCarousel {
    channels: Vec<ChannelEntry>,
    current: usize,
}

impl ChannelCarousel {
    /// Build from the supplied list; an out-of-range start index is clamped
    /// into bounds
    pub fn new(channels: Vec<ChannelEntry>, start_index: usize) -> Self {
        let current = if channels.is_empty() {
            0
        } else {
            start_index.min(channels.len() - 1)
        };
        Self { channels, current }
    }

    pub fn is_active(&self) -> bool {
        !self.channels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&ChannelEntry> {
        self.channels.get(self.current)
    }

    /// Advance with wraparound; returns the newly selected channel
    pub fn next(&mut self) -> Option<&ChannelEntry> {
        self.step(1)
    }

    /// Go back with wraparound; returns the newly selected channel
    pub fn previous(&mut self) -> Option<&ChannelEntry> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<&ChannelEntry> {
        if self.channels.is_empty() {
            return None;
        }
        let len = self.channels.len() as isize;
        self.current = ((self.current as isize + delta + len) % len) as usize;
        self.channels.get(self.current)
    }
}
