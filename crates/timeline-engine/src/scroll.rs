//! Scroll position to page number tracking.

use tracing::{debug, trace};

/// A scroll notification from the host list engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// Vertical content offset.
    pub offset_y: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
}

impl ScrollEvent {
    pub fn new(offset_y: f64, viewport_height: f64) -> Self {
        Self {
            offset_y,
            viewport_height,
        }
    }

    /// The 1-based page this offset falls on, or `None` when the viewport
    /// has no usable height.
    pub fn page(&self) -> Option<u32> {
        if !(self.viewport_height > 0.0) || !self.offset_y.is_finite() {
            return None;
        }
        let page = (self.offset_y / self.viewport_height).floor() + 1.0;
        // Float to int casts saturate, so huge offsets land on u32::MAX.
        Some(page.max(1.0) as u32)
    }
}

/// Tracks the current page number. Starts at page 1.
#[derive(Debug)]
pub struct ScrollTracker {
    page_number: u32,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self { page_number: 1 }
    }
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Handle a scroll notification.
    ///
    /// The page only changes while a listener is attached, and the listener
    /// is called only when the page actually changes. Returns whether a
    /// transition happened.
    pub fn on_scroll(
        &mut self,
        event: ScrollEvent,
        listener: Option<&mut (dyn FnMut(u32) + '_)>,
    ) -> bool {
        let Some(candidate) = event.page() else {
            trace!(?event, "ignoring scroll event without viewport height");
            return false;
        };

        let Some(listener) = listener else {
            return false;
        };
        if candidate == self.page_number {
            return false;
        }

        debug!(from = self.page_number, to = candidate, "page changed");
        self.page_number = candidate;
        listener(candidate);
        true
    }

    pub fn reset(&mut self) {
        self.page_number = 1;
    }
}
