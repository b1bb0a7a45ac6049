//! Timeline pane state.
//!
//! Wraps the engine [`Timeline`] with the terminal-side scroll position,
//! selection and the row positions of the last render.

use timeline_engine::{MeasuredGeometry, ScrollEvent, Timeline};
use tracing::debug;

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Timeline pane state.
#[derive(Debug)]
pub struct TimelineState {
    timeline: Timeline,
    /// Index of selected row (if any).
    selected: Option<usize>,
    /// First visible line of the content.
    scroll_offset: usize,
    /// Top line of each row, from the last render.
    row_tops: Vec<usize>,
    row_heights: Vec<u16>,
    content_height: usize,
    viewport_height: u16,
    /// Set when a layout measurement changed circle geometry.
    needs_redraw: bool,
}

impl TimelineState {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            selected: None,
            scroll_offset: 0,
            row_tops: Vec::new(),
            row_heights: Vec::new(),
            content_height: 0,
            viewport_height: 0,
            needs_redraw: false,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Get the currently selected row index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Get the scroll offset in lines.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn page_number(&self) -> u32 {
        self.timeline.page_number()
    }

    /// Whether another render is needed to show corrected geometry.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clear and return the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(usize::from(self.viewport_height))
    }

    fn page_size(&self) -> usize {
        usize::from(self.viewport_height.max(1))
    }

    /// Scroll up by the given number of lines.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll down by the given number of lines, stopping at the last page.
    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(amount)
            .min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    /// Jump to first row.
    pub fn jump_to_start(&mut self) {
        self.scroll_offset = 0;
        if !self.is_empty() {
            self.selected = Some(0);
        }
    }

    /// Jump to last row.
    pub fn jump_to_end(&mut self) {
        self.scroll_offset = self.max_offset();
        if !self.is_empty() {
            self.selected = Some(self.len() - 1);
        }
    }

    /// Move selection up. Stops at first row (no wrap).
    pub fn select_prev(&mut self) {
        if self.is_empty() {
            return;
        }

        match self.selected {
            Some(0) => {} // Already at top
            Some(i) => self.selected = Some(i - 1),
            None => self.selected = Some(self.len() - 1),
        }
        self.ensure_selection_visible();
    }

    /// Move selection down. Stops at last row (no wrap).
    pub fn select_next(&mut self) {
        if self.is_empty() {
            return;
        }

        match self.selected {
            Some(i) if i + 1 >= self.len() => {} // Already at bottom
            Some(i) => self.selected = Some(i + 1),
            None => self.selected = Some(0),
        }
        self.ensure_selection_visible();
    }

    /// Select a specific row by index.
    pub fn select(&mut self, index: usize) {
        if index < self.len() {
            self.selected = Some(index);
        }
    }

    /// Activate the selected row's event body.
    pub fn press_selected(&mut self) -> bool {
        match self.selected {
            Some(index) => self.timeline.press(index),
            None => false,
        }
    }

    /// Scroll so the selected row is inside the viewport.
    pub fn ensure_selection_visible(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let (Some(&top), Some(&height)) =
            (self.row_tops.get(selected), self.row_heights.get(selected))
        else {
            return;
        };

        if top < self.scroll_offset {
            self.scroll_offset = top;
        }

        let viewport = usize::from(self.viewport_height);
        let bottom = top + usize::from(height);
        if bottom > self.scroll_offset + viewport {
            self.scroll_offset = bottom.saturating_sub(viewport).min(top);
        }
    }

    /// Convert a y-coordinate (relative to the timeline inner area) to a row
    /// index.
    pub fn y_to_row_index(&self, y: u16) -> Option<usize> {
        if y >= self.viewport_height {
            return None;
        }
        let line = self.scroll_offset + usize::from(y);
        // Row tops are ascending; find the last row starting at or above `line`.
        let index = self.row_tops.partition_point(|&top| top <= line).checked_sub(1)?;
        let bottom = self.row_tops[index] + usize::from(self.row_heights[index]);
        (line < bottom).then_some(index)
    }

    /// Record row positions from a render and clamp the scroll offset.
    pub(crate) fn set_layout(&mut self, heights: Vec<u16>, viewport_height: u16) {
        let mut top = 0usize;
        self.row_tops = heights
            .iter()
            .map(|&h| {
                let row_top = top;
                top += usize::from(h);
                row_top
            })
            .collect();
        self.row_heights = heights;
        self.content_height = top;
        self.viewport_height = viewport_height;
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    pub(crate) fn row_top(&self, index: usize) -> Option<usize> {
        self.row_tops.get(index).copied()
    }

    /// Deliver a painted row's body measurement to the timeline.
    pub(crate) fn report_layout(&mut self, index: usize, measurement: MeasuredGeometry) {
        if self.timeline.on_layout(index, measurement) {
            debug!(index, "measurement captured, scheduling redraw");
            self.needs_redraw = true;
        }
    }

    /// Deliver the current scroll position to the timeline.
    pub(crate) fn report_scroll(&mut self) -> bool {
        self.timeline.on_scroll(ScrollEvent::new(
            self.scroll_offset as f64,
            f64::from(self.viewport_height),
        ))
    }
}
