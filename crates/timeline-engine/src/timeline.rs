//! The timeline component instance.
//!
//! Owns the item sequence, configuration, renderer strategies, callbacks and
//! the two pieces of mounted state: the page tracker and the measurement
//! cache. Hosts drive it with `compose_row`, `on_layout` and `on_scroll`.

use tracing::debug;

use crate::compose::{
    compose_row, row_key, CircleRenderer, DetailRenderer, Node, Renderers, Row, RowContext,
    TimeRenderer,
};
use crate::config::TimelineConfig;
use crate::geometry::is_last_row;
use crate::item::TimelineItem;
use crate::measure::{MeasuredGeometry, MeasurementCache};
use crate::scroll::{ScrollEvent, ScrollTracker};

type PressHandler = Box<dyn FnMut(&TimelineItem)>;
type PageHandler = Box<dyn FnMut(u32)>;

/// A scrollable timeline of dated events.
pub struct Timeline {
    items: Vec<TimelineItem>,
    config: TimelineConfig,
    renderers: Renderers,
    on_event_press: Option<PressHandler>,
    page_changed: Option<PageHandler>,
    scroll: ScrollTracker,
    measurement: MeasurementCache,
}

impl Timeline {
    /// Create a timeline with the built-in renderers and no callbacks.
    pub fn new(items: Vec<TimelineItem>, config: TimelineConfig) -> Self {
        Self {
            items,
            config,
            renderers: Renderers::default(),
            on_event_press: None,
            page_changed: None,
            scroll: ScrollTracker::new(),
            measurement: MeasurementCache::new(),
        }
    }

    /// Replace the time label renderer with a closure.
    #[must_use]
    pub fn render_time<F>(self, render: F) -> Self
    where
        F: Fn(&TimelineItem, usize) -> Option<Node> + 'static,
    {
        self.with_time_renderer(render)
    }

    /// Replace the detail renderer with a closure.
    #[must_use]
    pub fn render_detail<F>(self, render: F) -> Self
    where
        F: Fn(&TimelineItem, usize) -> Option<Node> + 'static,
    {
        self.with_detail_renderer(render)
    }

    /// Replace the circle renderer with a closure.
    #[must_use]
    pub fn render_circle<F>(self, render: F) -> Self
    where
        F: Fn(&TimelineItem, usize) -> Option<Node> + 'static,
    {
        self.with_circle_renderer(render)
    }

    #[must_use]
    pub fn with_time_renderer(mut self, renderer: impl TimeRenderer + 'static) -> Self {
        self.renderers.time = Box::new(renderer);
        self
    }

    #[must_use]
    pub fn with_detail_renderer(mut self, renderer: impl DetailRenderer + 'static) -> Self {
        self.renderers.detail = Box::new(renderer);
        self
    }

    #[must_use]
    pub fn with_circle_renderer(mut self, renderer: impl CircleRenderer + 'static) -> Self {
        self.renderers.circle = Box::new(renderer);
        self
    }

    /// Handle activation of an event body. Without a handler, bodies are not
    /// pressable.
    #[must_use]
    pub fn on_event_press(mut self, handler: impl FnMut(&TimelineItem) + 'static) -> Self {
        self.on_event_press = Some(Box::new(handler));
        self
    }

    /// Be told when the visible page changes.
    #[must_use]
    pub fn on_page_changed(mut self, handler: impl FnMut(u32) + 'static) -> Self {
        self.page_changed = Some(Box::new(handler));
        self
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// Replace the whole item sequence. Rows are re-keyed by position.
    pub fn set_items(&mut self, items: Vec<TimelineItem>) {
        debug!(count = items.len(), "replacing timeline items");
        self.items = items;
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TimelineConfig) {
        self.config = config;
    }

    /// Host pass-through options; never read by the timeline itself.
    pub fn options(&self) -> &serde_json::Value {
        &self.config.options
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn row_key(&self, index: usize) -> String {
        row_key(index)
    }

    /// Current 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.scroll.page_number()
    }

    /// The captured event body measurement, if any.
    pub fn measured(&self) -> Option<MeasuredGeometry> {
        self.measurement.get()
    }

    /// Compose the row at `index`.
    pub fn compose_row(&self, index: usize) -> Option<Row> {
        let item = self.items.get(index)?;
        let ctx = RowContext {
            index,
            is_last: is_last_row(index, self.items.len(), &self.config),
            config: &self.config,
            measured: self.measurement.get(),
        };
        Some(compose_row(
            item,
            &ctx,
            &self.renderers,
            self.on_event_press.is_some(),
        ))
    }

    /// Compose every row in order.
    pub fn rows(&self) -> Vec<Row> {
        (0..self.items.len())
            .filter_map(|index| self.compose_row(index))
            .collect()
    }

    /// Layout measurement of the event body at `index`, delivered by the host
    /// after painting. Returns `true` when rows must be rendered again with
    /// corrected circle geometry.
    pub fn on_layout(&mut self, index: usize, measurement: MeasuredGeometry) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.measurement.record(measurement)
    }

    /// Scroll notification from the host. Returns whether the page changed.
    pub fn on_scroll(&mut self, event: ScrollEvent) -> bool {
        match self.page_changed.as_mut() {
            Some(handler) => self.scroll.on_scroll(event, Some(&mut **handler)),
            None => self.scroll.on_scroll(event, None),
        }
    }

    /// Activate the event body at `index`. Returns `false` when there is no
    /// handler or no such row.
    pub fn press(&mut self, index: usize) -> bool {
        let (Some(handler), Some(item)) = (self.on_event_press.as_mut(), self.items.get(index))
        else {
            return false;
        };
        handler(item);
        true
    }

    /// Drop mounted state, as if the component were mounted afresh.
    pub fn remount(&mut self) {
        self.scroll.reset();
        self.measurement.reset();
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("items", &self.items.len())
            .field("config", &self.config)
            .field("page_number", &self.scroll.page_number())
            .field("measured", &self.measurement.get())
            .finish_non_exhaustive()
    }
}
