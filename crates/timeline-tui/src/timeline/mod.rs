//! Timeline pane.
//!
//! This module provides:
//! - [`CellScale`] / [`layout_row`] - Conversion of composed rows to terminal columns
//! - [`TimelineState`] - Scroll position, selection and row positions
//! - [`TimelineWidget`] - Widget for rendering the timeline pane

mod layout;
mod state;
mod widget;

pub use layout::{layout_row, truncate_to_width, BodyLine, CellScale, RowLayout, Span};
pub use state::{TimelineState, SCROLL_SPEED};
pub use widget::TimelineWidget;
