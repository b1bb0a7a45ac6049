//! timeline-engine: Headless layout engine for a scrollable event timeline
//!
//! This crate provides the host-independent core of the timeline:
//! - Item and configuration model (serde JSON)
//! - Geometry resolution for time labels, connecting lines and circle markers
//! - Circle inner content selection (icon or dot)
//! - Row composition with replaceable renderer strategies
//! - Scroll page tracking and one-shot layout measurement capture

pub mod color;
pub mod compose;
pub mod config;
pub mod geometry;
pub mod item;
pub mod marker;
pub mod measure;
pub mod scroll;
pub mod style;
pub mod timeline;

// Re-export commonly used types
pub use color::{Color, ColorParseError};
pub use compose::{
    CircleRenderer, DetailRenderer, Node, Renderers, Row, RowChild, RowContext, Slot,
    TimeRenderer,
};
pub use config::{load_items, ColumnFormat, ConfigError, InnerCircle, TimelineConfig};
pub use geometry::{Align, CircleGeometry, EventGeometry, LineEdge, Side, TimeGeometry};
pub use item::{IconSource, TimelineItem};
pub use marker::InnerContent;
pub use measure::MeasuredGeometry;
pub use scroll::ScrollEvent;
pub use style::{StyleOverride, StyleOverrides};
pub use timeline::Timeline;

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
