//! Geometry resolution for a single row.
//!
//! Maps a column format, row index, item overrides and global configuration
//! to concrete geometry for the three sub-elements of a row: the time label,
//! the event body (connecting line plus detail) and the circle marker.
//!
//! All values are in abstract layout units; hosts decide how a unit maps to
//! pixels or terminal cells.

use crate::color::Color;
use crate::config::{
    ColumnFormat, TimelineConfig, DEFAULT_CIRCLE_COLOR, DEFAULT_CIRCLE_SIZE, DEFAULT_LINE_COLOR,
    DEFAULT_LINE_WIDTH, EVENT_GUTTER,
};
use crate::item::TimelineItem;
use crate::measure::MeasuredGeometry;

/// Horizontal alignment of the time label inside its wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Side of the event body that carries the connecting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Geometry of the time label wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGeometry {
    pub align: Align,
    /// The wrapper grows to share the row with the event body.
    pub fill: bool,
}

/// The connecting line drawn along one edge of the event body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEdge {
    pub side: Side,
    pub width: f32,
    /// Space outside the line, between it and the neighbouring column.
    pub margin: f32,
    /// Space between the line and the detail content.
    pub padding: f32,
}

/// Geometry of the event body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventGeometry {
    pub border_color: Color,
    /// `None` leaves the edge to the host's default event style.
    pub edge: Option<LineEdge>,
}

/// Geometry of the circle marker, positioned absolutely within the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    /// Width and height. Zero until the event body has been measured.
    pub size: f32,
    pub radius: f32,
    pub color: Color,
    /// Offset of the circle's left edge from the row's left edge.
    pub left: f32,
}

impl CircleGeometry {
    /// Horizontal position of the circle's centre.
    pub fn center(&self) -> f32 {
        self.left + self.size / 2.0
    }

    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

/// Per-row attributes after walking the item → config → default chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAttrs {
    pub circle_size: f32,
    pub circle_color: Color,
    pub line_width: f32,
    pub line_color: Color,
}

impl ResolvedAttrs {
    /// Resolve every overridable attribute for `item`.
    ///
    /// Presence decides, not truthiness: an explicit `0` on the item wins
    /// over the configuration.
    pub fn resolve(item: &TimelineItem, config: &TimelineConfig) -> Self {
        Self {
            circle_size: item
                .circle_size
                .or(config.circle_size)
                .unwrap_or(DEFAULT_CIRCLE_SIZE),
            circle_color: item
                .circle_color
                .or(config.circle_color)
                .unwrap_or(DEFAULT_CIRCLE_COLOR),
            line_width: item
                .line_width
                .or(config.line_width)
                .unwrap_or(DEFAULT_LINE_WIDTH),
            line_color: item
                .line_color
                .or(config.line_color)
                .unwrap_or(DEFAULT_LINE_COLOR),
        }
    }
}

/// Geometry for all three sub-elements of a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub time: Option<TimeGeometry>,
    pub event: Option<EventGeometry>,
    pub circle: Option<CircleGeometry>,
}

/// Whether a two-column row uses the left-hand layout.
pub fn is_left_row(index: usize) -> bool {
    index % 2 == 0
}

/// Whether the row's line should fade out as the end of the timeline.
///
/// `render_full_line` switches the check off entirely: when it is set, no
/// row counts as last.
pub fn is_last_row(index: usize, len: usize, config: &TimelineConfig) -> bool {
    if config.render_full_line {
        false
    } else {
        len > 0 && index == len - 1
    }
}

/// Resolve the time wrapper geometry.
pub fn resolve_time(format: ColumnFormat, index: usize) -> Option<TimeGeometry> {
    let (align, fill) = match format {
        ColumnFormat::SingleColumnLeft => (Align::End, false),
        ColumnFormat::SingleColumnRight => (Align::Start, false),
        ColumnFormat::SingleColumnCenter => (Align::Center, false),
        ColumnFormat::TwoColumn if is_left_row(index) => (Align::End, true),
        ColumnFormat::TwoColumn => (Align::Start, true),
        ColumnFormat::Unrecognized => return None,
    };
    Some(TimeGeometry { align, fill })
}

/// Resolve the event body geometry.
pub fn resolve_event(
    format: ColumnFormat,
    index: usize,
    item: &TimelineItem,
    config: &TimelineConfig,
    is_last: bool,
) -> Option<EventGeometry> {
    let attrs = ResolvedAttrs::resolve(item, config);
    let border_color = if is_last {
        Color::TRANSPARENT
    } else {
        attrs.line_color
    };
    let edge = |side| {
        Some(LineEdge {
            side,
            width: attrs.line_width,
            margin: EVENT_GUTTER,
            padding: EVENT_GUTTER,
        })
    };

    let edge = match format {
        ColumnFormat::SingleColumnLeft => edge(Side::Left),
        ColumnFormat::SingleColumnRight => edge(Side::Right),
        ColumnFormat::SingleColumnCenter => None,
        ColumnFormat::TwoColumn if is_left_row(index) => edge(Side::Left),
        ColumnFormat::TwoColumn => edge(Side::Right),
        ColumnFormat::Unrecognized => return None,
    };
    Some(EventGeometry { border_color, edge })
}

/// Resolve the circle marker geometry.
///
/// Left-hand layouts anchor on the measured `x` of the event body and
/// right-hand layouts on its measured `width`. Two-column rows always use
/// the right-hand anchor, whatever their parity. Centre and unrecognised
/// formats have no circle geometry.
pub fn resolve_circle(
    format: ColumnFormat,
    item: &TimelineItem,
    config: &TimelineConfig,
    measured: Option<MeasuredGeometry>,
) -> Option<CircleGeometry> {
    let attrs = ResolvedAttrs::resolve(item, config);
    let half_line = (attrs.line_width - 1.0) / 2.0;
    let half_size = attrs.circle_size / 2.0;

    let (anchor, left) = match format {
        ColumnFormat::SingleColumnLeft => {
            let x = measured.map_or(0.0, |m| m.x);
            (x, x - half_size + half_line)
        }
        ColumnFormat::SingleColumnRight | ColumnFormat::TwoColumn => {
            let width = measured.map_or(0.0, |m| m.width);
            (width, width - half_size - half_line)
        }
        ColumnFormat::SingleColumnCenter | ColumnFormat::Unrecognized => return None,
    };

    // First pass renders a degenerate circle until the anchor is known.
    let size = if anchor == 0.0 { 0.0 } else { attrs.circle_size };
    Some(CircleGeometry {
        size,
        radius: attrs.circle_size / 2.0,
        color: attrs.circle_color,
        left,
    })
}

/// Resolve geometry for every sub-element of a row.
pub fn resolve_row(
    index: usize,
    item: &TimelineItem,
    config: &TimelineConfig,
    measured: Option<MeasuredGeometry>,
    is_last: bool,
) -> RowGeometry {
    let format = config.column_format;
    RowGeometry {
        time: resolve_time(format, index),
        event: resolve_event(format, index, item, config, is_last),
        circle: resolve_circle(format, item, config, measured),
    }
}
