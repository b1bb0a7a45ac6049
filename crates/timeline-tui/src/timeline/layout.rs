//! Cell layout for composed rows.
//!
//! Converts the engine's unit geometry into terminal columns. A row is laid
//! out horizontally in slot order: the time column and the event body share
//! the width, the circle sits on top at an absolute column.

use timeline_engine::config::{DEFAULT_CIRCLE_SIZE, MIN_TIME_WIDTH};
use timeline_engine::{Align, Color, InnerContent, MeasuredGeometry, Node, Row, Side, Slot};
use unicode_width::UnicodeWidthStr;

/// Layout units per terminal column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub units_per_cell: f32,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            units_per_cell: 4.0,
        }
    }
}

impl CellScale {
    pub fn new(units_per_cell: f32) -> Self {
        Self {
            units_per_cell: units_per_cell.max(1.0),
        }
    }

    /// Convert a length to whole columns.
    pub fn to_cells(self, units: f32) -> u16 {
        (units / self.units_per_cell).round().clamp(0.0, f32::from(u16::MAX)) as u16
    }

    /// Column containing a position; may be negative.
    pub fn column_of(self, units: f32) -> i32 {
        (units / self.units_per_cell).floor() as i32
    }

    pub fn to_units(self, cells: u16) -> f32 {
        f32::from(cells) * self.units_per_cell
    }
}

/// A horizontal span relative to the row's left edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub width: u16,
}

impl Span {
    pub fn new(x: u16, width: u16) -> Self {
        Self { x, width }
    }
}

/// The content lines of an event body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    Title(String),
    Description(String),
    Text(String),
    Separator,
}

/// Column positions for one composed row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub index: usize,
    pub time: Option<(Span, Align)>,
    pub time_text: Option<String>,
    /// Event body frame, inside its margin. This is what gets measured.
    pub body: Option<Span>,
    /// Column of the connecting line.
    pub line_x: Option<u16>,
    pub line_color: Option<Color>,
    pub content: Span,
    pub lines: Vec<BodyLine>,
    /// Column of the circle marker; `None` while it has no size.
    pub circle_x: Option<i32>,
    pub circle_glyph: char,
    /// `None` for the default circle, painted in the theme's muted color.
    pub circle_color: Option<Color>,
    pub inner: Option<InnerContent>,
    /// Total lines, including the trailing spacer.
    pub height: u16,
}

impl RowLayout {
    /// The measurement reported back to the timeline after painting.
    pub fn measurement(&self, scale: CellScale) -> Option<MeasuredGeometry> {
        let body = self.body?;
        Some(MeasuredGeometry::new(
            scale.to_units(body.x),
            scale.to_units(body.width),
        ))
    }
}

const CIRCLE: char = '\u{25cf}'; // ●
const DOT: char = '\u{25c9}'; // ◉

fn marker_glyph(inner: Option<&InnerContent>) -> char {
    match inner {
        Some(InnerContent::Dot { .. }) => DOT,
        Some(InnerContent::Icon { source, .. }) => source.as_str().chars().next().unwrap_or(CIRCLE),
        None => CIRCLE,
    }
}

fn text_width(lines: &[String]) -> u16 {
    lines
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .min(usize::from(u16::MAX)) as u16
}

fn body_lines(detail: Option<&Node>, separator: bool) -> Vec<BodyLine> {
    let mut lines = match detail {
        Some(Node::Detail { title, description }) => {
            let mut lines = vec![BodyLine::Title(title.clone())];
            if let Some(description) = description {
                lines.extend(
                    description
                        .lines()
                        .map(|l| BodyLine::Description(l.to_string())),
                );
            }
            lines
        }
        Some(Node::Text(text)) => text.iter().cloned().map(BodyLine::Text).collect(),
        _ => Vec::new(),
    };
    if lines.is_empty() {
        lines.push(BodyLine::Text(String::new()));
    }
    if separator {
        lines.push(BodyLine::Separator);
    }
    lines
}

fn time_content(node: Option<&Node>) -> Option<(String, Option<Align>, bool)> {
    match node? {
        Node::Time { text, geometry } => Some((
            text.clone(),
            geometry.map(|g| g.align),
            geometry.is_some_and(|g| g.fill),
        )),
        Node::Text(lines) => Some((lines.join(" "), None, false)),
        _ => None,
    }
}

/// Lay out `row` across `width` columns.
pub fn layout_row(row: &Row, width: u16, scale: CellScale) -> RowLayout {
    let time = time_content(row.child(Slot::Time));
    let time_width = time.as_ref().map_or(0, |(text, _, fill)| {
        if *fill {
            width / 2
        } else {
            let min = scale.to_cells(MIN_TIME_WIDTH);
            min.max(text_width(std::slice::from_ref(text))).min(width)
        }
    });
    let segment_width = width.saturating_sub(time_width);

    // Horizontal order follows the slots; the circle is absolute.
    let time_first = row
        .slots()
        .iter()
        .position(|s| *s == Slot::Time)
        .zip(row.slots().iter().position(|s| *s == Slot::Event))
        .map_or(true, |(t, e)| t < e);
    let (time_x, segment_x) = if time_first {
        (0, time_width)
    } else {
        (segment_width, 0)
    };

    let mut layout = RowLayout {
        index: row.index,
        time: None,
        time_text: None,
        body: None,
        line_x: None,
        content: Span::default(),
        lines: Vec::new(),
        line_color: None,
        circle_x: None,
        circle_glyph: CIRCLE,
        circle_color: None,
        inner: None,
        height: 1,
    };

    if let Some((text, align, _)) = time {
        layout.time = Some((
            Span::new(time_x, time_width),
            align.unwrap_or(Align::Start),
        ));
        layout.time_text = Some(text);
    }

    if let Some(Node::Event {
        geometry,
        detail,
        separator,
        ..
    }) = row.child(Slot::Event)
    {
        let edge = geometry.and_then(|g| g.edge);
        let (body, line_x, content) = match edge {
            Some(edge) => {
                let margin = scale.to_cells(edge.margin);
                let padding = scale.to_cells(edge.padding);
                match edge.side {
                    Side::Left => {
                        let body = Span::new(
                            segment_x.saturating_add(margin),
                            segment_width.saturating_sub(margin),
                        );
                        let content = Span::new(
                            body.x.saturating_add(1 + padding),
                            body.width.saturating_sub(1 + padding),
                        );
                        (body, Some(body.x), content)
                    }
                    Side::Right => {
                        let body = Span::new(segment_x, segment_width.saturating_sub(margin));
                        let line = (body.x + body.width).checked_sub(1);
                        let content = Span::new(body.x, body.width.saturating_sub(1 + padding));
                        (body, line, content)
                    }
                }
            }
            // Default event style: a plain line on the left edge.
            None => {
                let body = Span::new(segment_x, segment_width);
                let line = geometry.is_some().then_some(body.x);
                let content = Span::new(body.x.saturating_add(2), body.width.saturating_sub(2));
                (body, line, content)
            }
        };
        layout.body = Some(body);
        layout.line_x = line_x.filter(|_| body.width > 0);
        layout.line_color = geometry.map(|g| g.border_color);
        layout.content = content;
        layout.lines = body_lines(detail.as_deref(), *separator);
    }

    match row.child(Slot::Circle) {
        Some(Node::Circle { geometry, inner }) => {
            layout.circle_glyph = marker_glyph(inner.as_ref());
            layout.inner.clone_from(inner);
            layout.circle_x = match geometry {
                Some(g) if g.is_visible() => {
                    layout.circle_color = Some(g.color);
                    Some(scale.column_of(g.center()))
                }
                Some(_) => None,
                // Default circle style: offset by half its size, so centred
                // on the row's left edge.
                None => {
                    let left = -DEFAULT_CIRCLE_SIZE / 2.0;
                    Some(scale.column_of(left + DEFAULT_CIRCLE_SIZE / 2.0))
                }
            };
        }
        Some(Node::Text(text)) => {
            if let Some(c) = text.first().and_then(|t| t.chars().next()) {
                layout.circle_glyph = c;
                layout.circle_x = Some(0);
            }
        }
        _ => {}
    }

    // Content, then one spacer line the connecting line runs through.
    layout.height = (layout.lines.len().max(1) + 1).min(usize::from(u16::MAX)) as u16;
    layout
}

/// Truncate `s` to `max_width` columns, adding an ellipsis if needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let (budget, ellipsis) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}
