//! Row composition.
//!
//! A row is the time label, the event body and the circle marker arranged in
//! an order that depends on the column format and, for two-column layouts,
//! on the row's parity. Each sub-element is produced by a renderer strategy;
//! the composer only sees the traits, never the defaults.

use crate::config::{ColumnFormat, TimelineConfig};
use crate::geometry::{
    is_left_row, resolve_circle, resolve_event, resolve_time, CircleGeometry, EventGeometry,
    ResolvedAttrs, TimeGeometry,
};
use crate::item::TimelineItem;
use crate::marker::{select_inner, InnerContent};
use crate::measure::MeasuredGeometry;

/// A sub-element position within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Time,
    Event,
    Circle,
}

/// A node of the composed visual tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Time {
        text: String,
        geometry: Option<TimeGeometry>,
    },
    /// The event body: connecting line plus detail content.
    Event {
        geometry: Option<EventGeometry>,
        detail: Option<Box<Node>>,
        separator: bool,
        /// Whether activating the body does anything.
        pressable: bool,
    },
    Detail {
        title: String,
        description: Option<String>,
    },
    Circle {
        geometry: Option<CircleGeometry>,
        inner: Option<InnerContent>,
    },
    /// Free-form lines, for custom renderers.
    Text(Vec<String>),
}

impl Node {
    /// Convenience for custom renderers returning plain lines.
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Text(lines.into_iter().map(Into::into).collect())
    }
}

/// Everything a renderer may need to know about the row being composed.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub index: usize,
    /// Whether the row's line fades out as the end of the timeline.
    pub is_last: bool,
    pub config: &'a TimelineConfig,
    pub measured: Option<MeasuredGeometry>,
}

/// Renders the time label of a row.
pub trait TimeRenderer {
    fn render_time(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node>;
}

/// Renders the detail content inside the event body.
pub trait DetailRenderer {
    fn render_detail(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node>;
}

/// Renders the circle marker of a row.
pub trait CircleRenderer {
    fn render_circle(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node>;
}

impl<F> TimeRenderer for F
where
    F: Fn(&TimelineItem, usize) -> Option<Node>,
{
    fn render_time(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node> {
        self(item, ctx.index)
    }
}

impl<F> DetailRenderer for F
where
    F: Fn(&TimelineItem, usize) -> Option<Node>,
{
    fn render_detail(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node> {
        self(item, ctx.index)
    }
}

impl<F> CircleRenderer for F
where
    F: Fn(&TimelineItem, usize) -> Option<Node>,
{
    fn render_circle(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node> {
        self(item, ctx.index)
    }
}

/// Built-in time label: the item's time string, hidden when `show_time`
/// is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTimeRenderer;

impl TimeRenderer for DefaultTimeRenderer {
    fn render_time(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node> {
        if !ctx.config.show_time {
            return None;
        }
        Some(Node::Time {
            text: item.time.clone(),
            geometry: resolve_time(ctx.config.column_format, ctx.index),
        })
    }
}

/// Built-in detail: title, plus the description when there is one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDetailRenderer;

impl DetailRenderer for DefaultDetailRenderer {
    fn render_detail(&self, item: &TimelineItem, _ctx: &RowContext<'_>) -> Option<Node> {
        Some(Node::Detail {
            title: item.title.clone(),
            description: item.description.clone(),
        })
    }
}

/// Built-in circle marker with optional inner content.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCircleRenderer;

impl CircleRenderer for DefaultCircleRenderer {
    fn render_circle(&self, item: &TimelineItem, ctx: &RowContext<'_>) -> Option<Node> {
        let config = ctx.config;
        let attrs = ResolvedAttrs::resolve(item, config);
        Some(Node::Circle {
            geometry: resolve_circle(config.column_format, item, config, ctx.measured),
            inner: select_inner(config.inner_circle, item, config, attrs.circle_size),
        })
    }
}

/// The renderer strategies used by a timeline.
pub struct Renderers {
    pub time: Box<dyn TimeRenderer>,
    pub detail: Box<dyn DetailRenderer>,
    pub circle: Box<dyn CircleRenderer>,
}

impl Default for Renderers {
    fn default() -> Self {
        Self {
            time: Box::new(DefaultTimeRenderer),
            detail: Box::new(DefaultDetailRenderer),
            circle: Box::new(DefaultCircleRenderer),
        }
    }
}

impl std::fmt::Debug for Renderers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderers").finish_non_exhaustive()
    }
}

/// A composed child of a row, tagged with its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RowChild {
    pub slot: Slot,
    pub node: Node,
}

/// One composed row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    /// Positional key; reordering items is indistinguishable from updating
    /// them.
    pub key: String,
    pub children: Vec<RowChild>,
}

impl Row {
    /// Slots of the rendered children, in order.
    pub fn slots(&self) -> Vec<Slot> {
        self.children.iter().map(|c| c.slot).collect()
    }

    /// The node rendered for `slot`, if any.
    pub fn child(&self, slot: Slot) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.slot == slot)
            .map(|c| &c.node)
    }
}

/// Positional row key.
pub fn row_key(index: usize) -> String {
    format!("item-{index}")
}

/// Sub-element order for a row. The circle always comes last.
pub fn slot_order(format: ColumnFormat, index: usize) -> Option<[Slot; 3]> {
    const TIME_FIRST: [Slot; 3] = [Slot::Time, Slot::Event, Slot::Circle];
    const EVENT_FIRST: [Slot; 3] = [Slot::Event, Slot::Time, Slot::Circle];

    match format {
        ColumnFormat::SingleColumnLeft => Some(TIME_FIRST),
        ColumnFormat::SingleColumnRight | ColumnFormat::SingleColumnCenter => Some(EVENT_FIRST),
        ColumnFormat::TwoColumn if is_left_row(index) => Some(TIME_FIRST),
        ColumnFormat::TwoColumn => Some(EVENT_FIRST),
        ColumnFormat::Unrecognized => None,
    }
}

/// The event body. Not overridable; it wraps the detail renderer's output.
fn render_event(
    item: &TimelineItem,
    ctx: &RowContext<'_>,
    renderers: &Renderers,
    pressable: bool,
) -> Node {
    let config = ctx.config;
    Node::Event {
        geometry: resolve_event(config.column_format, ctx.index, item, config, ctx.is_last),
        detail: renderers.detail.render_detail(item, ctx).map(Box::new),
        separator: config.separator,
        pressable,
    }
}

/// Compose a single row.
pub fn compose_row(
    item: &TimelineItem,
    ctx: &RowContext<'_>,
    renderers: &Renderers,
    pressable: bool,
) -> Row {
    let children = slot_order(ctx.config.column_format, ctx.index)
        .map(|order| {
            order
                .into_iter()
                .filter_map(|slot| {
                    let node = match slot {
                        Slot::Time => renderers.time.render_time(item, ctx),
                        Slot::Event => Some(render_event(item, ctx, renderers, pressable)),
                        Slot::Circle => renderers.circle.render_circle(item, ctx),
                    }?;
                    Some(RowChild { slot, node })
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Row {
        index: ctx.index,
        key: row_key(ctx.index),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::InnerCircle;
    use super::Slot::{Circle, Event, Time};

    fn ctx(config: &TimelineConfig, index: usize) -> RowContext<'_> {
        RowContext {
            index,
            is_last: false,
            config,
            measured: None,
        }
    }

    #[test]
    fn test_order_table() {
        let cases = [
            (ColumnFormat::SingleColumnLeft, 0, [Time, Event, Circle]),
            (ColumnFormat::SingleColumnLeft, 1, [Time, Event, Circle]),
            (ColumnFormat::SingleColumnRight, 0, [Event, Time, Circle]),
            (ColumnFormat::SingleColumnRight, 1, [Event, Time, Circle]),
            (ColumnFormat::SingleColumnCenter, 0, [Event, Time, Circle]),
            (ColumnFormat::SingleColumnCenter, 7, [Event, Time, Circle]),
            (ColumnFormat::TwoColumn, 0, [Time, Event, Circle]),
            (ColumnFormat::TwoColumn, 1, [Event, Time, Circle]),
            (ColumnFormat::TwoColumn, 2, [Time, Event, Circle]),
            (ColumnFormat::TwoColumn, 3, [Event, Time, Circle]),
        ];

        for (format, index, expected) in cases {
            assert_eq!(slot_order(format, index), Some(expected), "{format:?} #{index}");

            let config = TimelineConfig::with_format(format);
            let item = TimelineItem::new("10:00", "A");
            let row = compose_row(&item, &ctx(&config, index), &Renderers::default(), false);
            assert_eq!(row.slots(), expected.to_vec(), "{format:?} #{index}");
        }
    }

    #[test]
    fn test_unrecognized_format_composes_empty_row() {
        let config = TimelineConfig::with_format(ColumnFormat::Unrecognized);
        let item = TimelineItem::new("10:00", "A");
        let row = compose_row(&item, &ctx(&config, 0), &Renderers::default(), false);
        assert!(row.children.is_empty());
        assert_eq!(row.key, "item-0");
    }

    #[test]
    fn test_hidden_time_is_skipped() {
        let mut config = TimelineConfig::with_format(ColumnFormat::SingleColumnLeft);
        config.show_time = false;
        let item = TimelineItem::new("10:00", "A");

        let row = compose_row(&item, &ctx(&config, 0), &Renderers::default(), false);
        assert_eq!(row.slots(), vec![Event, Circle]);
    }

    #[test]
    fn test_default_detail_branches_on_description() {
        let config = TimelineConfig::default();
        let renderers = Renderers::default();

        let bare = TimelineItem::new("10:00", "Title only");
        let row = compose_row(&bare, &ctx(&config, 0), &renderers, false);
        let Some(Node::Event { detail, .. }) = row.child(Event) else {
            panic!("missing event");
        };
        assert_eq!(
            detail.as_deref(),
            Some(&Node::Detail {
                title: "Title only".into(),
                description: None
            })
        );

        let full = TimelineItem::new("10:00", "T").description("More");
        let row = compose_row(&full, &ctx(&config, 0), &renderers, false);
        let Some(Node::Event { detail, .. }) = row.child(Event) else {
            panic!("missing event");
        };
        assert!(matches!(
            detail.as_deref(),
            Some(Node::Detail { description: Some(d), .. }) if d == "More"
        ));
    }

    #[test]
    fn test_event_carries_separator_and_pressable() {
        let mut config = TimelineConfig::default();
        config.separator = true;
        let item = TimelineItem::new("10:00", "A");

        let row = compose_row(&item, &ctx(&config, 0), &Renderers::default(), true);
        assert!(matches!(
            row.child(Event),
            Some(Node::Event {
                separator: true,
                pressable: true,
                ..
            })
        ));
    }

    #[test]
    fn test_custom_renderers_replace_defaults() {
        let config = TimelineConfig::with_format(ColumnFormat::SingleColumnLeft);
        let renderers = Renderers {
            time: Box::new(|item: &TimelineItem, index: usize| {
                Some(Node::text([format!("{index}: {}", item.time)]))
            }),
            detail: Box::new(|item: &TimelineItem, _: usize| {
                Some(Node::text([item.title.to_uppercase()]))
            }),
            circle: Box::new(|_: &TimelineItem, _: usize| None),
        };
        let item = TimelineItem::new("10:00", "hello");

        let row = compose_row(&item, &ctx(&config, 4), &renderers, false);
        assert_eq!(row.slots(), vec![Time, Event]);
        assert_eq!(row.child(Time), Some(&Node::text(["4: 10:00"])));
        let Some(Node::Event { detail, geometry, .. }) = row.child(Event) else {
            panic!("missing event");
        };
        // The event body itself still uses the built-in geometry.
        assert!(geometry.is_some());
        assert_eq!(detail.as_deref(), Some(&Node::text(["HELLO"])));
    }

    #[test]
    fn test_default_circle_with_dot() {
        let mut config = TimelineConfig::with_format(ColumnFormat::SingleColumnLeft);
        config.inner_circle = InnerCircle::Dot;
        config.circle_size = Some(20.0);
        let item = TimelineItem::new("10:00", "A");

        let row = compose_row(&item, &ctx(&config, 0), &Renderers::default(), false);
        let Some(Node::Circle { inner, geometry }) = row.child(Circle) else {
            panic!("missing circle");
        };
        // Not measured yet.
        assert!(!geometry.unwrap().is_visible());
        assert_eq!(
            inner,
            &Some(InnerContent::Dot {
                diameter: 10.0,
                radius: 5.0,
                color: Color::WHITE
            })
        );
    }
}
