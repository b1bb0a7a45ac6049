//! Inner content of the circle marker.

use crate::color::Color;
use crate::config::{InnerCircle, TimelineConfig, DEFAULT_DOT_COLOR};
use crate::item::{IconSource, TimelineItem};

/// Content drawn inside a circle marker.
#[derive(Debug, Clone, PartialEq)]
pub enum InnerContent {
    /// An image filling the circle.
    Icon { source: IconSource, size: f32 },
    /// A filled dot at half the circle's diameter.
    Dot {
        diameter: f32,
        radius: f32,
        color: Color,
    },
}

/// Select the inner content for a circle of `circle_size`.
///
/// Icon mode without any icon source, on the item or in the configuration,
/// selects nothing.
pub fn select_inner(
    mode: InnerCircle,
    item: &TimelineItem,
    config: &TimelineConfig,
    circle_size: f32,
) -> Option<InnerContent> {
    match mode {
        InnerCircle::Icon => {
            let source = item.icon.as_ref().or(config.icon.as_ref())?.clone();
            Some(InnerContent::Icon {
                source,
                size: circle_size,
            })
        }
        InnerCircle::Dot => Some(InnerContent::Dot {
            diameter: circle_size / 2.0,
            radius: circle_size / 4.0,
            color: item
                .dot_color
                .or(config.dot_color)
                .unwrap_or(DEFAULT_DOT_COLOR),
        }),
        InnerCircle::None | InnerCircle::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_defaults_to_white_half_size() {
        let item = TimelineItem::new("10:00", "A");
        let config = TimelineConfig::default();

        let inner = select_inner(InnerCircle::Dot, &item, &config, 20.0);
        assert_eq!(
            inner,
            Some(InnerContent::Dot {
                diameter: 10.0,
                radius: 5.0,
                color: Color::WHITE
            })
        );
    }

    #[test]
    fn test_dot_color_chain() {
        let red = Color::rgb(255, 0, 0);
        let green = Color::rgb(0, 255, 0);
        let mut config = TimelineConfig::default();
        config.dot_color = Some(green);

        let plain = TimelineItem::new("1", "a");
        let Some(InnerContent::Dot { color, .. }) =
            select_inner(InnerCircle::Dot, &plain, &config, 16.0)
        else {
            panic!("expected dot");
        };
        assert_eq!(color, green);

        let item = TimelineItem::new("1", "a").dot_color(red);
        let Some(InnerContent::Dot { color, .. }) =
            select_inner(InnerCircle::Dot, &item, &config, 16.0)
        else {
            panic!("expected dot");
        };
        assert_eq!(color, red);
    }

    #[test]
    fn test_icon_prefers_item_source() {
        let mut config = TimelineConfig::default();
        config.icon = Some(IconSource::new("default.png"));

        let plain = TimelineItem::new("1", "a");
        assert_eq!(
            select_inner(InnerCircle::Icon, &plain, &config, 16.0),
            Some(InnerContent::Icon {
                source: IconSource::new("default.png"),
                size: 16.0
            })
        );

        let item = TimelineItem::new("1", "a").icon(IconSource::new("bell.png"));
        assert_eq!(
            select_inner(InnerCircle::Icon, &item, &config, 24.0),
            Some(InnerContent::Icon {
                source: IconSource::new("bell.png"),
                size: 24.0
            })
        );
    }

    #[test]
    fn test_icon_without_source_selects_nothing() {
        let item = TimelineItem::new("1", "a");
        let config = TimelineConfig::default();
        assert_eq!(select_inner(InnerCircle::Icon, &item, &config, 16.0), None);
    }

    #[test]
    fn test_none_and_unrecognized_select_nothing() {
        let item = TimelineItem::new("1", "a").dot_color(Color::BLACK);
        let config = TimelineConfig::default();
        assert_eq!(select_inner(InnerCircle::None, &item, &config, 16.0), None);
        assert_eq!(
            select_inner(InnerCircle::Unrecognized, &item, &config, 16.0),
            None
        );
    }
}
