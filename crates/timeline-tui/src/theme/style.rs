//! Bridges from engine colors and style overrides to ratatui styles.

use ratatui::style::{Color, Modifier, Style};
use timeline_engine::{Color as EngineColor, StyleOverride};

/// Convert an engine color. Transparent colors have no terminal equivalent
/// and map to `None`: callers paint nothing.
pub fn to_color(color: EngineColor) -> Option<Color> {
    if color.is_transparent() {
        None
    } else {
        Some(Color::Rgb(color.r, color.g, color.b))
    }
}

/// Compose an optional override slot on top of a built-in style.
pub fn patch(style: Style, over: Option<StyleOverride>) -> Style {
    let Some(over) = over else {
        return style;
    };

    let mut style = style;
    if let Some(fg) = over.fg {
        style = match to_color(fg) {
            Some(fg) => style.fg(fg),
            None => style.fg(Color::Reset),
        };
    }
    if let Some(bg) = over.bg {
        style = match to_color(bg) {
            Some(bg) => style.bg(bg),
            None => style.bg(Color::Reset),
        };
    }
    for (flag, modifier) in [
        (over.bold, Modifier::BOLD),
        (over.italic, Modifier::ITALIC),
        (over.dim, Modifier::DIM),
    ] {
        style = match flag {
            Some(true) => style.add_modifier(modifier),
            Some(false) => style.remove_modifier(modifier),
            None => style,
        };
    }
    style
}
