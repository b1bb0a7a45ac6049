//! Configuration types for the timeline.
//!
//! This module defines the configuration schema: column format, marker
//! options, global defaults for item overrides, and style overrides.
//! Configuration is supplied once and treated as constant until the caller
//! replaces it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::Color;
use crate::item::{IconSource, TimelineItem};
use crate::style::StyleOverrides;

/// Compiled-in circle diameter.
pub const DEFAULT_CIRCLE_SIZE: f32 = 16.0;
/// Compiled-in circle color (`#007AFF`).
pub const DEFAULT_CIRCLE_COLOR: Color = Color::rgb(0, 122, 255);
/// Compiled-in connecting line width.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;
/// Compiled-in connecting line color (`#007AFF`).
pub const DEFAULT_LINE_COLOR: Color = Color::rgb(0, 122, 255);
pub const DEFAULT_DOT_COLOR: Color = Color::WHITE;
/// Margin and padding between the time column, the line and the detail.
pub const EVENT_GUTTER: f32 = 20.0;
/// Minimum width of the time column.
pub const MIN_TIME_WIDTH: f32 = 45.0;

/// Which side(s) of the line each sub-element renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnFormat {
    /// Time on the left, line and detail on the right.
    SingleColumnLeft,
    /// Detail on the left, line and time on the right.
    SingleColumnRight,
    #[default]
    SingleColumnCenter,
    /// Rows alternate between the left and right layouts.
    TwoColumn,
    /// Any value this version does not know. Produces no geometry.
    #[serde(other)]
    Unrecognized,
}

/// Content drawn inside the circle marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InnerCircle {
    #[default]
    None,
    Icon,
    Dot,
    #[serde(other)]
    Unrecognized,
}

/// Timeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineConfig {
    #[serde(default)]
    pub column_format: ColumnFormat,

    #[serde(default = "default_show_time")]
    pub show_time: bool,

    /// Draw a separator under each event's detail.
    #[serde(default)]
    pub separator: bool,

    #[serde(default)]
    pub inner_circle: InnerCircle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle_size: Option<f32>,
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub circle_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_color: Option<Color>,
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot_color: Option<Color>,

    /// When set, no row is treated as the last one for line fading.
    #[serde(default)]
    pub render_full_line: bool,

    /// Default icon for `InnerCircle::Icon` when an item has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconSource>,

    #[serde(default)]
    pub styles: StyleOverrides,

    /// Opaque settings forwarded to the host list engine.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

fn default_show_time() -> bool {
    true
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            column_format: ColumnFormat::default(),
            show_time: default_show_time(),
            separator: false,
            inner_circle: InnerCircle::default(),
            circle_size: None,
            circle_color: None,
            line_width: None,
            line_color: None,
            dot_color: None,
            render_full_line: false,
            icon: None,
            styles: StyleOverrides::default(),
            options: serde_json::Value::Null,
        }
    }
}

impl TimelineConfig {
    /// Create a default configuration with the given column format.
    pub fn with_format(column_format: ColumnFormat) -> Self {
        Self {
            column_format,
            ..Self::default()
        }
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }
}

/// Load an ordered item sequence from a JSON array file.
pub fn load_items(path: &Path) -> Result<Vec<TimelineItem>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    serde_json::from_str(&content).map_err(ConfigError::Parse)
}

/// Errors that can occur when loading or saving configuration and items.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TimelineConfig::default();
        assert_eq!(config.column_format, ColumnFormat::SingleColumnCenter);
        assert_eq!(config.inner_circle, InnerCircle::None);
        assert!(config.show_time);
        assert!(!config.separator);
        assert!(!config.render_full_line);
        assert!(config.options.is_null());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = TimelineConfig::with_format(ColumnFormat::TwoColumn);
        config.circle_color = Some(Color::rgb(1, 2, 3));
        config.options = serde_json::json!({ "initialNumToRender": 20 });

        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"two-column\""));
        let parsed: TimelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unrecognized_enums_are_absorbed() {
        let json = r#"{"columnFormat": "three-column", "innerCircle": "star"}"#;
        let config: TimelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.column_format, ColumnFormat::Unrecognized);
        assert_eq!(config.inner_circle, InnerCircle::Unrecognized);
    }

    #[test]
    fn test_unknown_colors_are_absorbed() {
        let json = r##"{
            "circleColor": "purple",
            "lineColor": "#00ff00",
            "styles": {"title": {"fg": "chartreuse-ish", "bold": true}}
        }"##;
        let config: TimelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.circle_color, None);
        assert_eq!(config.line_color, Some(Color::rgb(0, 255, 0)));
        let title = config.styles.title.unwrap();
        assert_eq!(title.fg, None);
        assert_eq!(title.bold, Some(true));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: TimelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TimelineConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("timeline.json");

        let mut config = TimelineConfig::with_format(ColumnFormat::SingleColumnLeft);
        config.line_width = Some(0.0);
        config.save(&path).unwrap();

        let loaded = TimelineConfig::load(&path).unwrap();
        assert_eq!(loaded.column_format, ColumnFormat::SingleColumnLeft);
        assert_eq!(loaded.line_width, Some(0.0));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TimelineConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"[{"time":"09:00","title":"A"},{"time":"10:00","title":"B","description":"b"}]"#,
        )
        .unwrap();

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].description.as_deref(), Some("b"));

        std::fs::write(
            &path,
            r#"[{"time":"09:00","title":"A","lineColor":"purple","dotColor":"hsl(0,0%,0%)"}]"#,
        )
        .unwrap();
        let items = load_items(&path).unwrap();
        assert_eq!(items[0].line_color, None);
        assert_eq!(items[0].dot_color, None);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load_items(&path), Err(ConfigError::Parse(_))));
    }
}
