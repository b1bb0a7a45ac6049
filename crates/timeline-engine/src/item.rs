//! Timeline item data model.
//!
//! Items are owned by the caller and never mutated by the timeline. Every
//! visual attribute on an item is an optional override of the matching
//! [`TimelineConfig`](crate::TimelineConfig) value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Color;

/// Reference to an image resource drawn inside a circle marker.
///
/// The engine never loads the resource; hosts decide what a source means
/// (a path, a URI, or a glyph for terminal hosts).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconSource(pub String);

impl IconSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single dated event on the timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    /// Display string for the time column.
    pub time: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle_size: Option<f32>,
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub circle_color: Option<Color>,
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconSource>,
}

impl TimelineItem {
    /// Create an item with a time label and title and no overrides.
    pub fn new(time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    #[must_use]
    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    #[must_use]
    pub fn circle_size(mut self, size: f32) -> Self {
        self.circle_size = Some(size);
        self
    }

    #[must_use]
    pub fn circle_color(mut self, color: Color) -> Self {
        self.circle_color = Some(color);
        self
    }

    #[must_use]
    pub fn dot_color(mut self, color: Color) -> Self {
        self.dot_color = Some(color);
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: IconSource) -> Self {
        self.icon = Some(icon);
        self
    }
}
