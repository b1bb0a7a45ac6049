//! Host-neutral style overrides.
//!
//! Each visual sub-element of the timeline has an optional override slot.
//! Overrides are patches: they are applied on top of the built-in style for
//! the element and never replace it wholesale.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A partial style. Unset fields leave the base style untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fg: Option<Color>,
    #[serde(
        default,
        deserialize_with = "crate::color::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dim: Option<bool>,
}

impl StyleOverride {
    /// Compose `other` over `self`; fields set in `other` win.
    #[must_use]
    pub fn patch(self, other: Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            dim: other.dim.or(self.dim),
        }
    }

    /// Compose an optional override slot over `self`.
    #[must_use]
    pub fn patch_opt(self, other: Option<Self>) -> Self {
        match other {
            Some(other) => self.patch(other),
            None => self,
        }
    }

    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }
}

/// Override slots for every visual sub-element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    pub container: Option<StyleOverride>,
    pub list: Option<StyleOverride>,
    pub row: Option<StyleOverride>,
    pub time_container: Option<StyleOverride>,
    pub time: Option<StyleOverride>,
    pub circle: Option<StyleOverride>,
    pub dot: Option<StyleOverride>,
    pub icon: Option<StyleOverride>,
    pub title: Option<StyleOverride>,
    pub description: Option<StyleOverride>,
    pub detail: Option<StyleOverride>,
    pub separator: Option<StyleOverride>,
}
