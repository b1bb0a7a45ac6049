//! Theme components for the timeline TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette (Catppuccin Mocha/Latte/High Contrast)
//! - [`to_color`] / [`patch`] - Bridges from engine colors and style overrides to ratatui

mod colors;
mod style;

pub use colors::Theme;
pub use style::{patch, to_color};
