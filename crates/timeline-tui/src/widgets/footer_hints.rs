//! Footer status bar widget.
//!
//! Format: `Page 2 │ Standup            [j/k] scroll │ [q] quit`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "j/k", "Enter").
    pub key: String,
    /// The action description (e.g., "scroll", "press").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer status bar widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    page: Option<u32>,
    pressed: Option<&'a str>,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            page: None,
            pressed: None,
        }
    }

    /// Set the page number to display.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the title of the last pressed event.
    #[must_use]
    pub fn pressed(mut self, title: Option<&'a str>) -> Self {
        self.pressed = title;
        self
    }

    /// Hints for the timeline viewer.
    pub fn default_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("j/k", "scroll"),
            KeyHint::new("\u{2191}/\u{2193}", "select"),
            KeyHint::new("Enter", "press"),
            KeyHint::new("q", "quit"),
        ]
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        // Left side: Page │ Pressed
        if let Some(page) = self.page {
            left_spans.push(Span::styled(
                format!("Page {page}"),
                Style::default().fg(self.theme.subtext),
            ));
        }

        if let Some(pressed) = self.pressed {
            if !left_spans.is_empty() {
                left_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            left_spans.push(Span::styled(
                pressed.to_string(),
                Style::default().fg(self.theme.primary),
            ));
        }

        // Right side: hints (rendered right-aligned)
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }

            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.key.as_str(),
                Style::default().fg(self.theme.primary),
            ));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.action.as_str(),
                Style::default().fg(self.theme.subtext),
            ));
        }

        // Calculate widths for alignment
        let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
        let total_width = area.width as usize;

        let padding = total_width.saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }

        left_spans.extend(right_spans);

        let line = Line::from(left_spans);
        let paragraph = Paragraph::new(line).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}
