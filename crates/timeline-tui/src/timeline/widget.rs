//! Timeline widget for rendering composed rows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span as TextSpan},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};
use timeline_engine::{Align, InnerContent, StyleOverrides};
use unicode_width::UnicodeWidthStr;

use super::layout::{layout_row, truncate_to_width, BodyLine, CellScale, RowLayout, Span};
use super::state::TimelineState;
use crate::theme::{patch, to_color, Theme};

const LINE_GLYPH: &str = "\u{2502}"; // │
const SEPARATOR_GLYPH: &str = "\u{2500}"; // ─

/// Timeline pane widget.
pub struct TimelineWidget<'a> {
    theme: &'a Theme,
    scale: CellScale,
    focused: bool,
    /// Whether to render with a border (default: true).
    with_border: bool,
}

impl<'a> TimelineWidget<'a> {
    /// Create a new timeline widget.
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            scale: CellScale::default(),
            focused: false,
            with_border: true,
        }
    }

    /// Set whether the pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether to render with a border.
    #[must_use]
    pub fn with_border(mut self, border: bool) -> Self {
        self.with_border = border;
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: CellScale) -> Self {
        self.scale = scale;
        self
    }

    /// Paint one line of a row at screen row `y`.
    #[allow(clippy::too_many_arguments)]
    fn render_row_line(
        &self,
        layout: &RowLayout,
        line: u16,
        selected: bool,
        styles: &StyleOverrides,
        area: Rect,
        y: u16,
        buf: &mut Buffer,
    ) {
        let row_area = Rect::new(area.x, y, area.width, 1);
        buf.set_style(row_area, patch(Style::default(), styles.row));

        if line == 0 {
            if let (Some((span, align)), Some(text)) = (layout.time, &layout.time_text) {
                let cell = clip(span, area, y);
                buf.set_style(cell, patch(Style::default(), styles.time_container));
                let text = truncate_to_width(text, usize::from(span.width));
                let offset = match align {
                    Align::Start => 0,
                    Align::Center => span.width.saturating_sub(width_of(&text)) / 2,
                    Align::End => span.width.saturating_sub(width_of(&text)),
                };
                let style = patch(Style::default().fg(self.theme.subtext), styles.time);
                buf.set_stringn(
                    cell.x.saturating_add(offset),
                    y,
                    &text,
                    usize::from(cell.width.saturating_sub(offset)),
                    style,
                );
            }
        }

        if let Some(body_line) = layout.lines.get(usize::from(line)) {
            let content = clip(layout.content, area, y);
            buf.set_style(content, patch(Style::default(), styles.detail));
            let width = usize::from(content.width);
            let (text, style) = match body_line {
                BodyLine::Title(title) => {
                    let base = if selected {
                        Style::default()
                            .fg(self.theme.primary)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                    } else {
                        Style::default()
                            .fg(self.theme.text)
                            .add_modifier(Modifier::BOLD)
                    };
                    (truncate_to_width(title, width), patch(base, styles.title))
                }
                BodyLine::Description(text) => (
                    truncate_to_width(text, width),
                    patch(Style::default().fg(self.theme.subtext), styles.description),
                ),
                BodyLine::Text(text) => (
                    truncate_to_width(text, width),
                    Style::default().fg(self.theme.text),
                ),
                BodyLine::Separator => (
                    SEPARATOR_GLYPH.repeat(width),
                    patch(Style::default().fg(self.theme.border), styles.separator),
                ),
            };
            buf.set_stringn(content.x, y, &text, width, style);
        }

        // The connecting line runs through every line of the row.
        if let (Some(x), Some(color)) = (layout.line_x, layout.line_color.and_then(to_color)) {
            if x < area.width {
                buf.set_string(area.x + x, y, LINE_GLYPH, Style::default().fg(color));
            }
        }

        if line == 0 {
            self.render_circle(layout, styles, area, y, buf);
        }
    }

    fn render_circle(
        &self,
        layout: &RowLayout,
        styles: &StyleOverrides,
        area: Rect,
        y: u16,
        buf: &mut Buffer,
    ) {
        let Some(x) = layout
            .circle_x
            .and_then(|x| u16::try_from(x).ok())
            .filter(|&x| x < area.width)
        else {
            return;
        };
        let color = match layout.circle_color {
            Some(color) => match to_color(color) {
                Some(color) => color,
                None => return,
            },
            None => self.theme.muted,
        };

        let mut style = patch(Style::default().fg(color), styles.circle);
        style = match &layout.inner {
            Some(InnerContent::Dot { .. }) => patch(style, styles.dot),
            Some(InnerContent::Icon { .. }) => patch(style, styles.icon),
            None => style,
        };
        let mut glyph = [0u8; 4];
        buf.set_string(
            area.x + x,
            y,
            layout.circle_glyph.encode_utf8(&mut glyph),
            style,
        );
    }
}

fn width_of(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// Screen rectangle of a row-relative span on line `y`, clipped to `area`.
fn clip(span: Span, area: Rect, y: u16) -> Rect {
    let x = span.x.min(area.width);
    let width = span.width.min(area.width - x);
    Rect::new(area.x + x, y, width, 1)
}

impl StatefulWidget for TimelineWidget<'_> {
    type State = TimelineState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let styles = state.timeline().config().styles;

        // Determine inner area based on border setting
        let inner = if self.with_border {
            let border_style = if self.focused {
                Style::default().fg(self.theme.border_focused)
            } else {
                Style::default().fg(self.theme.border)
            };

            let block = Block::default()
                .title(" Timeline ")
                .title_style(Style::default().fg(self.theme.text))
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(patch(Style::default().bg(self.theme.base), styles.container));

            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            buf.set_style(area, patch(Style::default(), styles.container));
            area
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        buf.set_style(inner, patch(Style::default(), styles.list));

        // Empty state
        if state.is_empty() {
            let empty_msg = Line::from(vec![TextSpan::styled(
                "No events yet",
                Style::default().fg(self.theme.muted),
            )]);
            Paragraph::new(empty_msg).render(
                Rect::new(
                    inner.x + 2.min(inner.width),
                    inner.y + inner.height / 2,
                    inner.width.saturating_sub(4),
                    1,
                ),
                buf,
            );
            state.set_layout(Vec::new(), inner.height);
            state.report_scroll();
            return;
        }

        let layouts: Vec<RowLayout> = state
            .timeline()
            .rows()
            .iter()
            .map(|row| layout_row(row, inner.width, self.scale))
            .collect();
        state.set_layout(layouts.iter().map(|l| l.height).collect(), inner.height);

        let offset = state.scroll_offset();
        let visible_end = offset + usize::from(inner.height);
        let mut painted = Vec::new();

        for layout in &layouts {
            let Some(top) = state.row_top(layout.index) else {
                continue;
            };
            let bottom = top + usize::from(layout.height);
            if bottom <= offset || top >= visible_end {
                continue;
            }

            let selected = state.selected() == Some(layout.index);
            for line in 0..layout.height {
                let content_y = top + usize::from(line);
                if content_y < offset || content_y >= visible_end {
                    continue;
                }
                // Inside the viewport, so the distance fits the pane height.
                let y = inner.y + (content_y - offset) as u16;
                self.render_row_line(layout, line, selected, &styles, inner, y, buf);
            }
            painted.push(layout);
        }

        // Bodies report their frames once painted; the timeline keeps the
        // first non-zero one.
        for layout in painted {
            if let Some(measurement) = layout.measurement(self.scale) {
                state.report_layout(layout.index, measurement);
            }
        }
        state.report_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::buffer_to_string;
    use timeline_engine::{ColumnFormat, Timeline, TimelineConfig, TimelineItem};

    fn state(format: ColumnFormat, n: usize) -> TimelineState {
        let items = (0..n)
            .map(|i| TimelineItem::new(format!("{:02}:00", 9 + i), format!("Event {i}")))
            .collect();
        TimelineState::new(Timeline::new(items, TimelineConfig::with_format(format)))
    }

    fn render(state: &mut TimelineState, width: u16, height: u16) -> Buffer {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        TimelineWidget::new(&theme)
            .with_border(false)
            .render(area, &mut buf, state);
        buf
    }

    #[test]
    fn test_timeline_widget_creation() {
        let theme = Theme::default();
        let widget = TimelineWidget::new(&theme).focused(true);
        assert!(widget.focused);
        assert!(widget.with_border);
    }

    #[test]
    fn test_empty_state_message() {
        let mut state = state(ColumnFormat::SingleColumnLeft, 0);
        let buf = render(&mut state, 30, 5);
        assert!(buffer_to_string(&buf).contains("No events yet"));
    }

    #[test]
    fn test_first_render_requests_corrective_pass() {
        let mut state = state(ColumnFormat::SingleColumnLeft, 3);
        let first = render(&mut state, 40, 10);
        assert!(state.take_redraw());
        // No circles before the body is measured.
        assert!(!buffer_to_string(&first).contains('●'));

        let second = render(&mut state, 40, 10);
        assert!(!state.take_redraw());
        let text = buffer_to_string(&second);
        assert!(text.contains('●'));
        assert!(text.contains("Event 0"));
        assert!(text.contains("09:00"));
    }

    #[test]
    fn test_circle_painted_on_line_column() {
        let mut state = state(ColumnFormat::SingleColumnLeft, 2);
        render(&mut state, 40, 10);
        let buf = render(&mut state, 40, 10);
        // Time column is 11 wide, then a 5 cell gutter.
        assert_eq!(buf[(16, 0)].symbol(), "●");
        assert_eq!(buf[(16, 1)].symbol(), "│");
    }

    #[test]
    fn test_last_line_not_painted() {
        let mut state = state(ColumnFormat::SingleColumnLeft, 1);
        render(&mut state, 40, 10);
        let buf = render(&mut state, 40, 10);
        assert_eq!(buf[(16, 1)].symbol(), " ");
    }

    #[test]
    fn test_rows_clip_to_viewport() {
        let mut state = state(ColumnFormat::SingleColumnLeft, 10);
        let buf = render(&mut state, 40, 4);
        let text = buffer_to_string(&buf);
        assert!(text.contains("Event 1"));
        assert!(!text.contains("Event 2"));
    }

    #[test]
    fn test_rows_past_u16_lines_are_painted() {
        // 33 000 two-line rows: 66 000 lines of content.
        let mut state = state(ColumnFormat::SingleColumnLeft, 33_000);
        render(&mut state, 40, 4);
        state.jump_to_end();
        let text = buffer_to_string(&render(&mut state, 40, 4));
        assert_eq!(state.scroll_offset(), 65_996);
        assert!(text.contains("Event 32998"));
        assert!(text.contains("Event 32999"));
    }

    #[test]
    fn test_scrolling_reports_page() {
        let mut state = state(ColumnFormat::SingleColumnLeft, 10);
        render(&mut state, 40, 4);
        state.scroll_down(9);
        render(&mut state, 40, 4);
        // Page tracking needs a listener; none is installed here.
        assert_eq!(state.page_number(), 1);
        assert_eq!(state.scroll_offset(), 9);
    }
}
