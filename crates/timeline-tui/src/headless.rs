//! Headless rendering for the timeline viewer.
//!
//! Renders the app into a [`TestBackend`] instead of a real terminal, for
//! the `render` command and for tests. A render that captures the event
//! body measurement is followed by one corrective pass, the same as the
//! interactive loop does.

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::io;

use crate::app::App;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// Render `app` until no further pass is requested.
pub fn render_to_buffer(app: &mut App, width: u16, height: u16) -> io::Result<Buffer> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    loop {
        terminal.draw(|frame| app.render(frame.area(), frame.buffer_mut()))?;
        if !app.state.take_redraw() {
            break;
        }
    }
    Ok(terminal.backend().buffer().clone())
}

/// Render `app` to text.
pub fn render_to_string(app: &mut App, width: u16, height: u16) -> io::Result<String> {
    render_to_buffer(app, width, height).map(|buf| buffer_to_string(&buf))
}

/// Render `app` scrolled down by `offset` lines.
///
/// The offset is clamped against the content height, which is only known
/// after a first render.
pub fn render_at_offset(
    app: &mut App,
    width: u16,
    height: u16,
    offset: usize,
) -> io::Result<String> {
    render_to_buffer(app, width, height)?;
    app.state.scroll_down(offset);
    render_to_string(app, width, height)
}

/// Convert a buffer to a string representation.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_app;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", Style::default());
        buffer.set_string(0, 1, "World", Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }

    #[test]
    fn test_render_performs_corrective_pass() {
        let mut app = create_test_app(3);
        let text = render_to_string(&mut app, DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
        assert!(text.contains('●'));
        assert!(!app.state.needs_redraw());
        assert!(app.state.timeline().measured().is_some());
    }

    #[test]
    fn test_render_at_offset() {
        let mut app = create_test_app(30);
        let text = render_at_offset(&mut app, DEFAULT_WIDTH, DEFAULT_HEIGHT, 10).unwrap();
        assert_eq!(app.state.scroll_offset(), 10);
        // Two lines per row: row 5 is first.
        assert!(text.contains("Event 5"));
        assert!(!text.contains("Event 4"));
    }

    #[test]
    fn test_render_at_offset_clamps() {
        let mut app = create_test_app(3);
        render_at_offset(&mut app, DEFAULT_WIDTH, DEFAULT_HEIGHT, 100).unwrap();
        assert_eq!(app.state.scroll_offset(), 0);
    }
}
