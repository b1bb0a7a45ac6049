//! Test utilities for timeline-tui rendering tests.

use crate::app::App;
use crate::headless::render_to_string;
use crate::theme::Theme;
use ratatui::{backend::TestBackend, Terminal};
use timeline_engine::{ColumnFormat, TimelineConfig, TimelineItem};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Items titled `Event 0`, `Event 1`, ... one hour apart.
pub fn test_items(count: usize) -> Vec<TimelineItem> {
    (0..count)
        .map(|i| TimelineItem::new(format!("{:02}:00", (9 + i) % 24), format!("Event {i}")))
        .collect()
}

/// Create a single-column-left app with `count` items.
pub fn create_test_app(count: usize) -> App {
    create_test_app_with(
        test_items(count),
        TimelineConfig::with_format(ColumnFormat::SingleColumnLeft),
    )
}

pub fn create_test_app_with(items: Vec<TimelineItem>, config: TimelineConfig) -> App {
    App::new(items, config, Theme::default())
}

/// Render the app, including the corrective pass, and return its text.
pub fn render_app(app: &mut App, width: u16, height: u16) -> String {
    render_to_string(app, width, height).expect("Failed to render app")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app(4);
        assert_eq!(app.state.len(), 4);
        assert!(!app.should_quit);
        assert_eq!(app.page(), 1);
    }
}
