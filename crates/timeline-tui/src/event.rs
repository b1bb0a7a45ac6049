//! Event handling for the timeline viewer.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use std::io;
use std::time::Duration;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// No input within the tick rate.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Polls crossterm for input on the calling thread.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait up to one tick for the next event.
    pub fn next(&self) -> io::Result<Event> {
        loop {
            if !event::poll(self.tick_rate)? {
                return Ok(Event::Tick);
            }
            match event::read()? {
                // Release and repeat events are reported on some platforms.
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key));
                }
                CrosstermEvent::Mouse(mouse) => return Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                _ => {}
            }
        }
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    SelectPrev,
    SelectNext,
    Press,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    // Check for Ctrl+C first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Char('j') => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::Char('g') | KeyCode::Home => Action::Top,
        KeyCode::Char('G') | KeyCode::End => Action::Bottom,
        KeyCode::Up => Action::SelectPrev,
        KeyCode::Down => Action::SelectNext,
        KeyCode::Enter => Action::Press,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_to_action() {
        assert_eq!(key_to_action(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('j'))), Action::ScrollDown);
        assert_eq!(key_to_action(key(KeyCode::Char('k'))), Action::ScrollUp);
        assert_eq!(key_to_action(key(KeyCode::Char('g'))), Action::Top);
        assert_eq!(key_to_action(key(KeyCode::Char('G'))), Action::Bottom);
        assert_eq!(key_to_action(key(KeyCode::Up)), Action::SelectPrev);
        assert_eq!(key_to_action(key(KeyCode::Down)), Action::SelectNext);
        assert_eq!(key_to_action(key(KeyCode::Enter)), Action::Press);
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c), Action::Quit);
    }
}
