//! timeline-tui: Terminal host for the timeline engine
//!
//! This crate renders a [`timeline_engine::Timeline`] with ratatui:
//! - Cell layout of composed rows and the two-pass measurement render
//! - Scrolling, selection and press handling
//! - Headless rendering for the `render` command and tests

mod app;
mod event;
pub mod headless;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
pub mod timeline;
mod widgets;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use theme::Theme;
pub use timeline_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::{debug, info};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(items = app.state.len(), "starting timeline viewer");

    // 4 Hz tick rate
    let events = EventHandler::new(250);
    let result = run_loop(&mut terminal, &mut app, &events);

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| app.render(frame.area(), frame.buffer_mut()))?;

        // Corrected circle geometry is shown without waiting for input.
        if app.state.take_redraw() {
            debug!("corrective render");
            continue;
        }

        match events.next()? {
            Event::Key(key) => app.handle_action(key_to_action(key)),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            // Terminal will handle resize automatically
            Event::Tick | Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
