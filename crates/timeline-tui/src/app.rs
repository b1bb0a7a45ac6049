//! Application state and update logic for the timeline viewer.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    widgets::{StatefulWidget, Widget},
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use timeline_engine::{Timeline, TimelineConfig, TimelineItem};
use tracing::{debug, info};

use crate::event::Action;
use crate::theme::Theme;
use crate::timeline::{TimelineState, TimelineWidget, SCROLL_SPEED};
use crate::widgets::{FooterHints, KeyHint};

/// Main application state.
pub struct App {
    pub state: TimelineState,
    pub theme: Theme,
    pub should_quit: bool,
    /// Page number as last reported through the page callback.
    page: Rc<Cell<u32>>,
    /// Title of the last pressed event.
    pressed: Rc<RefCell<Option<String>>>,
    hints: Vec<KeyHint>,
    /// Inner area of the timeline pane from the last render.
    timeline_area: Rect,
}

impl App {
    /// Create the app, wiring the timeline's callbacks into the footer.
    pub fn new(items: Vec<TimelineItem>, config: TimelineConfig, theme: Theme) -> Self {
        let page = Rc::new(Cell::new(1));
        let pressed = Rc::new(RefCell::new(None));

        let page_sink = Rc::clone(&page);
        let pressed_sink = Rc::clone(&pressed);
        let timeline = Timeline::new(items, config)
            .on_page_changed(move |p| {
                debug!(page = p, "page changed");
                page_sink.set(p);
            })
            .on_event_press(move |item: &TimelineItem| {
                info!(title = %item.title, time = %item.time, "event pressed");
                *pressed_sink.borrow_mut() = Some(item.title.clone());
            });

        Self {
            state: TimelineState::new(timeline),
            theme,
            should_quit: false,
            page,
            pressed,
            hints: FooterHints::default_hints(),
            timeline_area: Rect::default(),
        }
    }

    /// Page number shown in the footer.
    pub fn page(&self) -> u32 {
        self.page.get()
    }

    /// Title of the last pressed event.
    pub fn last_pressed(&self) -> Option<String> {
        self.pressed.borrow().clone()
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollUp => self.state.scroll_up(1),
            Action::ScrollDown => self.state.scroll_down(1),
            Action::PageUp => self.state.page_up(),
            Action::PageDown => self.state.page_down(),
            Action::Top => self.state.jump_to_start(),
            Action::Bottom => self.state.jump_to_end(),
            Action::SelectPrev => self.state.select_prev(),
            Action::SelectNext => self.state.select_next(),
            Action::Press => {
                self.state.press_selected();
            }
            Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.state.scroll_up(SCROLL_SPEED),
            MouseEventKind::ScrollDown => self.state.scroll_down(SCROLL_SPEED),
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.timeline_area;
                if !area.contains(Position::new(mouse.column, mouse.row)) {
                    return;
                }
                if let Some(index) = self.state.y_to_row_index(mouse.row - area.y) {
                    self.state.select(index);
                    self.state.press_selected();
                }
            }
            _ => {}
        }
    }

    /// Render the timeline pane and footer.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let [main, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        TimelineWidget::new(&self.theme)
            .focused(true)
            .render(main, buf, &mut self.state);
        self.timeline_area = main.inner(Margin::new(1, 1));

        let pressed = self.pressed.borrow();
        FooterHints::new(&self.hints, &self.theme)
            .page(self.page.get())
            .pressed(pressed.as_deref())
            .render(footer, buf);
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("should_quit", &self.should_quit)
            .field("page", &self.page.get())
            .finish_non_exhaustive()
    }
}
