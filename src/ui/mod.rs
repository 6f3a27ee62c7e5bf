// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for Setlist.
//!
//! Provides a ratatui-based song list that can be rearranged with the
//! keyboard or by dragging rows with the mouse, plus a status bar that
//! reports load and save outcomes.

mod setlist;

pub use setlist::SetlistWidget;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListState, Paragraph},
    Frame, Terminal,
};

use crate::session::Session;

/// Key event result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Selection up (moves the song while grabbed)
    Up,
    /// Selection down (moves the song while grabbed)
    Down,
    /// Jump to the first row (moves the song while grabbed)
    First,
    /// Jump to the last row (moves the song while grabbed)
    Last,
    /// Move the selected song up one slot
    MoveUp,
    /// Move the selected song down one slot
    MoveDown,
    /// Pick up or put down the selected song
    ToggleGrab,
    /// Put a grabbed song back where it came from
    CancelGrab,
    /// Save the order to the workbook
    Save,
    /// Reload from the workbook
    Reload,
    /// Toggle help
    ToggleHelp,
}

/// Map a key press to an action
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match (code, modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        // Reordering
        (KeyCode::Up, KeyModifiers::SHIFT) | (KeyCode::Char('K'), _) => KeyAction::MoveUp,
        (KeyCode::Down, KeyModifiers::SHIFT) | (KeyCode::Char('J'), _) => KeyAction::MoveDown,
        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => KeyAction::ToggleGrab,
        (KeyCode::Esc, _) => KeyAction::CancelGrab,

        // Navigation
        (KeyCode::Up, KeyModifiers::NONE) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
            KeyAction::Up
        }
        (KeyCode::Down, KeyModifiers::NONE) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            KeyAction::Down
        }
        (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::First,
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => KeyAction::Last,

        // Workbook
        (KeyCode::Char('s'), KeyModifiers::NONE) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            KeyAction::Save
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Reload,

        // Help
        (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::ToggleHelp,

        _ => KeyAction::None,
    }
}

/// A song picked up for moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Grab {
    /// Position the song had when it was picked up
    origin: usize,
}

/// Selection, drag and overlay state of the song list
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Selected row and scroll offset
    pub list: ListState,
    /// Help overlay visible
    pub show_help: bool,
    /// Inner area of the song list at the last draw, for mouse hits
    pub list_area: Rect,
    grab: Option<Grab>,
    quit_armed: bool,
}

impl ViewState {
    /// Create with the first of `len` rows selected
    pub fn new(len: usize) -> Self {
        let mut view = Self::default();
        view.reset(len);
        view
    }

    /// Selected row
    pub fn selected(&self) -> Option<usize> {
        self.list.selected()
    }

    /// Row being moved, if any
    pub fn grabbed(&self) -> Option<usize> {
        self.grab.and_then(|_| self.list.selected())
    }

    /// Forget selection and drag after the list was replaced
    pub fn reset(&mut self, len: usize) {
        self.grab = None;
        self.list = ListState::default().with_selected(if len > 0 { Some(0) } else { None });
    }

    /// Apply an action; returns false when the app should exit
    pub fn apply(&mut self, session: &mut Session, action: KeyAction) -> bool {
        if action != KeyAction::Quit {
            self.quit_armed = false;
        }

        let len = session.order().len();
        match action {
            KeyAction::None => {}
            KeyAction::Quit => {
                if session.order().is_modified() && !self.quit_armed {
                    self.quit_armed = true;
                    session.set_status("Unsaved changes: press q again to quit, s to save");
                } else {
                    return false;
                }
            }
            KeyAction::Up => {
                if let Some(i) = self.selected() {
                    if self.grab.is_some() {
                        self.move_selected(session, i, i.saturating_sub(1));
                    } else {
                        self.list.select(Some(i.saturating_sub(1)));
                    }
                }
            }
            KeyAction::Down => {
                if let Some(i) = self.selected() {
                    let target = (i + 1).min(len.saturating_sub(1));
                    if self.grab.is_some() {
                        self.move_selected(session, i, target);
                    } else {
                        self.list.select(Some(target));
                    }
                }
            }
            KeyAction::First => {
                if let Some(i) = self.selected() {
                    if self.grab.is_some() {
                        self.move_selected(session, i, 0);
                    } else {
                        self.list.select(Some(0));
                    }
                }
            }
            KeyAction::Last => {
                if let Some(i) = self.selected() {
                    if self.grab.is_some() {
                        self.move_selected(session, i, len - 1);
                    } else {
                        self.list.select(Some(len - 1));
                    }
                }
            }
            KeyAction::MoveUp => {
                if let Some(i) = self.selected() {
                    self.move_selected(session, i, i.saturating_sub(1));
                }
            }
            KeyAction::MoveDown => {
                if let Some(i) = self.selected() {
                    self.move_selected(session, i, (i + 1).min(len.saturating_sub(1)));
                }
            }
            KeyAction::ToggleGrab => {
                if self.grab.is_some() {
                    self.drop_grabbed(session);
                } else if let Some(i) = self.selected() {
                    self.grab = Some(Grab { origin: i });
                }
            }
            KeyAction::CancelGrab => {
                if let (Some(grab), Some(i)) = (self.grab.take(), self.selected()) {
                    self.move_selected(session, i, grab.origin);
                }
            }
            KeyAction::Save => {
                self.grab = None;
                session.save();
            }
            KeyAction::Reload => {
                session.reload();
                self.reset(session.order().len());
            }
            KeyAction::ToggleHelp => {
                self.show_help = !self.show_help;
            }
        }
        true
    }

    /// Handle a mouse event: press grabs a row, drag moves it, release drops it
    pub fn handle_mouse(&mut self, session: &mut Session, mouse: MouseEvent) {
        let len = session.order().len();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) = self.row_at(mouse.column, mouse.row, len) {
                    self.list.select(Some(row));
                    self.grab = Some(Grab { origin: row });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let (Some(_), Some(i)) = (self.grab, self.selected()) {
                    let target = self.row_clamped(mouse.row, len);
                    self.move_selected(session, i, target);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.grab.is_some() {
                    self.drop_grabbed(session);
                }
            }
            MouseEventKind::ScrollUp => {
                self.apply(session, KeyAction::Up);
            }
            MouseEventKind::ScrollDown => {
                self.apply(session, KeyAction::Down);
            }
            _ => {}
        }
    }

    /// List row under a screen position
    fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let area = self.list_area;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let index = self.list.offset() + (row - area.y) as usize;
        (index < len).then_some(index)
    }

    /// List row for a drag position, clamped to the list
    fn row_clamped(&self, row: u16, len: usize) -> usize {
        let area = self.list_area;
        let offset = self.list.offset();
        let index = if row < area.y {
            offset.saturating_sub(1)
        } else if row >= area.bottom() {
            offset + area.height as usize
        } else {
            offset + (row - area.y) as usize
        };
        index.min(len.saturating_sub(1))
    }

    fn move_selected(&mut self, session: &mut Session, from: usize, to: usize) {
        if session.order_mut().move_item(from, to) {
            self.list.select(Some(to));
        }
    }

    fn drop_grabbed(&mut self, session: &mut Session) {
        self.grab = None;
        if let Some(i) = self.selected() {
            if let Some(title) = session.order().get(i) {
                let message = format!("Moved '{}' to position {}", title, i + 1);
                session.set_status(message);
            }
        }
    }
}

/// Terminal UI application
pub struct App {
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Input poll interval
    poll_interval: Duration,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Set up the terminal
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            poll_interval: Duration::from_millis(250),
            running: true,
        })
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Poll for events with timeout
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        if event::poll(self.poll_interval)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, session: &Session, view: &mut ViewState) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame, session, view))?;
        Ok(())
    }

    /// Run until the user quits
    pub fn run(&mut self, session: &mut Session) -> io::Result<()> {
        let mut view = ViewState::new(session.order().len());

        while self.running {
            self.draw(session, &mut view)?;

            match self.poll_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if !view.apply(session, map_key(key.code, key.modifiers)) {
                        self.quit();
                    }
                }
                Some(Event::Mouse(mouse)) => view.handle_mouse(session, mouse),
                _ => {}
            }
        }

        Ok(())
    }

    /// Restore the terminal
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the whole screen
fn render(frame: &mut Frame, session: &Session, view: &mut ViewState) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Songs
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let path = session.workbook_path();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut title = vec![Span::raw(format!(" {} / {} ", name, session.config().sheet))];
    if session.order().is_modified() {
        title.push(Span::styled(
            "[modified] ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title));
    view.list_area = block.inner(chunks[0]);

    let widget = SetlistWidget::new(session.order().titles())
        .grabbed(view.grabbed())
        .block(block);
    frame.render_stateful_widget(widget, chunks[0], &mut view.list);

    render_status_bar(frame, chunks[1], session.status());

    if view.show_help {
        render_help_overlay(frame, area);
    }
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let text = if let Some(msg) = status {
        Span::styled(msg, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " Space: Grab/Drop | Shift+Up/Dn: Move | s: Save | r: Reload | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 46.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    // Clear background
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        help_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled("Navigate", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Up/Down, k/j  Select song"),
        Line::from("  Home/End, g/G First/last song"),
        Line::from(""),
        Line::from(Span::styled("Reorder", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Space/Enter   Grab or drop song"),
        Line::from("  Esc           Put grabbed song back"),
        Line::from("  Shift+Up/Dn   Move song one slot"),
        Line::from("  Mouse drag    Drag song to new slot"),
        Line::from(""),
        Line::from(Span::styled("Workbook", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  s/Ctrl+s      Save order"),
        Line::from("  r             Reload (discard changes)"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  h/?           Toggle help"),
        Line::from("  q/Ctrl+c      Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
