//! Terminal UI demo using crossterm and ratatui.
//!
//! This demo drives the fontpad keyboard core from a terminal: typed keys go
//! through the dispatcher into a rope-backed text field.
//! Run with: cargo run --example tui_crossterm [FONT_DIR]
//!
//! F1 shift, F2/F3 symbol pages, F4 letters, F5 clipboard, F6 fonts,
//! F7 hold/release backspace, Ctrl-Y copy field to history, Ctrl-C quit.
//! In the clipboard view: 1-9 paste, x clear. In the font view: 1-9 select, 0 default.

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fontpad::{
    ClipboardHistory, CommitText, Dispatcher, EditorInfo, FontCatalog, InputConnection, KeyEvent,
    KeyboardAction, KeyboardLayout, ShiftState, keymap,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use ropey::Rope;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Text field backed by a rope, cursor always at the end unless text is selected
struct RopeField {
    rope: Rope,
    events: Vec<KeyEvent>,
    last_font: Option<String>,
}

impl RopeField {
    fn new() -> Self {
        Self {
            rope: Rope::new(),
            events: Vec::new(),
            last_font: None,
        }
    }
}

impl InputConnection for RopeField {
    fn commit_text(&mut self, text: CommitText, _cursor: i32) {
        self.last_font = text.span.as_ref().map(|s| s.typeface.name.clone());
        let end = self.rope.len_chars();
        self.rope.insert(end, &text.text);
    }

    fn delete_surrounding_text(&mut self, before: u32, _after: u32) {
        let end = self.rope.len_chars();
        let start = end.saturating_sub(before as usize);
        self.rope.remove(start..end);
    }

    fn selected_text(&self) -> Option<String> {
        None
    }

    fn send_key_event(&mut self, event: KeyEvent) {
        if event.direction == fontpad::KeyDirection::Up
            && event.code == fontpad::KeyCode::Enter
        {
            let end = self.rope.len_chars();
            self.rope.insert_char(end, '\n');
        }
        self.events.push(event);
    }
}

struct App {
    dispatcher: Dispatcher<RopeField>,
    message: String,
    should_quit: bool,
}

impl App {
    fn new(font_dir: PathBuf) -> Self {
        let clipboard = Arc::new(ClipboardHistory::default());
        let fonts = Arc::new(FontCatalog::new(font_dir));
        let mut dispatcher = Dispatcher::new(clipboard, fonts);
        dispatcher.start_input(RopeField::new(), EditorInfo::default());
        Self {
            dispatcher,
            message: String::from("Type away. F1 shift, F5 clipboard, F6 fonts, Ctrl-C quits."),
            should_quit: false,
        }
    }

    fn field(&self) -> Option<&RopeField> {
        self.dispatcher.connection()
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            match event.code {
                CKeyCode::Char('c') => self.should_quit = true,
                CKeyCode::Char('y') => {
                    let text = self.field().map(|f| f.rope.to_string()).unwrap_or_default();
                    self.dispatcher.clipboard().add(text);
                    self.message = String::from("Copied field to clipboard history");
                }
                _ => {}
            }
            return;
        }

        let layout = self.dispatcher.state().current_layout;
        match (layout, event.code) {
            (KeyboardLayout::Clipboard, CKeyCode::Char(c)) => self.clipboard_key(c),
            (KeyboardLayout::FontSelector, CKeyCode::Char(c)) => self.font_key(c),
            (_, CKeyCode::Char(' ')) => self.dispatcher.press_key(keymap::SPACE),
            (_, CKeyCode::Char(c)) => self.dispatcher.press_key(&c.to_string()),
            (_, CKeyCode::Enter) => self.dispatcher.handle_action(KeyboardAction::Enter),
            (_, CKeyCode::Tab) => self.dispatcher.handle_action(KeyboardAction::Tab),
            (_, CKeyCode::Backspace) => self.dispatcher.handle_action(KeyboardAction::Backspace),
            (_, CKeyCode::F(1)) => self.dispatcher.handle_action(KeyboardAction::Shift),
            (_, CKeyCode::F(2)) => self.dispatcher.handle_action(KeyboardAction::SwitchToSymbols),
            (_, CKeyCode::F(3)) => self.dispatcher.handle_action(KeyboardAction::SwitchToSymbols2),
            (_, CKeyCode::F(4)) => self.dispatcher.handle_action(KeyboardAction::SwitchToAlphabetic),
            (KeyboardLayout::Clipboard, CKeyCode::F(5)) => {
                self.dispatcher.handle_action(KeyboardAction::HideClipboard)
            }
            (_, CKeyCode::F(5)) => self.dispatcher.handle_action(KeyboardAction::ShowClipboard),
            (KeyboardLayout::FontSelector, CKeyCode::F(6)) => {
                self.dispatcher.handle_action(KeyboardAction::HideFontSelector)
            }
            (_, CKeyCode::F(6)) => self.dispatcher.handle_action(KeyboardAction::ShowFontSelector),
            (_, CKeyCode::F(7)) => {
                let action = if self.dispatcher.is_backspace_repeating() {
                    KeyboardAction::StopBackspace
                } else {
                    KeyboardAction::StartBackspace
                };
                self.dispatcher.handle_action(action);
            }
            _ => {}
        }
    }

    fn clipboard_key(&mut self, c: char) {
        if c == 'x' {
            self.dispatcher.handle_action(KeyboardAction::ClearClipboard);
            return;
        }
        let Some(index) = c.to_digit(10).filter(|d| *d > 0) else {
            return;
        };
        let items = self.dispatcher.clipboard().items();
        if let Some(item) = items.get(index as usize - 1) {
            self.dispatcher
                .handle_action(KeyboardAction::PasteFromClipboard(item.content.clone()));
        }
    }

    fn font_key(&mut self, c: char) {
        let Some(index) = c.to_digit(10) else {
            return;
        };
        let font_id = match index {
            0 => String::new(),
            n => match self.dispatcher.fonts().fonts().get(n as usize - 1) {
                Some(font) => font.id.clone(),
                None => return,
            },
        };
        self.dispatcher
            .handle_action(KeyboardAction::SelectFont(font_id));
    }
}

fn keyboard_lines(app: &App) -> Vec<Line<'static>> {
    let state = app.dispatcher.state();
    match state.current_layout {
        KeyboardLayout::Clipboard => {
            let items = app.dispatcher.clipboard().items();
            if items.is_empty() {
                return vec![Line::from("(clipboard history is empty)")];
            }
            items
                .iter()
                .take(9)
                .enumerate()
                .map(|(i, item)| Line::from(format!("{}: {}", i + 1, item.preview.replace('\n', " ⏎ "))))
                .collect()
        }
        KeyboardLayout::FontSelector => {
            let mut lines = vec![Line::from("0: Default")];
            lines.extend(
                app.dispatcher
                    .fonts()
                    .fonts()
                    .iter()
                    .take(9)
                    .enumerate()
                    .map(|(i, font)| {
                        let selected = state.selected_font_id.as_deref() == Some(font.id.as_str());
                        let style = if selected {
                            Style::default().add_modifier(Modifier::REVERSED)
                        } else {
                            Style::default()
                        };
                        Line::from(Span::styled(format!("{}: {}", i + 1, font.name), style))
                    }),
            );
            lines
        }
        layout => keymap::rows(layout)
            .iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|label| {
                        let style = match (*label, state.shift_state) {
                            (keymap::SHIFT, ShiftState::Shifted) => Style::default().fg(Color::Yellow),
                            (keymap::SHIFT, ShiftState::CapsLock) => {
                                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                            }
                            _ => Style::default(),
                        };
                        let shown = if state.shift_state.is_active() && label.chars().count() == 1 {
                            label.to_uppercase()
                        } else {
                            label.to_string()
                        };
                        Span::styled(format!(" {shown} "), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect(),
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(8), Constraint::Length(3)].as_ref())
        .split(f.size());

    let text = app.field().map(|field| field.rope.to_string()).unwrap_or_default();
    let field = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("fontpad demo"),
    );
    f.render_widget(field, chunks[0]);

    let state = app.dispatcher.state();
    let keyboard = Paragraph::new(keyboard_lines(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{:?}", state.current_layout)),
    );
    f.render_widget(keyboard, chunks[1]);

    let font = app
        .field()
        .and_then(|field| field.last_font.clone())
        .unwrap_or_else(|| String::from("default"));
    let status = format!(
        "{} | shift: {:?} | font: {} | key events: {}",
        app.message,
        state.shift_state,
        font,
        app.field().map_or(0, |field| field.events.len())
    );
    let status = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);
}

fn main() -> Result<(), io::Error> {
    let font_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("fontpad-demo-fonts"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(font_dir);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        // Short poll so the backspace repeat keeps ticking
        if event::poll(Duration::from_millis(16))?
            && let Event::Key(key) = event::read()?
        {
            app.handle_crossterm_event(key);
            if app.should_quit {
                break;
            }
        }
        app.dispatcher.tick(Instant::now());
    }

    app.dispatcher.finish_input();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
