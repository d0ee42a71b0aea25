use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::keys::KeyBus;
use super::picker::{KeyResult, Picker, dispatch_key};
use super::render;
use super::theme::Theme;
use crate::model::config::PickerConfig;
use crate::model::option::SelectOption;

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Confirmed,
    Aborted,
}

/// The terminal host: one picker plus the shared key stream it listens on.
pub struct App {
    pub picker: Picker,
    pub bus: KeyBus<Picker>,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub exit: Option<Exit>,
}

impl App {
    pub fn new(config: &PickerConfig) -> Self {
        let bus = KeyBus::new();
        let mut picker = Picker::from_config(config).on_change(|items| {
            let values: Vec<&str> = items.iter().map(|i| i.value.as_str()).collect();
            tracing::info!(count = items.len(), ?values, "selection changed");
        });
        picker.mount(&bus);
        App {
            picker,
            bus,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            exit: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.exit.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Modifier(_)) {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.exit = Some(Exit::Aborted);
                return;
            }
            KeyCode::Char('d') if ctrl => {
                self.exit = Some(Exit::Confirmed);
                return;
            }
            _ => {}
        }

        if self.picker.is_focused() {
            let result = dispatch_key(&self.bus, &mut self.picker, key);
            if result == KeyResult::Ignored && key.code == KeyCode::Esc {
                self.picker.blur();
            }
            return;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.exit = Some(Exit::Confirmed),
            KeyCode::Tab | KeyCode::BackTab => self.picker.focus(),
            _ => {
                self.picker.focus();
                dispatch_key(&self.bus, &mut self.picker, key);
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.picker.click_at(mouse.column, mouse.row) {
                    self.picker.blur();
                }
            }
            MouseEventKind::Moved => self.picker.hover_at(mouse.column, mouse.row),
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.picker.paste(text);
    }
}

/// Run the interactive picker. Returns the final selection, or `None` when
/// the user cancelled.
pub fn run(config: &PickerConfig) -> Result<Option<Vec<SelectOption>>, Box<dyn std::error::Error>> {
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result?;
    tracing::debug!(exit = ?app.exit, count = app.picker.selected().len(), "picker closed");
    Ok(match app.exit {
        Some(Exit::Confirmed) => Some(app.picker.selected().to_vec()),
        _ => None,
    })
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let tree = render::render(frame, app);
            app.picker.set_a11y(tree);
        })?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
