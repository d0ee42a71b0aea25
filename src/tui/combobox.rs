//! Dropdown state machine for the picker.
//!
//! Holds the menu open/closed state, the highlighted row and the input text.
//! The picker drives it with [`ComboAction`]s and reacts to the returned
//! [`ComboOutcome`]; nothing else mutates this state.

use crate::tui::line_input::LineInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboAction {
    Type(char),
    Paste(String),
    DeleteBack,
    DeleteForward,
    DeleteToStart,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ArrowDown,
    ArrowUp,
    Enter,
    ClickItem(usize),
    Hover(usize),
    Escape,
    Blur,
    /// Replace the text without opening the menu
    SetInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboOutcome {
    Nothing,
    InputChanged,
    /// The row at this index of the visible list was picked
    Selected(usize),
}

#[derive(Debug, Clone, Default)]
pub struct Combobox {
    pub menu: MenuState,
    pub highlighted: usize,
    pub input: LineInput,
}

impl Combobox {
    pub fn is_open(&self) -> bool {
        self.menu == MenuState::Open
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    /// Apply one transition. `item_count` is the number of rows currently
    /// offered in the menu.
    pub fn apply(&mut self, action: ComboAction, item_count: usize) -> ComboOutcome {
        tracing::trace!(?action, item_count, menu = ?self.menu, "combobox action");
        match action {
            ComboAction::Type(c) => {
                self.input.insert_char(c);
                self.input_changed()
            }
            ComboAction::Paste(text) => {
                if text.is_empty() {
                    return ComboOutcome::Nothing;
                }
                self.input.insert_str(&text);
                self.input_changed()
            }
            ComboAction::DeleteBack => {
                if self.input.backspace() {
                    self.input_changed()
                } else {
                    ComboOutcome::Nothing
                }
            }
            ComboAction::DeleteForward => {
                if self.input.delete() {
                    self.input_changed()
                } else {
                    ComboOutcome::Nothing
                }
            }
            ComboAction::DeleteToStart => {
                if self.input.delete_to_start() {
                    self.input_changed()
                } else {
                    ComboOutcome::Nothing
                }
            }
            ComboAction::CursorLeft => {
                self.input.move_left();
                ComboOutcome::Nothing
            }
            ComboAction::CursorRight => {
                self.input.move_right();
                ComboOutcome::Nothing
            }
            ComboAction::CursorHome => {
                self.input.move_home();
                ComboOutcome::Nothing
            }
            ComboAction::CursorEnd => {
                self.input.move_end();
                ComboOutcome::Nothing
            }
            ComboAction::ArrowDown => {
                if self.is_open() {
                    self.highlighted = (self.highlighted + 1).min(item_count.saturating_sub(1));
                } else {
                    self.menu = MenuState::Open;
                    self.highlighted = 0;
                }
                ComboOutcome::Nothing
            }
            ComboAction::ArrowUp => {
                if self.is_open() {
                    self.highlighted = self.highlighted.saturating_sub(1);
                }
                ComboOutcome::Nothing
            }
            ComboAction::Enter => {
                if self.is_open() && self.highlighted < item_count {
                    let index = self.highlighted;
                    self.reset_after_select();
                    ComboOutcome::Selected(index)
                } else {
                    ComboOutcome::Nothing
                }
            }
            ComboAction::ClickItem(index) => {
                if self.is_open() && index < item_count {
                    self.reset_after_select();
                    ComboOutcome::Selected(index)
                } else {
                    ComboOutcome::Nothing
                }
            }
            ComboAction::Hover(index) => {
                if self.is_open() && index < item_count {
                    self.highlighted = index;
                }
                ComboOutcome::Nothing
            }
            ComboAction::Escape => {
                self.menu = MenuState::Closed;
                self.highlighted = 0;
                if self.input.is_empty() {
                    ComboOutcome::Nothing
                } else {
                    self.input.clear();
                    ComboOutcome::InputChanged
                }
            }
            ComboAction::Blur => {
                self.menu = MenuState::Closed;
                self.highlighted = 0;
                self.input.clear();
                ComboOutcome::Nothing
            }
            ComboAction::SetInput(text) => {
                self.input.set(&text);
                self.highlighted = 0;
                ComboOutcome::InputChanged
            }
        }
    }

    /// Every text edit opens the menu and moves the highlight to the first row.
    fn input_changed(&mut self) -> ComboOutcome {
        self.menu = MenuState::Open;
        self.highlighted = 0;
        ComboOutcome::InputChanged
    }

    fn reset_after_select(&mut self) {
        self.menu = MenuState::Closed;
        self.highlighted = 0;
        self.input.clear();
    }
}
