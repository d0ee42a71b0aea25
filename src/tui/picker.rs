//! The multi-select controller.
//!
//! Owns the selected items and the summary/editing mode, drives the
//! [`Combobox`] state machine, and turns its outcomes into selection changes.
//! Every add or remove reports the full list through the `on_change`
//! callback.

use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::config::{MORE_PLACEHOLDER, PickerConfig};
use crate::model::option::SelectOption;
use crate::ops::filter::filter_options;
use crate::ops::selection::SelectedItems;
use crate::tui::combobox::{ComboAction, ComboOutcome, Combobox};
use crate::tui::keys::{BACKSPACE, KeyBus, KeyStroke, Subscription};
use crate::tui::render::a11y::{A11yTree, Target};

/// Display mode, derived from the active flag and the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing selected, never activated
    Idle,
    /// One condensed pill stands for the whole selection
    Summary,
    /// Individual removable pills plus the input
    Editing,
}

/// Whether a click continues on to the enclosing box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Whether the picker consumed a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Handled,
    Ignored,
}

pub type ChangeHandler = Box<dyn FnMut(&[SelectOption])>;

static NEXT_PICKER_ID: AtomicU64 = AtomicU64::new(1);

pub struct Picker {
    id: u64,
    options: Vec<SelectOption>,
    allow_custom_values: bool,
    placeholder: String,
    selected: SelectedItems,
    active: bool,
    focused: bool,
    combo: Combobox,
    on_change: ChangeHandler,
    backspace: Option<Subscription<Picker>>,
    a11y: A11yTree,
}

impl Default for Picker {
    fn default() -> Self {
        Picker {
            id: NEXT_PICKER_ID.fetch_add(1, Ordering::Relaxed),
            options: Vec::new(),
            allow_custom_values: true,
            placeholder: PickerConfig::default().picker.placeholder,
            selected: SelectedItems::default(),
            active: false,
            focused: false,
            combo: Combobox::default(),
            on_change: Box::new(|_| {}),
            backspace: None,
            a11y: A11yTree::default(),
        }
    }
}

impl Picker {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Picker {
            options,
            ..Picker::default()
        }
    }

    pub fn from_config(config: &PickerConfig) -> Self {
        Picker::new(config.options.clone())
            .with_initial(&config.initial)
            .allow_custom_values(config.picker.allow_custom_values)
            .placeholder(&config.picker.placeholder)
    }

    pub fn with_initial(mut self, initial: &[SelectOption]) -> Self {
        self.selected = SelectedItems::from_initial(initial);
        self
    }

    pub fn allow_custom_values(mut self, allow: bool) -> Self {
        self.allow_custom_values = allow;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(&[SelectOption]) + 'static) -> Self {
        self.on_change = Box::new(handler);
        self
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start listening for Backspace on the shared key stream. The listener
    /// only hears presses dispatched to this picker.
    pub fn mount(&mut self, bus: &KeyBus<Picker>) {
        self.unmount();
        let sub = bus.subscribe_owned(self.id, BACKSPACE, |picker: &mut Picker, _: &KeyStroke| {
            picker.handle_backspace();
        });
        self.backspace = Some(sub);
    }

    /// Release the key listener. Also happens when the picker is dropped.
    pub fn unmount(&mut self) {
        if let Some(mut sub) = self.backspace.take() {
            sub.unsubscribe();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.backspace.as_ref().is_some_and(|s| s.is_active())
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// Identity on the key bus
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn selected(&self) -> &[SelectOption] {
        self.selected.as_slice()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn combobox(&self) -> &Combobox {
        &self.combo
    }

    pub fn input_text(&self) -> &str {
        self.combo.input_text()
    }

    pub fn is_open(&self) -> bool {
        self.combo.is_open()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn mode(&self) -> Mode {
        match (self.active, self.selected.is_empty()) {
            (true, _) => Mode::Editing,
            (false, true) => Mode::Idle,
            (false, false) => Mode::Summary,
        }
    }

    /// Placeholder for the input: the configured text until something is picked
    pub fn current_placeholder(&self) -> &str {
        if self.selected.is_empty() {
            &self.placeholder
        } else {
            MORE_PLACEHOLDER
        }
    }

    pub fn summary_text(&self) -> Option<String> {
        self.selected.summary_text()
    }

    /// Dropdown entries for the current input text
    pub fn visible_options(&self) -> Vec<SelectOption> {
        filter_options(
            &self.options,
            self.combo.input_text(),
            &self.selected,
            self.allow_custom_values,
        )
    }

    /// Accessible names from the most recent render
    pub fn a11y(&self) -> &A11yTree {
        &self.a11y
    }

    pub fn set_a11y(&mut self, tree: A11yTree) {
        self.a11y = tree;
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    pub fn activate(&mut self) {
        if !self.active {
            tracing::debug!("picker activated");
            self.active = true;
        }
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.activate();
    }

    /// Losing focus closes the menu and drops any typed text. The editing
    /// mode stays as it was.
    pub fn blur(&mut self) {
        self.focused = false;
        self.apply(ComboAction::Blur);
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    fn emit_change(&mut self) {
        (self.on_change)(self.selected.as_slice());
    }

    /// Add an item (deduplicated) and report the new list.
    pub fn select(&mut self, item: SelectOption) {
        tracing::debug!(value = %item.value, custom = item.is_custom(), "select");
        self.selected.add(item);
        self.emit_change();
    }

    /// Remove every item with this value and report the list, changed or not.
    pub fn remove_value(&mut self, value: &str) {
        self.selected.remove_value(value);
        self.emit_change();
    }

    /// Backspace listener: on an empty input the last pill goes.
    ///
    /// Runs before the keystroke's own edit, so it sees the text as it was
    /// when the key went down.
    fn handle_backspace(&mut self) {
        if !self.focused || !self.combo.input.is_empty() {
            return;
        }
        self.selected.pop_last();
        tracing::debug!(count = self.selected.len(), "backspace removed last pill");
        self.emit_change();
    }

    /// Pill body click: take the item back into the input for editing.
    fn edit_pill(&mut self, index: usize) -> Propagation {
        if let Some(item) = self.selected.get(index).cloned() {
            self.selected.remove_value(&item.value);
            self.apply(ComboAction::SetInput(item.label));
            self.focus();
        }
        Propagation::Stop
    }

    /// Remove icon click
    fn delete_pill(&mut self, index: usize) -> Propagation {
        if let Some(value) = self.selected.get(index).map(|item| item.value.clone()) {
            self.active = true;
            self.remove_value(&value);
        }
        Propagation::Stop
    }

    // -----------------------------------------------------------------------
    // Input routing
    // -----------------------------------------------------------------------

    /// Feed one transition to the combobox and act on a selection.
    fn apply(&mut self, action: ComboAction) {
        let visible = self.visible_options();
        if let ComboOutcome::Selected(index) = self.combo.apply(action, visible.len())
            && let Some(item) = visible.into_iter().nth(index)
        {
            self.select(item);
        }
    }

    /// Route a click to its target, then to the box itself unless the
    /// target stopped it. Clicking the box focuses the input.
    pub fn click(&mut self, target: Target) {
        let propagation = match target {
            Target::Pill(i) => self.edit_pill(i),
            Target::RemovePill(i) => self.delete_pill(i),
            Target::MenuOption(i) => {
                self.apply(ComboAction::ClickItem(i));
                Propagation::Continue
            }
            Target::Summary | Target::Input | Target::Menu | Target::Container => Propagation::Continue,
        };
        if propagation == Propagation::Continue {
            self.focus();
        }
    }

    /// Click at a screen cell. Returns false when the cell is outside the picker.
    pub fn click_at(&mut self, col: u16, row: u16) -> bool {
        match self.a11y.hit(col, row).map(|n| n.target) {
            Some(target) => {
                self.click(target);
                true
            }
            None => false,
        }
    }

    /// Pointer moved over a cell: highlight the menu row under it.
    pub fn hover_at(&mut self, col: u16, row: u16) {
        if let Some(Target::MenuOption(i)) = self.a11y.hit(col, row).map(|n| n.target) {
            self.apply(ComboAction::Hover(i));
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.focus();
        self.apply(ComboAction::Paste(text.to_string()));
    }

    /// Handle a key press aimed at the input. The shared key listeners must
    /// have seen it first; see [`dispatch_key`].
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('u') if ctrl => ComboAction::DeleteToStart,
            KeyCode::Char('a') if ctrl => ComboAction::CursorHome,
            KeyCode::Char('e') if ctrl => ComboAction::CursorEnd,
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
                return KeyResult::Ignored;
            }
            KeyCode::Char(c) => ComboAction::Type(c),
            KeyCode::Backspace => ComboAction::DeleteBack,
            KeyCode::Delete => ComboAction::DeleteForward,
            KeyCode::Left => ComboAction::CursorLeft,
            KeyCode::Right => ComboAction::CursorRight,
            KeyCode::Home => ComboAction::CursorHome,
            KeyCode::End => ComboAction::CursorEnd,
            KeyCode::Down => ComboAction::ArrowDown,
            KeyCode::Up => ComboAction::ArrowUp,
            KeyCode::Enter => ComboAction::Enter,
            KeyCode::Esc => {
                if !self.combo.is_open() && self.combo.input.is_empty() {
                    return KeyResult::Ignored;
                }
                ComboAction::Escape
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.blur();
                return KeyResult::Handled;
            }
            _ => return KeyResult::Ignored,
        };
        self.focus();
        self.apply(action);
        KeyResult::Handled
    }
}

/// Deliver a key press: shared listeners first, then the picker's input.
pub fn dispatch_key(bus: &KeyBus<Picker>, picker: &mut Picker, key: KeyEvent) -> KeyResult {
    bus.dispatch_to(picker.id(), picker, &KeyStroke::from(&key));
    picker.handle_key(key)
}
