//! End-to-end picker scenarios through the public API: key presses and
//! clicks in, rendered text, accessible names and change events out.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pillpick::model::SelectOption;
use pillpick::tui::keys::KeyBus;
use pillpick::tui::picker::{Picker, dispatch_key};
use pillpick::tui::render::a11y::Target;
use pillpick::tui::render::{picker_height, render_picker};
use pillpick::tui::theme::Theme;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

type Changes = Rc<RefCell<Vec<Vec<SelectOption>>>>;

struct Harness {
    bus: KeyBus<Picker>,
    picker: Picker,
    changes: Changes,
    screen: String,
}

impl Harness {
    fn new(initial: &[SelectOption]) -> Self {
        let changes: Changes = Rc::default();
        let sink = Rc::clone(&changes);
        let bus = KeyBus::new();
        let mut picker = Picker::new(languages())
            .with_initial(initial)
            .placeholder("Placeholder")
            .on_change(move |items| sink.borrow_mut().push(items.to_vec()));
        picker.mount(&bus);
        let mut harness = Harness {
            bus,
            picker,
            changes,
            screen: String::new(),
        };
        harness.draw();
        harness
    }

    fn draw(&mut self) {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let picker = &self.picker;
        let mut tree = None;
        terminal
            .draw(|frame| {
                let area = Rect::new(0, 0, 60, picker_height(picker, 60));
                tree = Some(render_picker(frame, picker, area, &Theme::default()));
            })
            .unwrap();
        if let Some(tree) = tree {
            self.picker.set_a11y(tree);
        }
        let buf = terminal.backend().buffer();
        self.screen = buf
            .content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n");
    }

    fn press(&mut self, code: KeyCode) {
        dispatch_key(&self.bus, &mut self.picker, KeyEvent::new(code, KeyModifiers::NONE));
        self.draw();
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            dispatch_key(&self.bus, &mut self.picker, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        self.draw();
    }

    fn click_name(&mut self, name: &str) {
        let area = self
            .picker
            .a11y()
            .by_name(name)
            .unwrap_or_else(|| panic!("no element named {name:?}"))
            .area;
        assert!(self.picker.click_at(area.x, area.y));
        self.draw();
    }

    fn values(&self) -> Vec<String> {
        self.picker.selected().iter().map(|i| i.value.clone()).collect()
    }
}

fn languages() -> Vec<SelectOption> {
    vec![
        SelectOption::new("de", "german"),
        SelectOption::new("pt", "portuguese"),
        SelectOption::new("en", "english"),
        SelectOption::new("sp", "spanish"),
        SelectOption::new("ar", "arabic"),
        SelectOption::new("ar-ym", "arabic - yemen"),
    ]
}

fn english() -> SelectOption {
    SelectOption::new("en", "english")
}

fn portuguese() -> SelectOption {
    SelectOption::new("pt", "portuguese")
}

#[test]
fn mount_shows_placeholder_without_change_events() {
    let h = Harness::new(&[]);
    assert!(h.changes.borrow().is_empty());
    assert!(h.screen.contains("Placeholder"));
    assert!(h.picker.a11y().by_placeholder("Placeholder").is_some());
}

#[test]
fn typing_shows_matching_options() {
    let mut h = Harness::new(&[]);
    h.click_name("multi-select-input");
    h.type_text("arabic");
    let a11y = h.picker.a11y();
    assert!(a11y.by_name("multi-select-menu").is_some());
    assert!(a11y.by_name("option-arabic").is_some());
    assert!(a11y.by_name("option-arabic - yemen").is_some());
    assert_eq!(a11y.all_by_prefix("option-").count(), 2);
}

#[test]
fn selected_item_is_not_offered_again() {
    let mut h = Harness::new(&[english()]);
    h.click_name("selected-summary");
    h.type_text("english");
    assert!(h.picker.a11y().by_name("multi-select-menu").is_some());
    assert!(h.picker.a11y().by_name("option-english").is_none());
}

#[test]
fn enter_emits_exactly_one_change() {
    let mut h = Harness::new(&[]);
    h.click_name("multi-select-input");
    h.type_text("arabic");
    h.press(KeyCode::Enter);
    let changes = h.changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0], vec![SelectOption::new("ar", "arabic")]);
}

#[test]
fn clicking_an_option_emits_one_change_without_duplicates() {
    let mut h = Harness::new(&[]);
    h.click_name("multi-select-input");
    h.type_text("port");
    h.click_name("option-portuguese");
    h.type_text("portuguese");
    // Already picked, so there is nothing to click this time
    assert!(h.picker.a11y().by_name("option-portuguese").is_none());
    assert_eq!(h.changes.borrow().len(), 1);
    assert_eq!(h.values(), vec!["pt"]);
}

#[test]
fn single_initial_summary_keeps_trailing_space() {
    let h = Harness::new(&[english()]);
    assert_eq!(h.picker.a11y().by_name("selected-summary").unwrap().text, "english ");
}

#[test]
fn two_initial_items_summarize_from_first() {
    let h = Harness::new(&[english(), portuguese()]);
    assert_eq!(h.picker.a11y().by_name("selected-summary").unwrap().text, "english +1");
}

#[test]
fn removing_absent_item_reports_unchanged_list() {
    let mut h = Harness::new(&[english()]);
    h.picker.remove_value("klingon");
    assert_eq!(*h.changes.borrow(), vec![vec![english()]]);
}

#[test]
fn backspace_only_removes_pills_from_empty_input() {
    let mut h = Harness::new(&[english(), portuguese()]);
    h.click_name("selected-summary");
    h.type_text("ge");
    h.press(KeyCode::Backspace);
    h.press(KeyCode::Backspace);
    assert_eq!(h.values(), vec!["en", "pt"]);
    assert!(h.changes.borrow().is_empty());

    h.press(KeyCode::Backspace);
    assert_eq!(h.values(), vec!["en"]);
    assert_eq!(*h.changes.borrow(), vec![vec![english()]]);
}

#[test]
fn pill_click_edits_and_remove_icon_deletes() {
    let mut h = Harness::new(&[english(), portuguese()]);
    h.click_name("selected-summary");
    assert!(h.picker.a11y().by_name("selected-item-english").is_some());

    h.click_name("selected-item-english");
    assert_eq!(h.values(), vec!["pt"]);
    assert_eq!(h.picker.input_text(), "english");
    assert!(h.changes.borrow().is_empty());

    h.click_name("remove option");
    assert!(h.values().is_empty());
    assert_eq!(h.changes.borrow().len(), 1);
    // The edited label is still in the input
    assert!(h.screen.contains("english"));
    assert_eq!(h.picker.current_placeholder(), "Placeholder");
}

#[test]
fn custom_value_round_trip() {
    let mut h = Harness::new(&[]);
    h.click_name("multi-select-input");
    h.type_text("klingon");
    assert!(h.screen.contains("Add \"klingon\""));
    h.press(KeyCode::Enter);
    assert_eq!(h.picker.selected(), &[SelectOption::new("klingon", "klingon")]);
    assert!(h.picker.a11y().by_name("selected-item-klingon").is_some());
}

#[test]
fn blur_closes_menu_but_keeps_pills() {
    let mut h = Harness::new(&[english()]);
    h.click_name("selected-summary");
    h.type_text("ar");
    assert!(h.picker.is_open());
    h.picker.blur();
    h.draw();
    assert!(h.picker.a11y().by_name("multi-select-menu").is_none());
    assert!(h.picker.a11y().by_name("selected-item-english").is_some());
    assert_eq!(h.picker.input_text(), "");
}

#[test]
fn remove_target_click_does_not_also_edit() {
    let mut h = Harness::new(&[english()]);
    h.picker.click(Target::Summary);
    h.picker.click(Target::RemovePill(0));
    assert_eq!(h.picker.input_text(), "");
    assert!(h.values().is_empty());
}
