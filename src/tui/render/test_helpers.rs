use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use super::a11y::A11yTree;
use super::{picker_height, render_picker};
use crate::model::option::SelectOption;
use crate::tui::picker::Picker;
use crate::tui::theme::Theme;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

/// Plain text of a buffer, trailing spaces and trailing blank lines removed
pub fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render a picker box at the top of a `w`×`h` screen.
pub fn render_picker_to_string(picker: &Picker, w: u16, h: u16) -> (String, A11yTree) {
    let mut tree = A11yTree::default();
    let out = render_to_string(w, h, |frame, area| {
        let box_area = Rect::new(0, 0, area.width, picker_height(picker, area.width)).intersection(area);
        tree = render_picker(frame, picker, box_area, &Theme::default());
    });
    (out, tree)
}

/// The option set used across render tests
pub fn languages() -> Vec<SelectOption> {
    vec![
        SelectOption::new("de", "german"),
        SelectOption::new("pt", "portuguese"),
        SelectOption::new("en", "english"),
        SelectOption::new("sp", "spanish"),
        SelectOption::new("ar", "arabic"),
        SelectOption::new("ar-ym", "arabic - yemen"),
    ]
}
