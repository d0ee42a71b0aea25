pub mod a11y;
pub mod icon;
pub mod items_list;
pub mod menu;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use self::a11y::{A11yTree, INPUT_NAME, Role, SUMMARY_NAME, Target};
use self::items_list::{Flow, flow, pill_widths, render_items_list};
use self::menu::render_menu;
use crate::tui::app::App;
use crate::tui::picker::{Mode, Picker};
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

/// Accessible name of the select box itself
pub const CONTAINER_NAME: &str = "multi-select";

const KEY_HINTS: &str = " type to filter  ↑↓ move  enter pick  ⌫ remove last  tab leave  ^D done  ^C cancel";

/// Render the whole screen and return the accessible-name table of the picker.
pub fn render(frame: &mut Frame, app: &App) -> A11yTree {
    let area = frame.area();
    let bg = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg), area);

    let title = Line::from(vec![
        Span::styled(" pillpick ", Style::default().fg(app.theme.text_bright).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{} selected", app.picker.selected().len()),
            Style::default().fg(app.theme.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), Rect::new(area.x, area.y, area.width, area.height.min(1)));

    if app.show_key_hints && area.height > 1 {
        let hints = Line::from(Span::styled(KEY_HINTS, Style::default().fg(app.theme.dim)));
        frame.render_widget(Paragraph::new(hints), Rect::new(area.x, area.bottom() - 1, area.width, 1));
    }

    let height = picker_height(&app.picker, area.width);
    let box_area = Rect::new(area.x, area.y + 1, area.width, height).intersection(area);
    render_picker(frame, &app.picker, box_area, &app.theme)
}

/// Rows the picker box needs at `width`, borders included
pub fn picker_height(picker: &Picker, width: u16) -> u16 {
    content_flow(picker, width.saturating_sub(2)).rows + 2
}

/// Width of the condensed pill for a summary text
fn summary_width(text: &str, width: u16) -> u16 {
    (display_width(text) as u16 + 2).min(width)
}

fn content_flow(picker: &Picker, inner_width: u16) -> Flow {
    let widths = match picker.mode() {
        Mode::Editing => pill_widths(picker.selected(), inner_width),
        Mode::Summary => picker
            .summary_text()
            .map(|text| vec![summary_width(&text, inner_width)])
            .unwrap_or_default(),
        Mode::Idle => Vec::new(),
    };
    flow(&widths, inner_width)
}

/// Render the select box into `area` and, when open, the dropdown under it.
pub fn render_picker(frame: &mut Frame, picker: &Picker, area: Rect, theme: &Theme) -> A11yTree {
    let mut tree = A11yTree::default();
    if area.is_empty() {
        return tree;
    }

    let border = if picker.is_focused() { theme.border_focused } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(theme.background))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    tree.push(CONTAINER_NAME, Role::Container, area, Target::Container);

    let layout = content_flow(picker, inner.width);
    match picker.mode() {
        Mode::Editing => render_items_list(frame, picker.selected(), inner, &layout, theme, &mut tree),
        Mode::Summary => render_summary(frame, picker, inner, &layout, theme, &mut tree),
        Mode::Idle => {}
    }
    render_input(frame, picker, inner, &layout, theme, &mut tree);

    if picker.is_open() {
        render_menu(
            frame,
            &picker.visible_options(),
            picker.combobox().highlighted,
            area,
            theme,
            &mut tree,
        );
    }
    tree
}

fn render_summary(frame: &mut Frame, picker: &Picker, inner: Rect, layout: &Flow, theme: &Theme, tree: &mut A11yTree) {
    let (Some(text), Some(&(row, col, w))) = (picker.summary_text(), layout.cells.first()) else {
        return;
    };
    let rect = Rect::new(inner.x + col, inner.y + row, w, 1).intersection(inner);
    if rect.is_empty() {
        return;
    }
    let style = Style::default()
        .fg(theme.text_bright)
        .bg(theme.summary_bg)
        .add_modifier(Modifier::BOLD);
    let shown = truncate_to_width(&text, rect.width.saturating_sub(2) as usize);
    frame.render_widget(Paragraph::new(Span::styled(format!(" {} ", shown), style)), rect);
    tree.push(SUMMARY_NAME, Role::Button, rect, Target::Summary).text = text;
}

fn render_input(frame: &mut Frame, picker: &Picker, inner: Rect, layout: &Flow, theme: &Theme, tree: &mut A11yTree) {
    let rect = Rect::new(
        inner.x + layout.input_col,
        inner.y + layout.input_row,
        inner.width.saturating_sub(layout.input_col),
        1,
    )
    .intersection(inner);
    if rect.is_empty() {
        return;
    }

    let input = &picker.combobox().input;
    let placeholder = picker.current_placeholder();
    let node = tree.push(INPUT_NAME, Role::Input, rect, Target::Input);
    node.text = input.text().to_string();
    node.placeholder = Some(placeholder.to_string());

    if input.is_empty() {
        let style = Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC);
        frame.render_widget(Paragraph::new(Span::styled(placeholder, style)), rect);
    } else {
        // Keep the cursor cell inside the field
        let scroll = (input.cursor_col() as u16).saturating_sub(rect.width.saturating_sub(1));
        let style = Style::default().fg(theme.text);
        frame.render_widget(
            Paragraph::new(Span::styled(input.text(), style)).scroll((0, scroll)),
            rect,
        );
    }

    if picker.is_focused() {
        let col = (input.cursor_col() as u16).min(rect.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(rect.x + col, rect.y));
    }
}
