use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::a11y::{A11yTree, MENU_NAME, Role, Target, option_name};
use crate::model::option::SelectOption;
use crate::tui::theme::Theme;
use crate::util::unicode::truncate_to_width;

/// Maximum number of visible entries in the dropdown
pub const MAX_VISIBLE: usize = 8;

/// First row shown so that `highlighted` stays in view
fn scroll_start(highlighted: usize) -> usize {
    if highlighted >= MAX_VISIBLE {
        highlighted - MAX_VISIBLE + 1
    } else {
        0
    }
}

/// Render the dropdown floating under `anchor` (the select box), or above it
/// when the screen has no room below.
pub fn render_menu(
    frame: &mut Frame,
    entries: &[SelectOption],
    highlighted: usize,
    anchor: Rect,
    theme: &Theme,
    tree: &mut A11yTree,
) {
    let count = entries.len().clamp(1, MAX_VISIBLE);
    let popup_h = count as u16 + 2;
    let term_area = frame.area();
    let y = if anchor.bottom() + popup_h <= term_area.bottom() {
        anchor.bottom()
    } else {
        anchor.y.saturating_sub(popup_h)
    };
    let popup_area = Rect::new(anchor.x, y, anchor.width, popup_h).intersection(term_area);
    if popup_area.is_empty() {
        return;
    }

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    tree.push(MENU_NAME, Role::Listbox, popup_area, Target::Menu);

    if entries.is_empty() {
        let line = Line::from(Span::styled(
            "   no options",
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    let start = scroll_start(highlighted);
    let text_w = (inner.width as usize).saturating_sub(3);
    for (i, entry) in entries.iter().skip(start).take(MAX_VISIBLE).enumerate() {
        let actual_idx = start + i;
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1).intersection(inner);
        if row.is_empty() {
            break;
        }
        let is_highlighted = actual_idx == highlighted;
        let style = if is_highlighted {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else if entry.is_custom() {
            Style::default().fg(theme.highlight).bg(theme.background)
        } else {
            Style::default().fg(theme.text).bg(theme.background)
        };
        let prefix = if is_highlighted { " \u{25B8} " } else { "   " };
        let text = truncate_to_width(entry.display_text(), text_w);
        let label = format!("{:<width$}", text, width = text_w);
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::styled(prefix, style), Span::styled(label, style)])),
            row,
        );

        let node = tree.push(option_name(&entry.label), Role::Option, row, Target::MenuOption(actual_idx));
        node.text = entry.display_text().to_string();
    }
}
