use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::a11y::{A11yTree, REMOVE_NAME, Role, Target, pill_name};
use super::icon::Icon;
use crate::model::option::SelectOption;
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

/// Narrowest input field kept on the same row as the pills
pub const MIN_INPUT_WIDTH: u16 = 12;

const REMOVE_GLYPH: &str = "×";

/// Cells a pill spends around its label: leading pad, pad, icon, trailing pad
const PILL_CHROME: u16 = 4;

/// Where a run of pills and the trailing input land inside the box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    /// (row, col, width) per pill, relative to the box interior
    pub cells: Vec<(u16, u16, u16)>,
    pub input_row: u16,
    pub input_col: u16,
    pub rows: u16,
}

/// Lay pills of the given widths left to right, wrapping at `width`, then
/// place the input after the last pill or on a fresh row if it would be
/// squeezed below [`MIN_INPUT_WIDTH`].
pub fn flow(widths: &[u16], width: u16) -> Flow {
    let mut cells = Vec::with_capacity(widths.len());
    let (mut row, mut col) = (0u16, 0u16);
    for &w in widths {
        if col > 0 && col + w > width {
            row += 1;
            col = 0;
        }
        cells.push((row, col, w.min(width)));
        col += w + 1;
    }
    if col > 0 && col + MIN_INPUT_WIDTH > width {
        row += 1;
        col = 0;
    }
    Flow {
        cells,
        input_row: row,
        input_col: col,
        rows: row + 1,
    }
}

/// Label as drawn inside a pill of at most `width` cells
fn fitted_label(label: &str, width: u16) -> String {
    truncate_to_width(label, width.saturating_sub(PILL_CHROME).max(1) as usize)
}

/// Pill widths for the selected items at a given box width
pub fn pill_widths(items: &[SelectOption], width: u16) -> Vec<u16> {
    items
        .iter()
        .map(|item| display_width(&fitted_label(&item.label, width)) as u16 + PILL_CHROME)
        .collect()
}

/// Draw every selected item as a removable pill.
///
/// `inner` is the box interior and `flow` the layout from [`flow`] over
/// [`pill_widths`]. The pill body addresses `Target::Pill(i)` and its remove
/// icon `Target::RemovePill(i)`; routing the clicks is up to the caller.
pub fn render_items_list(
    frame: &mut Frame,
    items: &[SelectOption],
    inner: Rect,
    flow: &Flow,
    theme: &Theme,
    tree: &mut A11yTree,
) {
    let pill_style = Style::default().fg(theme.pill_fg).bg(theme.pill_bg);
    let icon_style = Style::default().fg(theme.remove).bg(theme.pill_bg);

    for (i, (item, &(row, col, w))) in items.iter().zip(&flow.cells).enumerate() {
        let rect = Rect::new(inner.x + col, inner.y + row, w, 1).intersection(inner);
        if rect.is_empty() {
            continue;
        }
        let label = fitted_label(&item.label, inner.width);
        let label_w = display_width(&label) as u16;

        let line = Line::from(vec![
            Span::styled(format!(" {} ", label), pill_style),
            Span::styled(" ".repeat(Icon::new(REMOVE_GLYPH).width() as usize), pill_style),
            Span::styled(" ", pill_style),
        ]);
        frame.render_widget(Paragraph::new(line), rect);

        let node = tree.push(pill_name(&item.label), Role::Pill, rect, Target::Pill(i));
        node.text = item.label.clone();

        let icon_x = rect.x + label_w + 2;
        if icon_x < rect.right() {
            let icon_area = Rect::new(icon_x, rect.y, rect.right() - icon_x, 1);
            Icon::new(REMOVE_GLYPH)
                .alt_text(REMOVE_NAME)
                .render(frame, icon_area, icon_style, tree, Target::RemovePill(i));
        }
    }
}
