use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use super::a11y::{A11yTree, Role, Target};
use crate::util::unicode::display_width;

/// A one-glyph icon with an optional text alternative and title.
///
/// The glyph is drawn but never announced. The alt text is never drawn but
/// becomes the accessible name of the icon's cells. The title is the hover
/// text and falls back to the alt text.
#[derive(Debug, Clone, Copy)]
pub struct Icon<'a> {
    glyph: &'a str,
    alt_text: Option<&'a str>,
    title_text: Option<&'a str>,
}

impl<'a> Icon<'a> {
    pub fn new(glyph: &'a str) -> Self {
        Icon {
            glyph,
            alt_text: None,
            title_text: None,
        }
    }

    pub fn alt_text(mut self, text: &'a str) -> Self {
        self.alt_text = Some(text);
        self
    }

    pub fn title_text(mut self, text: &'a str) -> Self {
        self.title_text = Some(text);
        self
    }

    /// Title shown on hover. An empty title counts as none.
    pub fn title(&self) -> Option<&'a str> {
        self.title_text.filter(|t| !t.is_empty()).or(self.alt_text)
    }

    pub fn width(&self) -> u16 {
        display_width(self.glyph) as u16
    }

    /// Draw at the top-left of `area`, clipped to it.
    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style, tree: &mut A11yTree, target: Target) {
        let area = Rect::new(area.x, area.y, self.width().min(area.width), area.height.min(1));
        if area.is_empty() {
            return;
        }
        frame.render_widget(Span::styled(self.glyph, style), area);
        if self.alt_text.is_none() && self.title().is_none() {
            return;
        }
        let alt = self.alt_text.unwrap_or_default();
        let node = tree.push(alt, Role::Button, area, target);
        node.text = alt.to_string();
        node.title = self.title().map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::render_to_string;

    #[test]
    fn glyph_drawn_alt_text_announced() {
        let mut tree = A11yTree::default();
        let out = render_to_string(10, 1, |frame, area| {
            Icon::new("×")
                .alt_text("remove option")
                .render(frame, area, Style::default(), &mut tree, Target::RemovePill(3));
        });
        assert_eq!(out, "×");
        let node = tree.by_name("remove option").unwrap();
        assert_eq!(node.target, Target::RemovePill(3));
        assert_eq!(node.area, Rect::new(0, 0, 1, 1));
    }

    #[test]
    fn title_falls_back_to_alt_text() {
        let mut tree = A11yTree::default();
        render_to_string(10, 1, |frame, area| {
            Icon::new("×")
                .alt_text("remove option")
                .render(frame, area, Style::default(), &mut tree, Target::RemovePill(0));
        });
        assert_eq!(tree.by_name("remove option").unwrap().title.as_deref(), Some("remove option"));

        let icon = Icon::new("×").alt_text("remove option").title_text("");
        assert_eq!(icon.title(), Some("remove option"));
    }

    #[test]
    fn explicit_title_wins_over_alt_text() {
        let mut tree = A11yTree::default();
        let out = render_to_string(10, 1, |frame, area| {
            Icon::new("×")
                .alt_text("remove option")
                .title_text("remove english")
                .render(frame, area, Style::default(), &mut tree, Target::RemovePill(0));
        });
        assert_eq!(out, "×");
        let node = tree.by_name("remove option").unwrap();
        assert_eq!(node.title.as_deref(), Some("remove english"));
        assert_eq!(node.text, "remove option");
    }

    #[test]
    fn title_without_alt_text_is_unnamed() {
        let mut tree = A11yTree::default();
        render_to_string(10, 1, |frame, area| {
            Icon::new("▾")
                .title_text("open")
                .render(frame, area, Style::default(), &mut tree, Target::Container);
        });
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.nodes()[0].name, "");
        assert_eq!(tree.nodes()[0].title.as_deref(), Some("open"));
    }

    #[test]
    fn no_alt_text_means_no_node() {
        let mut tree = A11yTree::default();
        render_to_string(10, 1, |frame, area| {
            Icon::new("▾").render(frame, area, Style::default(), &mut tree, Target::Container);
        });
        assert!(tree.nodes().is_empty());
    }

    #[test]
    fn zero_width_area_draws_nothing() {
        let mut tree = A11yTree::default();
        render_to_string(10, 1, |frame, _| {
            Icon::new("×")
                .alt_text("remove option")
                .render(frame, Rect::new(0, 0, 0, 1), Style::default(), &mut tree, Target::Container);
        });
        assert!(tree.nodes().is_empty());
    }
}
