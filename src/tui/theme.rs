use ratatui::style::Color;

use crate::model::UiConfig;

/// Colors used by the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub pill_bg: Color,
    pub pill_fg: Color,
    /// Remove icon on each pill
    pub remove: Color,
    pub summary_bg: Color,
    pub selection_bg: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            pill_bg: Color::Rgb(0x2A, 0x1F, 0x5C),
            pill_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            remove: Color::Rgb(0xFF, 0x44, 0x44),
            summary_bg: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            border: Color::Rgb(0x7D, 0x78, 0xBF),
            border_focused: Color::Rgb(0xFB, 0x41, 0x96),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

impl Theme {
    /// Create a theme from the `[ui]` config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "pill_bg" => theme.pill_bg = color,
                "pill_fg" => theme.pill_fg = color,
                "remove" => theme.remove = color,
                "summary_bg" => theme.summary_bg = color,
                "selection_bg" => theme.selection_bg = color,
                "border" => theme.border = color,
                "border_focused" => theme.border_focused = color,
                _ => tracing::warn!(key = %key, "unknown theme color"),
            }
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF4444"), Some(Color::Rgb(0xFF, 0x44, 0x44)));
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
        assert_eq!(parse_hex_color("#aééb"), None); // six bytes, four chars
        assert_eq!(parse_hex_color("#+12345"), None);
        assert_eq!(parse_hex_color("#0a0B0c"), Some(Color::Rgb(0x0A, 0x0B, 0x0C)));
    }

    #[test]
    fn multibyte_color_value_is_skipped() {
        let mut ui = UiConfig::default();
        ui.colors.insert("pill_bg".into(), "#aééb".into());
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.pill_bg, Theme::default().pill_bg);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("pill_bg".into(), "#000000".into());
        ui.colors.insert("remove".into(), "not a color".into());
        ui.colors.insert("nonsense".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.pill_bg, Color::Rgb(0, 0, 0));
        // Invalid and unknown entries leave defaults alone
        assert_eq!(theme.remove, Theme::default().remove);
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }
}
