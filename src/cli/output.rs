use serde::Serialize;

use crate::model::option::SelectOption;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct OptionsJson<'a> {
    pub options: &'a [SelectOption],
}

#[derive(Serialize)]
pub struct FilterJson<'a> {
    pub input: &'a str,
    pub entries: &'a [SelectOption],
}

#[derive(Serialize)]
pub struct SummaryJson {
    pub summary: Option<String>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct SelectionJson<'a> {
    pub selected: &'a [SelectOption],
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `value<TAB>text` per line, where text is what the dropdown shows
pub fn format_option_lines(options: &[SelectOption]) -> String {
    options
        .iter()
        .map(|opt| format!("{}\t{}", opt.value, opt.display_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One selected value per line
pub fn format_selection(items: &[SelectOption]) -> String {
    items
        .iter()
        .map(|item| item.value.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn option_lines_show_add_prompt_for_custom() {
        let out = format_option_lines(&[SelectOption::new("de", "german"), SelectOption::custom("xx")]);
        assert_eq!(out, "de\tgerman\nxx\tAdd \"xx\"");
    }

    #[test]
    fn filter_json_shape() {
        let entries = [SelectOption::new("ar", "arabic")];
        let json = serde_json::to_string_pretty(&FilterJson {
            input: "arab",
            entries: &entries,
        })
        .unwrap();
        assert_snapshot!(json, @r#"
        {
          "input": "arab",
          "entries": [
            {
              "value": "ar",
              "label": "arabic"
            }
          ]
        }
        "#);
    }

    #[test]
    fn selection_is_values_per_line() {
        let items = [SelectOption::new("en", "english"), SelectOption::new("pt", "portuguese")];
        assert_eq!(format_selection(&items), "en\npt");
        assert_eq!(format_selection(&[]), "");
    }
}
