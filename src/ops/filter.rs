use crate::model::option::SelectOption;
use crate::ops::selection::SelectedItems;

/// Compute the dropdown entries for the current input text.
///
/// Empty input shows every option. Otherwise options whose label contains the
/// text (ignoring case) are kept. When nothing matches and custom values are
/// allowed, a single `Add "<text>"` entry is offered instead. Options already
/// selected are hidden from a non-empty match set.
pub fn filter_options(
    options: &[SelectOption],
    input: &str,
    selected: &SelectedItems,
    allow_custom_values: bool,
) -> Vec<SelectOption> {
    if input.is_empty() {
        return options.to_vec();
    }

    let needle = input.to_lowercase();
    let matches: Vec<SelectOption> = options
        .iter()
        .filter(|opt| opt.label.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if matches.is_empty() && allow_custom_values {
        return vec![SelectOption::custom(input)];
    }

    if selected.is_empty() {
        matches
    } else {
        matches
            .into_iter()
            .filter(|opt| !selected.contains_value(&opt.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

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

    fn labels(opts: &[SelectOption]) -> Vec<&str> {
        opts.iter().map(|o| o.display_text()).collect()
    }

    #[test]
    fn empty_input_returns_everything() {
        let selected = SelectedItems::from_initial(&[SelectOption::new("en", "english")]);
        let result = filter_options(&languages(), "", &selected, true);
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn substring_match_ignores_case() {
        let result = filter_options(&languages(), "ARAB", &SelectedItems::default(), true);
        assert_eq!(labels(&result), vec!["arabic", "arabic - yemen"]);
    }

    #[test]
    fn matches_anywhere_in_label() {
        let result = filter_options(&languages(), "an", &SelectedItems::default(), true);
        assert_eq!(labels(&result), vec!["german", "spanish"]);
    }

    #[test]
    fn no_match_offers_custom_value() {
        let result = filter_options(&languages(), "Klingon", &SelectedItems::default(), true);
        assert_eq!(result, vec![SelectOption::custom("Klingon")]);
        assert_eq!(labels(&result), vec!["Add \"Klingon\""]);
    }

    #[test]
    fn no_match_without_custom_is_empty() {
        let result = filter_options(&languages(), "klingon", &SelectedItems::default(), false);
        assert!(result.is_empty());
    }

    #[test]
    fn selected_values_hidden() {
        let selected = SelectedItems::from_initial(&[SelectOption::new("en", "english")]);
        let result = filter_options(&languages(), "english", &selected, true);
        assert!(result.is_empty());
    }

    #[test]
    fn hiding_selected_never_synthesizes_custom() {
        // The only match is already picked: the menu is empty, not an "Add" prompt.
        let selected = SelectedItems::from_initial(&[SelectOption::new("ar", "arabic")]);
        let result = filter_options(&languages(), "arabic", &selected, true);
        assert_eq!(labels(&result), vec!["arabic - yemen"]);
    }
}
