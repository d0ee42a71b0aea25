use serde::{Deserialize, Serialize};

/// One entry of the option list, or one selected pill.
///
/// `value` is the identity key; `label` is what the user sees. Missing fields
/// deserialize to empty strings so a sloppy config renders blank text instead
/// of failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
    /// Set only on the synthesized "add new" entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_option_label: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
            custom_option_label: None,
        }
    }

    /// The "add new" pseudo-option offered when nothing matches typed text.
    pub fn custom(text: &str) -> Self {
        SelectOption {
            value: text.to_string(),
            label: text.to_string(),
            custom_option_label: Some(format!("Add \"{}\"", text)),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.custom_option_label.is_some()
    }

    /// Text shown in the dropdown row
    pub fn display_text(&self) -> &str {
        self.custom_option_label.as_deref().unwrap_or(&self.label)
    }

    /// Same option with the "add new" marker stripped, as it is stored once picked.
    pub fn committed(mut self) -> Self {
        self.custom_option_label = None;
        self
    }

    /// True when both value and label are identical
    pub fn same_pair(&self, other: &SelectOption) -> bool {
        self.value == other.value && self.label == other.label
    }
}
