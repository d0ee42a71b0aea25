use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::option::SelectOption;

/// Placeholder shown once at least one item is selected
pub const MORE_PLACEHOLDER: &str = "Add More";

/// Configuration from pillpick.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub picker: PickerSection,
    /// Candidate options shown in the dropdown
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// Items selected when the picker mounts
    #[serde(default)]
    pub initial: Vec<SelectOption>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerSection {
    /// Input placeholder while nothing is selected
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Offer an `Add "<text>"` entry when typed text matches no option
    #[serde(default = "default_true")]
    pub allow_custom_values: bool,
}

impl Default for PickerSection {
    fn default() -> Self {
        PickerSection {
            placeholder: default_placeholder(),
            allow_custom_values: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_placeholder() -> String {
    "select an option".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Color overrides by theme slot name, as "#RRGGBB"
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
