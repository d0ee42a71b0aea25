use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::PickerConfig;
use crate::model::option::SelectOption;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "pillpick.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid option spec '{0}': expected VALUE or VALUE=LABEL")]
    InvalidOptionSpec(String),
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<PickerConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: PickerConfig = toml::from_str(&text)?;
    tracing::debug!(
        path = %path.display(),
        options = config.options.len(),
        initial = config.initial.len(),
        "loaded config"
    );
    Ok(config)
}

/// Resolve the config for a run.
///
/// An explicit path must exist. Without one, `pillpick.toml` in `dir` is used
/// if present, otherwise the built-in defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<PickerConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        read_config(&default_path)
    } else {
        tracing::debug!(dir = %dir.display(), "no config file, using defaults");
        Ok(PickerConfig::default())
    }
}

/// Parse a `VALUE` or `VALUE=LABEL` command-line spec into an option.
pub fn parse_option_spec(spec: &str) -> Result<SelectOption, ConfigError> {
    let (value, label) = match spec.split_once('=') {
        Some((value, label)) => (value.trim(), label.trim()),
        None => (spec.trim(), spec.trim()),
    };
    if value.is_empty() {
        return Err(ConfigError::InvalidOptionSpec(spec.to_string()));
    }
    let label = if label.is_empty() { value } else { label };
    Ok(SelectOption::new(value, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"[picker]
placeholder = "languages"

[[options]]
value = "de"
label = "german"
"#;

    #[test]
    fn read_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("picker.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.picker.placeholder, "languages");
        assert_eq!(config.options, vec![SelectOption::new("de", "german")]);
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml")), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn default_file_picked_up_from_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DEFAULT_CONFIG_FILE), SAMPLE).unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.options.len(), 1);
    }

    #[test]
    fn no_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.picker.placeholder, "select an option");
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[picker\nplaceholder = ").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn option_specs() {
        assert_eq!(
            parse_option_spec("en=english").unwrap(),
            SelectOption::new("en", "english")
        );
        assert_eq!(parse_option_spec("en").unwrap(), SelectOption::new("en", "en"));
        assert_eq!(parse_option_spec("en=").unwrap(), SelectOption::new("en", "en"));
        assert!(matches!(
            parse_option_spec("=english"),
            Err(ConfigError::InvalidOptionSpec(_))
        ));
    }
}
