use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::config::PickerConfig;
use crate::model::option::SelectOption;
use crate::ops::filter::filter_options;
use crate::ops::selection::SelectedItems;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&cli)?;
    let json = cli.json;

    match cli.command {
        None => cmd_pick(&config, json),
        Some(Commands::Options) => cmd_options(&config, json),
        Some(Commands::Filter(args)) => cmd_filter(&config, args, json),
        Some(Commands::Summary(args)) => cmd_summary(&config, args, json),
    }
}

/// Load the config file and layer the command-line overrides on top.
pub fn build_config(cli: &Cli) -> Result<PickerConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: ".".into(),
        source: e,
    })?;
    let mut config = config_io::load_config(cli.config.as_deref(), &cwd)?;

    for spec in &cli.options {
        config.options.push(config_io::parse_option_spec(spec)?);
    }
    for spec in &cli.initial {
        config.initial.push(resolve_spec(&config.options, spec)?);
    }
    if let Some(placeholder) = &cli.placeholder {
        config.picker.placeholder = placeholder.clone();
    }
    if cli.no_custom {
        config.picker.allow_custom_values = false;
    }
    Ok(config)
}

/// A bare value picks up the label of the matching option, if there is one.
fn resolve_spec(options: &[SelectOption], spec: &str) -> Result<SelectOption, ConfigError> {
    if !spec.contains('=')
        && let Some(known) = options.iter().find(|opt| opt.value == spec.trim())
    {
        return Ok(known.clone());
    }
    config_io::parse_option_spec(spec)
}

/// Selection given on the command line, or the configured initial one
fn selection_for(config: &PickerConfig, specs: Option<Vec<String>>) -> Result<SelectedItems, ConfigError> {
    match specs {
        Some(specs) => {
            let items = specs
                .iter()
                .map(|spec| resolve_spec(&config.options, spec))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SelectedItems::from_initial(&items))
        }
        None => Ok(SelectedItems::from_initial(&config.initial)),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_pick(config: &PickerConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(selected) = crate::tui::run(config)? else {
        return Err("cancelled".into());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&SelectionJson { selected: &selected })?);
    } else if !selected.is_empty() {
        println!("{}", format_selection(&selected));
    }
    Ok(())
}

fn cmd_options(config: &PickerConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&OptionsJson { options: &config.options })?);
    } else if !config.options.is_empty() {
        println!("{}", format_option_lines(&config.options));
    }
    Ok(())
}

fn cmd_filter(config: &PickerConfig, args: FilterArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let selected = selection_for(config, args.selected)?;
    let entries = filter_options(
        &config.options,
        &args.text,
        &selected,
        config.picker.allow_custom_values,
    );
    tracing::debug!(input = %args.text, matches = entries.len(), "filter");
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&FilterJson {
                input: &args.text,
                entries: &entries,
            })?
        );
    } else if !entries.is_empty() {
        println!("{}", format_option_lines(&entries));
    }
    Ok(())
}

fn cmd_summary(config: &PickerConfig, args: SummaryArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let selected = selection_for(config, args.selected)?;
    let summary = selected.summary_text();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&SummaryJson {
                summary,
                count: selected.len(),
            })?
        );
    } else if let Some(text) = summary {
        println!("{}", text);
    }
    Ok(())
}
