use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pillpick",
    about = concat!("pillpick v", env!("CARGO_PKG_VERSION"), " - pick several options, keep them as pills"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./pillpick.toml if present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Add an option: VALUE or VALUE=LABEL (repeatable)
    #[arg(short = 'o', long = "option", value_name = "SPEC", global = true)]
    pub options: Vec<String>,

    /// Preselect an item: VALUE or VALUE=LABEL (repeatable)
    #[arg(short = 'i', long = "initial", value_name = "SPEC", global = true)]
    pub initial: Vec<String>,

    /// Input placeholder while nothing is selected
    #[arg(long, global = true)]
    pub placeholder: Option<String>,

    /// Never offer to add typed text that matches no option
    #[arg(long = "no-custom", global = true)]
    pub no_custom: bool,

    /// Write debug logs to this file
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the configured options
    Options,
    /// Show the dropdown entries offered for some typed text
    Filter(FilterArgs),
    /// Show the condensed summary text for a selection
    Summary(SummaryArgs),
}

#[derive(Args)]
pub struct FilterArgs {
    /// Text typed into the input
    pub text: String,
    /// Already selected values, comma-separated (default: the initial selection)
    #[arg(long, value_delimiter = ',')]
    pub selected: Option<Vec<String>>,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Selected values in order, comma-separated (default: the initial selection)
    #[arg(long, value_delimiter = ',')]
    pub selected: Option<Vec<String>>,
}
