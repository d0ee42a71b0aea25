use clap::Parser;
use pillpick::cli::commands::Cli;
use pillpick::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // The interactive picker owns the terminal: no console logging there
    let console = cli.command.is_some();
    pillpick::logging::init(console, cli.log_file.as_deref());

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
