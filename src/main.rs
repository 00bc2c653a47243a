use anyhow::Result;

use fairway_handicap::cli::{Cli, Command};
use fairway_handicap::config::AppConfig;
use fairway_handicap::{
    handle_correct, handle_index, handle_load, handle_results, handle_serve, handle_trend,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    match &cli.command {
        Command::Serve { port } => handle_serve(*port, config),
        Command::Load { path } => handle_load(path, config),
        Command::Index { player, as_of } => handle_index(*player, *as_of, config),
        Command::Trend { player } => handle_trend(*player, config),
        Command::Results { event, mode } => handle_results(*event, *mode, config),
        Command::Correct {
            score,
            out_score,
            in_score,
            total_score,
        } => handle_correct(*score, *out_score, *in_score, *total_score, config),
    }
}
