mod cli;
mod config;
mod model;
mod resolve;
mod storage;
mod targeting;

use std::process;

use clap::Parser;

use cli::Cli;
use config::Config;
use storage::Storage;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let path = match config.database_path(cli.database.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let storage = match Storage::open(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open audit database at {}: {e}", path.display());
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&cli.command, &storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
