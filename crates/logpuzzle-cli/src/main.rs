use clap::CommandFactory;
use logpuzzle_core::logging;

mod cli;

use crate::cli::{usage_exit, Cli};

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Some(code) = usage_exit(std::env::args_os().len()) {
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(code);
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("logpuzzle error: {:#}", err);
        std::process::exit(1);
    }
}
