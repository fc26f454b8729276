use std::io;
use std::process;

use clap::{CommandFactory, Parser};

use pypublish::cli::{self, Args};
use pypublish::{ui, PypublishError};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let err = match cli::run(&args) {
        Ok(result) => {
            log::debug!("completed steps: {:?}", result.completed);
            return;
        }
        Err(err) => err,
    };

    // Step failures are reported by the orchestrator; only usage and setup
    // errors still need printing here.
    let code = match err.downcast_ref::<PypublishError>() {
        Some(e) if e.is_usage() => {
            ui::display_error(&e.to_string());
            eprintln!();
            let _ = Args::command().write_help(&mut io::stderr());
            e.exit_code()
        }
        Some(e) => e.exit_code(),
        None => {
            ui::display_error(&format!("{:#}", err));
            1
        }
    };

    process::exit(code);
}
