//! flowsketch CLI entry point.

use std::{io, process};

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flowsketch_cli::{Args, load_config};

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    // Logs go to stderr so command output can be piped.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    debug!(?args, "parsed arguments");

    let stdout = io::stdout();
    if let Err(err) = flowsketch_cli::run(&args, &config, &mut stdout.lock()) {
        error!("{err}");
        process::exit(1);
    }

    info!("completed successfully");
}
