//! Entry point for the `bale` binary.

mod commands;
mod config;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(commands::run(&tokens));
}
