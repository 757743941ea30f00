use std::path::PathBuf;
use std::process;

use caplog::{cli, AppError, Config};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("caplog: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| AppError::Config("HOME is not set".to_string()))?;
    let config = Config::load(&home);
    cli::run(&config, std::env::args().skip(1).collect())
}
