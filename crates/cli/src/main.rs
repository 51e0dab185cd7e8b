use std::process::ExitCode;

use boardquote_core::config::{AppConfig, LoadOptions};

fn init_logging() {
    use boardquote_core::config::LogFormat::*;
    use tracing::Level;

    // Commands re-report config problems with structured output; logging
    // setup falls back to defaults rather than failing here.
    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);
    match config.logging.format {
        Compact => subscriber.compact().init(),
        Pretty => subscriber.pretty().init(),
        Json => subscriber.json().init(),
    }
}

fn main() -> ExitCode {
    init_logging();
    boardquote_cli::run()
}
