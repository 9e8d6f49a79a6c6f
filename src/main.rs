//! SSL Sim entry point
//!
//! Headless runner: `ssl-sim [settings.json] [discrete|continuous]`.
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-command output.

use std::path::PathBuf;
use std::process::ExitCode;

use ssl_sim::runner::MatchRunner;
use ssl_sim::{CommandMode, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("SSL Sim starting...");

    let mut args = std::env::args().skip(1);
    let path = args.next().map(PathBuf::from);

    let mut settings = match Settings::load(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(mode) = args.next() {
        match CommandMode::from_str(&mode) {
            Some(mode) => settings.mode = mode,
            None => {
                log::error!("Unknown command mode '{mode}', expected discrete or continuous");
                return ExitCode::FAILURE;
            }
        }
    }

    for episode in 0..settings.episodes {
        let mut runner = MatchRunner::new(&settings, episode);
        let scores = runner.run(settings.ticks);
        log::info!(
            "Episode {} finished after {} ticks: Blue {} - Yellow {}",
            episode,
            runner.ticks(),
            scores.blue,
            scores.yellow
        );
    }

    ExitCode::SUCCESS
}
