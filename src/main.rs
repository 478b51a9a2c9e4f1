mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod logging;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::game::{Game, Session, SystemClock};
use crate::warning::Warning;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::process::ExitCode;
use tracing::{info, warn};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    if let Some(path) = logging::init().context("failed to set up logging")? {
        info!(path = %path.display(), "Logging started");
    }
    let config = match Config::default_path() {
        Ok(path) => Config::load(&path, true)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        Err(e) => {
            warn!(error = %e, "Using default configuration");
            Config::default()
        }
    };
    let (store, load_error) = config.open_score_store();
    if let Some(ref e) = load_error {
        warn!(error = %e, "Failed to load high score");
    }
    let session = Session::new(config.game, store, rand::rng(), SystemClock);
    let game = Game::new(session, load_error.map(Warning::from));
    let terminal = ratatui::init();
    let r = App::new(game).run(terminal);
    ratatui::restore();
    r.map_err(Into::into)
}
