//! saavy-ear - adaptive ear training in the terminal
//!
//! Run with: cargo run --bin saavy-ear -- --config "exercise=melodic&length=4"

mod args;
mod drill;
mod playback;
mod report;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::{Commands, EarArgs};
use playback::Player;
use saavy_ear::{
    Configuration, DirectoryStore, KeyValueRepository, PracticeEngine, SystemClock,
};

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = EarArgs::parse();

    let config = args
        .config
        .as_deref()
        .map(Configuration::from_query)
        .unwrap_or_default();

    let store = DirectoryStore::open(&args.data_dir)
        .wrap_err_with(|| format!("failed to open data dir {}", args.data_dir.display()))?;
    info!(dir = %args.data_dir.display(), "using data directory");

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine =
        PracticeEngine::start(config, KeyValueRepository::new(store), rng, SystemClock)
            .wrap_err("cannot start a session with this configuration")?;

    match args.command.unwrap_or(Commands::Practice) {
        Commands::Practice => {
            let player = if args.mute {
                None
            } else {
                match Player::new() {
                    Ok(player) => Some(player),
                    Err(e) => {
                        warn!(error = %e, "audio unavailable, printing sequences instead");
                        None
                    }
                }
            };
            drill::run(&mut engine, player.as_ref())?;
        }
        Commands::History => report::print_history(&engine),
        Commands::Config => report::print_config(&engine),
    }

    Ok(())
}
