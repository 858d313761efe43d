//! Tower Blaster in the terminal, against the computer.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use tower_core::{GameConfig, GameState, Referee};
use tracing::{info, trace, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod terminal;

use terminal::Terminal;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the prompts
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Fixed seed from env for reproducible games
    let mut rng = match std::env::var("TOWER_SEED") {
        Ok(seed) => {
            let seed: u64 = seed.parse().context("TOWER_SEED must be an unsigned integer")?;
            info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        Err(_) => StdRng::from_entropy(),
    };

    let mut game = GameState::with_rng(GameConfig::default(), &mut rng)?;
    let referee = Referee::for_game(&game);

    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
    terminal.banner()?;

    let winner = loop {
        if let Some(winner) = referee.play_turn(&mut game, &mut terminal, &mut rng)? {
            break winner;
        }
        if tracing::enabled!(Level::TRACE) {
            let state = game.to_json()?;
            trace!(%state, "turn finished");
        }
    };

    info!(%winner, turns = game.turn_number, "game over");
    Ok(())
}
