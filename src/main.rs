//! Dungeon Crawler
//!
//! Terminal front end: reads commands from stdin and prints what the engine
//! reports. Logging goes to stderr and is controlled through `RUST_LOG`.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dungeon_crawler::core::{Flow, Game, GameConfig, Phase};

/// Turn-based dungeon crawler in the terminal
#[derive(Parser, Debug)]
#[command(name = "dungeon-crawler")]
#[command(version, about = "Find the key, reach the portal, go deeper.", long_about = None)]
struct Args {
    /// Seed for a reproducible run; ignored when it is not an integer
    #[arg(allow_hyphen_values = true)]
    seed: Option<String>,
}

/// Accepts any integer; negative values keep their bit pattern.
fn parse_seed(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>()
        .ok()
        .or_else(|| raw.parse::<i64>().ok().map(|n| n as u64))
}

fn prompt_for(phase: Phase) -> &'static str {
    match phase {
        Phase::Exploring => "Your move > ",
        Phase::ChestPrompt { .. } => "Unlock? (y/n) > ",
        Phase::Combat { .. } => "Action > ",
        Phase::GameOver => "Choice > ",
        Phase::Exited => "",
    }
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = GameConfig::from_env().context("invalid CRAWLER_* configuration")?;

    let seed = args.seed.as_deref().and_then(|raw| {
        let parsed = parse_seed(raw);
        if parsed.is_none() {
            tracing::warn!(seed = raw, "ignoring non-integer seed");
        }
        parsed
    });
    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    tracing::info!(?seed, ?config, "starting game");

    let mut game = Game::new(config, rng);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = stdin.lock();

    println!("{}", "Welcome to the dungeon!".bold());
    println!("Find the key (K) to wake the portal, then step into it to go deeper.");
    print_lines(&mut stdout, &game.take_pending())?;

    loop {
        let phase = game.phase();
        if phase == Phase::Exploring {
            println!();
            println!("{}", game.status().cyan());
            print_lines(&mut stdout, &game.map_lines())?;
        }
        print!("{}", prompt_for(phase).yellow());
        stdout.flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            // EOF behaves like quitting
            println!();
            tracing::debug!("stdin closed");
            break;
        }

        let turn = game.submit(&line);
        print_lines(&mut stdout, &turn.messages)?;
        tracing::trace!(events = ?turn.events, "turn resolved");
        if turn.flow == Flow::Exit {
            break;
        }
    }

    Ok(())
}
