//! Command-line entry point: play a game in the terminal or batch-simulate computer games.

use std::{
    fs, io,
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use risk_bots::{ComputerPlayer, HumanPlayer, TerminalPrompt};
use risk_engine::{loader, render::TextRenderer, GameEngine, GameResult};
use risk_sim::{rules, simulate};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Territorial conquest rules engine
#[derive(Parser, Debug)]
#[command(name = "risk_sim")]
#[command(about = "Play or simulate territorial conquest games", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game, answering the human seats from the terminal
    Play {
        /// Game definition file
        map: PathBuf,

        /// Seed for dice and card draws
        #[arg(long)]
        seed: Option<u64>,

        /// TOML file with rule overrides
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Print the map after every change
        #[arg(long)]
        text_map: bool,
    },

    /// Play many games with computers in every seat and report the winners
    Simulate {
        /// Game definition file
        map: PathBuf,

        /// Number of games to play
        #[arg(short, long, default_value_t = 100)]
        games: u64,

        /// Seed of the first game; game i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// TOML file with rule overrides
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Turn limit per game, overriding the rules file
        #[arg(long)]
        max_turns: Option<u32>,

        /// Also write the summary as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Play {
            map,
            seed,
            rules,
            text_map,
        } => play(map, seed, rules, text_map),
        Command::Simulate {
            map,
            games,
            seed,
            rules,
            max_turns,
            json,
        } => run_simulation(map, games, seed, rules, max_turns, json),
    }
}

fn play(
    map: PathBuf,
    seed: Option<u64>,
    rules_path: Option<PathBuf>,
    text_map: bool,
) -> Result<()> {
    let rules = rules::load(rules_path.as_deref())?;
    let state = loader::from_path(&map, rules)
        .with_context(|| format!("failed to load game from {}", map.display()))?;

    let seed = seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    info!(seed, title = state.title(), "starting game");

    let mut engine = GameEngine::new(
        state,
        Box::new(HumanPlayer::new(TerminalPrompt::stdio())),
        Box::new(ComputerPlayer::new()),
        Xoshiro256StarStar::seed_from_u64(seed),
    );
    if text_map {
        engine = engine.with_renderer(Box::new(TextRenderer::new(io::stdout())));
    }

    // A closed terminal aborts the game from inside the prompt.
    let result = panic::catch_unwind(AssertUnwindSafe(|| engine.run()))
        .map_err(|_| anyhow!("game aborted before it finished"))?;

    match result {
        GameResult::Success(winner) => {
            println!("{} wins!", engine.state().player(winner).name);
        }
        GameResult::Cancelled => {
            println!("Game cancelled after {} turns.", engine.turns());
        }
    }

    Ok(())
}

fn run_simulation(
    map: PathBuf,
    games: u64,
    seed: u64,
    rules_path: Option<PathBuf>,
    max_turns: Option<u32>,
    json: Option<PathBuf>,
) -> Result<()> {
    let mut rules = rules::load(rules_path.as_deref())?;
    rules.max_turns = max_turns
        .or(rules.max_turns)
        .or(Some(rules::DEFAULT_SIMULATION_TURNS));

    let state = loader::from_path(&map, rules)
        .with_context(|| format!("failed to load game from {}", map.display()))?;

    info!(games, seed, "simulating");
    let summary = simulate::simulate(&state, games, seed);
    println!("{summary}");

    if let Some(path) = json {
        let text = serde_json::to_string_pretty(&summary)?;
        fs::write(&path, text)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    Ok(())
}
