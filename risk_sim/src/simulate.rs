use std::{collections::BTreeMap, fmt};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use risk_bots::ComputerPlayer;
use risk_engine::{GameEngine, GameResult, GameState};
use serde::Serialize;
use tracing::{debug, instrument};

/// Totals over a batch of all-computer games.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct SimulationSummary {
    pub games: u64,
    /// Games won, keyed by player name.
    pub wins: BTreeMap<String, u64>,
    pub cancelled: u64,
    pub total_turns: u64,
}

impl SimulationSummary {
    fn single(state: &GameState, result: GameResult, turns: u32) -> Self {
        let mut summary = Self {
            games: 1,
            total_turns: u64::from(turns),
            ..Self::default()
        };

        match result {
            GameResult::Success(winner) => {
                summary.wins.insert(state.player(winner).name.clone(), 1);
            }
            GameResult::Cancelled => summary.cancelled = 1,
        }

        summary
    }

    fn merge(mut self, other: Self) -> Self {
        self.games += other.games;
        self.cancelled += other.cancelled;
        self.total_turns += other.total_turns;
        for (name, wins) in other.wins {
            *self.wins.entry(name).or_default() += wins;
        }

        self
    }

    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }

        self.total_turns as f64 / self.games as f64
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games: {}", self.games)?;
        for (name, wins) in &self.wins {
            writeln!(f, "{name}: {wins}")?;
        }
        writeln!(f, "Cancelled: {}", self.cancelled)?;
        write!(f, "Average turns: {:.1}", self.average_turns())
    }
}

/// Plays `games` copies of `state` to the end with computer players in every seat.
/// Game `i` is seeded with `seed + i`, so a batch is reproducible whatever the thread
/// count.
#[instrument(skip(state), fields(title = state.title()))]
pub fn simulate(state: &GameState, games: u64, seed: u64) -> SimulationSummary {
    (0..games)
        .into_par_iter()
        .map(|i| play_game(state.clone(), seed.wrapping_add(i)))
        .reduce(SimulationSummary::default, SimulationSummary::merge)
}

fn play_game(state: GameState, seed: u64) -> SimulationSummary {
    let mut engine = GameEngine::new(
        state,
        Box::new(ComputerPlayer::new()),
        Box::new(ComputerPlayer::new()),
        Xoshiro256StarStar::seed_from_u64(seed),
    );

    let result = engine.run();
    debug!(seed, ?result, turns = engine.turns(), "game finished");

    SimulationSummary::single(engine.state(), result, engine.turns())
}
