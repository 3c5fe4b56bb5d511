/// Fixed rules of a game. Built once and never mutated while a game runs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub min_players: usize,
    pub max_players: usize,
    /// Starting armies per player when the roster is full.
    pub base_starting_armies: u32,
    /// Extra starting armies for every seat left empty.
    pub starting_armies_step: u32,
    pub max_territories: usize,
    pub max_continents: usize,
    pub min_reinforcements: u32,
    /// Territory count at or below which a player only receives `min_reinforcements`.
    pub reinforcement_threshold: usize,
    pub initial_trade_in_bonus: u32,
    pub trade_in_increment: u32,
    pub max_attack_dice: u32,
    pub max_defend_dice: u32,
    /// Number of turns after which a run is cancelled.
    pub max_turns: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_players: 6,
            base_starting_armies: 20,
            starting_armies_step: 5,
            max_territories: 100,
            max_continents: crate::render::CONTINENT_COLORS.len(),
            min_reinforcements: 3,
            reinforcement_threshold: 11,
            initial_trade_in_bonus: 4,
            trade_in_increment: 2,
            max_attack_dice: 3,
            max_defend_dice: 2,
            max_turns: None,
        }
    }
}

impl RulesConfig {
    pub fn starting_armies(&self, player_count: usize) -> u32 {
        let empty_seats = self.max_players.saturating_sub(player_count) as u32;
        self.base_starting_armies + self.starting_armies_step * empty_seats
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }
}
