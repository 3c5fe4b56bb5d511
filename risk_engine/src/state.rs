pub mod battle;
pub mod economy;
pub mod mutate;

use std::fmt;

use crate::{
    card::Deck,
    config::RulesConfig,
    map::{Territory, TerritoryId, World},
    player::{Player, PlayerId, PlayerKind},
    render::{TerritoryView, CONTINENT_COLORS, PLAYER_COLORS},
};

pub use battle::BattleOutcome;
pub use economy::Reinforcements;

#[derive(Clone, Debug)]
pub struct GameState {
    title: String,
    world: World,
    players: Vec<Player>,
    active: Vec<PlayerId>,
    eliminated: Vec<PlayerId>,
    deck: Deck,
    trade_in_bonus: u32,
    rules: RulesConfig,
}

impl GameState {
    /// Seats the players in the given order. The deck is sized from the world.
    pub fn new(
        title: impl Into<String>,
        world: World,
        roster: impl IntoIterator<Item = (String, PlayerKind)>,
        rules: RulesConfig,
    ) -> Self {
        let players = roster
            .into_iter()
            .enumerate()
            .map(|(i, (name, kind))| Player::new(PlayerId(i), name, kind))
            .collect::<Vec<_>>();

        Self {
            title: title.into(),
            deck: Deck::for_territories(world.len()),
            world,
            active: players.iter().map(|x| x.id).collect(),
            players,
            eliminated: Vec::new(),
            trade_in_bonus: rules.initial_trade_in_bonus,
            rules,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn territory(&self, territory: TerritoryId) -> &Territory {
        &self.world[territory]
    }

    pub fn find_territory(&self, name: &str) -> Option<TerritoryId> {
        self.world.find(name)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player.0]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player.0]
    }

    pub fn find_player(&self, name: &str) -> Option<PlayerId> {
        self.players.iter().find(|x| x.name == name).map(|x| x.id)
    }

    /// Players still in the game, in turn order.
    pub fn active(&self) -> &[PlayerId] {
        &self.active
    }

    /// Players knocked out, in the order they fell.
    pub fn eliminated(&self) -> &[PlayerId] {
        &self.eliminated
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Armies the next card trade is worth.
    pub fn trade_in_bonus(&self) -> u32 {
        self.trade_in_bonus
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.active.as_slice() {
            [winner] => Some(*winner),
            _ => None,
        }
    }

    pub fn territories_for_attack(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.world.territories_for_attack(self.player(player))
    }

    pub fn surrounding_territories(
        &self,
        player: PlayerId,
        territory: TerritoryId,
        require_multiple_armies: bool,
    ) -> Vec<TerritoryId> {
        self.world
            .surrounding_territories(self.player(player), territory, require_multiple_armies)
    }

    pub fn territories_to_fortify(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.world.territories_to_fortify(self.player(player))
    }

    pub fn player_color(&self, player: PlayerId) -> &'static str {
        PLAYER_COLORS[player.0 % PLAYER_COLORS.len()]
    }

    /// Display colors keyed by player name, in seating order.
    pub fn player_colors(&self) -> Vec<(&str, &'static str)> {
        self.players
            .iter()
            .map(|x| (x.name.as_str(), self.player_color(x.id)))
            .collect()
    }

    pub fn continent_color(&self, continent: &str) -> &'static str {
        let index = self
            .world
            .continents()
            .iter()
            .position(|&x| x == continent)
            .unwrap_or(0);
        CONTINENT_COLORS[index % CONTINENT_COLORS.len()]
    }

    /// What the renderer is shown: every territory with names resolved and colors attached.
    pub fn snapshot(&self) -> Vec<TerritoryView> {
        self.world
            .iter()
            .map(|(_, territory)| {
                let continent = territory.continent().unwrap_or_default();
                let owner = territory.owner();
                TerritoryView {
                    name: territory.name().to_owned(),
                    continent: continent.to_owned(),
                    continent_color: self.continent_color(continent),
                    neighbors: territory
                        .neighbors()
                        .iter()
                        .map(|&x| self.world[x].name().to_owned())
                        .collect(),
                    owner: owner.map(|x| self.player(x).name.clone()),
                    owner_color: owner.map(|x| self.player_color(x)),
                    armies: territory.armies(),
                }
            })
            .collect()
    }

    fn player_names(&self, players: &[PlayerId]) -> String {
        players
            .iter()
            .map(|&x| self.player(x).name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Playing: {}", self.player_names(&self.active))?;
        writeln!(f, "Eliminated: {}", self.player_names(&self.eliminated))?;
        write!(f, "Territories:")?;

        for (_, territory) in self.world.iter() {
            let neighbors = territory
                .neighbors()
                .iter()
                .map(|&x| self.world[x].name())
                .collect::<Vec<_>>()
                .join(", ");

            write!(
                f,
                "\n{}, {} --> {}",
                territory.name(),
                territory.continent().unwrap_or_default(),
                neighbors
            )?;
        }

        Ok(())
    }
}
