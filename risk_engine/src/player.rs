use crate::{
    card::Card,
    map::TerritoryId,
    record::{Attack, MoveAttack, MoveFortify},
    state::GameState,
};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, enum_map::Enum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlayerKind {
    Human,
    Computer,
}

impl PlayerKind {
    /// Returns `true` if the player kind is [`Human`].
    ///
    /// [`Human`]: PlayerKind::Human
    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self, Self::Human)
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    /// Armies received but not yet placed on the map.
    pub army_count: u32,
    pub cards: Vec<Card>,
    controlled: Vec<TerritoryId>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            army_count: 0,
            cards: Vec::new(),
            controlled: Vec::new(),
        }
    }

    pub fn controlled(&self) -> &[TerritoryId] {
        &self.controlled
    }

    pub fn controls(&self, territory: TerritoryId) -> bool {
        self.controlled.contains(&territory)
    }

    pub(crate) fn gain_territory(&mut self, territory: TerritoryId) {
        debug_assert!(!self.controls(territory));
        self.controlled.push(territory);
    }

    pub(crate) fn lose_territory(&mut self, territory: TerritoryId) {
        self.controlled.retain(|&x| x != territory);
    }
}

/// Decision provider for one kind of player.
///
/// The engine validates every answer and panics on an illegal one.
pub trait PlayerBot {
    fn query_claim_territory(
        &mut self,
        state: &GameState,
        player: PlayerId,
        available: &[TerritoryId],
    ) -> TerritoryId;

    /// Must place the player's whole pending pool on territories it controls.
    fn query_place_initial_armies(
        &mut self,
        state: &GameState,
        player: PlayerId,
    ) -> Vec<(TerritoryId, u32)>;

    /// Must place exactly `armies` on territories the player controls.
    fn query_distribute_troops(
        &mut self,
        state: &GameState,
        player: PlayerId,
        armies: u32,
    ) -> Vec<(TerritoryId, u32)>;

    fn query_attack(&mut self, state: &GameState, player: PlayerId) -> Option<MoveAttack>;

    fn query_attack_dice(
        &mut self,
        state: &GameState,
        player: PlayerId,
        attack: MoveAttack,
        max: u32,
    ) -> u32;

    /// Asked of the defending player's provider.
    fn query_defend(
        &mut self,
        state: &GameState,
        defender: PlayerId,
        attack: MoveAttack,
        max: u32,
    ) -> u32;

    fn query_continue_attack(
        &mut self,
        state: &GameState,
        player: PlayerId,
        attack: MoveAttack,
    ) -> bool;

    /// Extra armies to move into a freshly conquered territory, at most `max`.
    fn query_troops_after_attack(
        &mut self,
        state: &GameState,
        player: PlayerId,
        attack: MoveAttack,
        max: u32,
    ) -> u32;

    fn query_fortify(&mut self, state: &GameState, player: PlayerId) -> Option<MoveFortify>;

    /// Called after every battle that does not end the game, once per player kind
    /// involved. `player` is the attacker or the defender.
    fn notify_battle(&mut self, _state: &GameState, _player: PlayerId, _battle: &Attack) {}
}
