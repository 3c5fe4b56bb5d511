use crate::{card::Card, map::TerritoryId, player::PlayerId};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAttack {
    pub attacking_territory: TerritoryId,
    pub defending_territory: TerritoryId,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveFortify {
    pub source_territory: TerritoryId,
    pub target_territory: TerritoryId,
    pub armies: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub player: PlayerId,
    pub defender: PlayerId,
    pub attack: MoveAttack,
    pub attack_dice: u32,
    pub defend_dice: u32,
    pub attacker_lost: u32,
    pub defender_lost: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartTurn {
    pub player: PlayerId,
    pub turn: u32,
    pub territories_held: u32,
    pub reinforcements: u32,
}

/// One entry of the game journal, in the order things happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Record {
    StartGame {
        players: Vec<PlayerId>,
        starting_armies: u32,
    },
    ClaimTerritory(PlayerId, TerritoryId),
    PlaceArmies(PlayerId, TerritoryId, u32),
    StartTurn(StartTurn),
    DrewCard(PlayerId, Card),
    TradedCards {
        player: PlayerId,
        card: Card,
        bonus: u32,
    },
    Attack(Attack),
    TerritoryConquered {
        player: PlayerId,
        territory: TerritoryId,
        armies: u32,
    },
    MoveAfterAttack(PlayerId, MoveFortify),
    PlayerEliminated {
        player: PlayerId,
        by: PlayerId,
    },
    Fortify(PlayerId, MoveFortify),
    Winner(PlayerId),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    Cancelled,
    Success(PlayerId),
}

impl GameResult {
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameResult::Cancelled => None,
            GameResult::Success(player) => Some(player),
        }
    }
}
