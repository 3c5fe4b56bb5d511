use std::cmp::Reverse;

use risk_engine::{GameState, MoveAttack, MoveFortify, PlayerBot, PlayerId, TerritoryId};
use tracing::debug;

/// Rule-of-thumb player: claims compact territory, reinforces its borders, attacks the
/// weakest reachable enemy and shuffles armies toward the most threatened front.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComputerPlayer;

impl ComputerPlayer {
    pub fn new() -> Self {
        Self
    }
}

fn owned_by(state: &GameState, territory: TerritoryId, player: PlayerId) -> bool {
    state.territory(territory).owner() == Some(player)
}

/// Half of `limit` while `from` still borders a territory the player does not hold,
/// otherwise all of it.
pub fn armies_to_move(state: &GameState, player: PlayerId, from: TerritoryId, limit: u32) -> u32 {
    let threatened = state
        .world()
        .neighbors(from)
        .iter()
        .any(|&x| !owned_by(state, x, player));

    if threatened {
        limit / 2
    } else {
        limit
    }
}

/// Picks the (source, target) pair with the largest `source + pending - target` army
/// advantage that is not negative. Earlier pairs win ties.
pub fn choose_attack_route(
    state: &GameState,
    player: PlayerId,
    targets: &[TerritoryId],
    pending: u32,
) -> Option<MoveAttack> {
    let mut route = None;
    let mut largest_difference = 0;

    for &target in targets {
        for &neighbor in state.world().neighbors(target) {
            if !owned_by(state, neighbor, player) {
                continue;
            }

            let difference = i64::from(state.territory(neighbor).armies()) + i64::from(pending)
                - i64::from(state.territory(target).armies());
            if difference >= 0 && (route.is_none() || difference > largest_difference) {
                route = Some(MoveAttack {
                    attacking_territory: neighbor,
                    defending_territory: target,
                });
                largest_difference = difference;
            }
        }
    }

    route
}

/// Sum of the armies on neighbors not held by the territory's owner.
pub fn army_count_differential(state: &GameState, territory: TerritoryId) -> u32 {
    let owner = state.territory(territory).owner();
    state
        .world()
        .neighbors(territory)
        .iter()
        .filter(|&&x| state.territory(x).owner() != owner)
        .map(|&x| state.territory(x).armies())
        .sum()
}

/// Returns `(supplier, consumer)`: a calm territory feeding an adjacent, more threatened
/// one. The consumer must face at least one enemy army.
pub fn choose_fortify_route(
    state: &GameState,
    player: PlayerId,
) -> Option<(TerritoryId, TerritoryId)> {
    let mut ranked = state.player(player).controlled().to_vec();
    ranked.sort_by_key(|&x| Reverse(army_count_differential(state, x)));

    let rank = |territory: TerritoryId| ranked.iter().position(|&x| x == territory);

    let mut route = None;
    let mut largest_disparity = 0;
    for (i, &supplier) in ranked.iter().enumerate().rev() {
        for &neighbor in state.world().neighbors(supplier) {
            let Some(neighbor_rank) = rank(neighbor) else {
                continue;
            };

            let disparity = i as i64 - neighbor_rank as i64;
            if (route.is_none() || disparity > largest_disparity)
                && army_count_differential(state, neighbor) > 0
            {
                route = Some((supplier, neighbor));
                largest_disparity = disparity;
            }
        }
    }

    route
}

/// Prefers unclaimed territory next to what the player already holds, otherwise any
/// available territory. Fewest neighbors wins.
pub fn claim_territory(
    state: &GameState,
    player: PlayerId,
    available: &[TerritoryId],
) -> TerritoryId {
    let controlled = state.player(player).controlled();
    if !controlled.is_empty() {
        let empty_neighbors = get_unoccupied_neighbors(state, controlled);
        if let Some(territory) = lowest_neighbor_count(state, &empty_neighbors) {
            return territory;
        }
    }

    lowest_neighbor_count(state, available).expect("No territory left to claim")
}

/// The given territories that border one the player does not hold.
pub fn enemy_adjacent_territories(
    state: &GameState,
    player: PlayerId,
    territories: &[TerritoryId],
) -> Vec<TerritoryId> {
    territories
        .iter()
        .copied()
        .filter(|&t| {
            state
                .world()
                .neighbors(t)
                .iter()
                .any(|&x| !owned_by(state, x, player))
        })
        .collect()
}

pub fn lowest_army_count(state: &GameState, player: PlayerId) -> Option<TerritoryId> {
    let mut fewest: Option<TerritoryId> = None;
    for &territory in state.player(player).controlled() {
        let armies = state.territory(territory).armies();
        if fewest.map_or(true, |x| armies < state.territory(x).armies()) {
            fewest = Some(territory);
        }
    }

    fewest
}

/// Spreads the player's whole pool one army at a time over its border territories.
pub fn reinforce_initial(state: &GameState, player: PlayerId) -> Vec<(TerritoryId, u32)> {
    let controlled = state.player(player).controlled();
    let mut candidates = enemy_adjacent_territories(state, player, controlled);
    if candidates.is_empty() {
        candidates = controlled.to_vec();
    }

    let mut placements: Vec<(TerritoryId, u32)> = Vec::new();
    let mut pending = state.player(player).army_count;
    while pending > 0 {
        let territory = candidates[pending as usize % candidates.len()];
        match placements.iter_mut().find(|(t, _)| *t == territory) {
            Some((_, count)) => *count += 1,
            None => placements.push((territory, 1)),
        }

        pending -= 1;
    }

    placements
}

pub fn get_unoccupied_neighbors(state: &GameState, territories: &[TerritoryId]) -> Vec<TerritoryId> {
    let mut included = vec![false; state.world().len()];
    let mut unoccupied = Vec::new();

    for &territory in territories {
        for &neighbor in state.world().neighbors(territory) {
            if !state.territory(neighbor).is_claimed() && !included[neighbor.0] {
                included[neighbor.0] = true;
                unoccupied.push(neighbor);
            }
        }
    }

    unoccupied
}

pub fn lowest_neighbor_count(state: &GameState, territories: &[TerritoryId]) -> Option<TerritoryId> {
    let mut fewest: Option<TerritoryId> = None;
    for &territory in territories {
        let count = state.world().neighbors(territory).len();
        if fewest.map_or(true, |x| count < state.world().neighbors(x).len()) {
            fewest = Some(territory);
        }
    }

    fewest
}

/// Enemy-held territories next to anything the player holds, first seen first.
fn bordering_enemies(state: &GameState, player: PlayerId) -> Vec<TerritoryId> {
    let mut included = vec![false; state.world().len()];
    let mut enemies = Vec::new();

    for &territory in state.player(player).controlled() {
        for &neighbor in state.world().neighbors(territory) {
            if state.territory(neighbor).is_claimed()
                && !owned_by(state, neighbor, player)
                && !included[neighbor.0]
            {
                included[neighbor.0] = true;
                enemies.push(neighbor);
            }
        }
    }

    enemies
}

impl PlayerBot for ComputerPlayer {
    fn query_claim_territory(
        &mut self,
        state: &GameState,
        player: PlayerId,
        available: &[TerritoryId],
    ) -> TerritoryId {
        claim_territory(state, player, available)
    }

    fn query_place_initial_armies(
        &mut self,
        state: &GameState,
        player: PlayerId,
    ) -> Vec<(TerritoryId, u32)> {
        reinforce_initial(state, player)
    }

    fn query_distribute_troops(
        &mut self,
        state: &GameState,
        player: PlayerId,
        armies: u32,
    ) -> Vec<(TerritoryId, u32)> {
        let targets = bordering_enemies(state, player);
        let territory = match choose_attack_route(state, player, &targets, armies) {
            Some(route) => route.attacking_territory,
            None => lowest_army_count(state, player).expect("Player to move holds no territory"),
        };

        debug!(player = player.0, territory = territory.0, armies, "reinforcing");
        vec![(territory, armies)]
    }

    fn query_attack(&mut self, state: &GameState, player: PlayerId) -> Option<MoveAttack> {
        let targets = state.territories_for_attack(player);
        choose_attack_route(state, player, &targets, 0)
            .filter(|route| state.territory(route.attacking_territory).armies() > 1)
    }

    fn query_attack_dice(&mut self, _: &GameState, _: PlayerId, _: MoveAttack, max: u32) -> u32 {
        max
    }

    fn query_defend(&mut self, _: &GameState, _: PlayerId, _: MoveAttack, max: u32) -> u32 {
        max
    }

    fn query_continue_attack(&mut self, state: &GameState, _: PlayerId, attack: MoveAttack) -> bool {
        state.territory(attack.attacking_territory).armies()
            >= state.territory(attack.defending_territory).armies()
    }

    fn query_troops_after_attack(
        &mut self,
        state: &GameState,
        player: PlayerId,
        attack: MoveAttack,
        max: u32,
    ) -> u32 {
        armies_to_move(state, player, attack.attacking_territory, max)
    }

    fn query_fortify(&mut self, state: &GameState, player: PlayerId) -> Option<MoveFortify> {
        let (supplier, consumer) = choose_fortify_route(state, player)?;
        let armies = state.territory(supplier).armies() / 2;

        (armies > 0).then_some(MoveFortify {
            source_territory: supplier,
            target_territory: consumer,
            armies,
        })
    }
}
