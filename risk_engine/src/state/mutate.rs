use tracing::debug;

use crate::{map::TerritoryId, player::PlayerId};

use super::GameState;

impl GameState {
    /// Hands `territory` to `player` with exactly `armies` on it, taking it from its
    /// previous owner if any. Pools are not touched.
    pub fn occupy(&mut self, player: PlayerId, territory: TerritoryId, armies: u32) {
        assert!(armies > 0, "An occupied territory needs at least one army.");

        match self.world[territory].owner() {
            Some(previous) if previous == player => {}
            Some(previous) => {
                self.players[previous.0].lose_territory(territory);
                self.players[player.0].gain_territory(territory);
            }
            None => self.players[player.0].gain_territory(territory),
        }

        self.world.set_occupant(territory, player, armies);
    }

    /// Initial selection: one army from the player's pool onto an unclaimed territory.
    pub fn claim_territory(&mut self, player: PlayerId, territory: TerritoryId) {
        assert!(
            !self.world[territory].is_claimed(),
            "Tried to claim an occupied territory."
        );
        assert!(
            self.players[player.0].army_count > 0,
            "Tried to claim a territory without armies left."
        );

        self.occupy(player, territory, 1);
        self.players[player.0].army_count -= 1;
    }

    /// Moves `count` armies from the player's pool onto a territory it holds.
    pub fn place_armies(&mut self, player: PlayerId, territory: TerritoryId, count: u32) {
        assert_eq!(
            self.world[territory].owner(),
            Some(player),
            "Tried to place armies on a territory the player does not hold."
        );

        let pool = &mut self.players[player.0].army_count;
        assert!(*pool >= count, "Tried to place more armies than available.");
        *pool -= count;

        self.world.change_armies(territory, count as i32);
        debug!(player = player.0, territory = territory.0, count, "placed armies");
    }

    /// Transfers armies between two adjacent territories of one owner.
    pub fn fortify_territory(&mut self, from: TerritoryId, to: TerritoryId, count: u32) {
        assert!(
            self.world.are_adjacent(from, to),
            "Tried to fortify between territories that are not adjacent."
        );

        self.move_armies(from, to, count);
    }

    /// Transfers armies between two territories of one owner, leaving at least one behind.
    pub fn move_armies(&mut self, from: TerritoryId, to: TerritoryId, count: u32) {
        let owner = self.world[from].owner();
        assert!(
            owner.is_some() && owner == self.world[to].owner(),
            "Tried to move armies between territories of different owners."
        );
        assert!(
            self.world[from].armies() > count,
            "Tried to move every army out of a territory."
        );

        self.world.change_armies(from, -(count as i32));
        self.world.change_armies(to, count as i32);
    }

    /// Moves a player without territory from the active roster to the eliminated one,
    /// returning its hand to the deck.
    pub fn eliminate_player(&mut self, player: PlayerId) {
        assert!(
            self.players[player.0].controlled().is_empty(),
            "Tried to eliminate a player that still holds territory."
        );
        assert!(
            self.active.contains(&player),
            "Tried to eliminate a player that is not active."
        );

        let hand = std::mem::take(&mut self.players[player.0].cards);
        self.deck.give_back(hand);

        self.active.retain(|&x| x != player);
        self.eliminated.push(player);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::RulesConfig,
        map::{TerritoryId, World},
        player::{PlayerId, PlayerKind},
        state::GameState,
    };

    fn small_state() -> GameState {
        let mut world = World::new();
        let a = world.get_or_create_territory("A", Some("C"));
        let b = world.get_or_create_territory("B", Some("C"));
        let c = world.get_or_create_territory("C", Some("C"));
        for (x, y) in [(a, b), (b, c)] {
            world.add_neighbor(x, y);
            world.add_neighbor(y, x);
        }

        let roster = ["X", "Y", "Z"].map(|x| (x.to_owned(), PlayerKind::Computer));
        GameState::new("Test", world, roster, RulesConfig::default())
    }

    #[test]
    fn occupy_moves_ownership_between_players() {
        let mut state = small_state();
        let (x, y) = (PlayerId(0), PlayerId(1));
        let a = TerritoryId(0);

        state.occupy(x, a, 2);
        state.occupy(y, a, 3);

        assert!(state.player(x).controlled().is_empty());
        assert_eq!(state.player(y).controlled(), [a]);
        assert_eq!(state.territory(a).owner(), Some(y));
        assert_eq!(state.territory(a).armies(), 3);
    }

    #[test]
    fn claim_and_place_consume_the_pool() {
        let mut state = small_state();
        let x = PlayerId(0);
        state.allocate_armies();

        state.claim_territory(x, TerritoryId(1));
        state.place_armies(x, TerritoryId(1), 4);

        assert_eq!(state.player(x).army_count, 35 - 5);
        assert_eq!(state.territory(TerritoryId(1)).armies(), 5);
    }

    #[test]
    #[should_panic(expected = "claim an occupied territory")]
    fn claim_rejects_occupied_territory() {
        let mut state = small_state();
        state.allocate_armies();
        state.claim_territory(PlayerId(0), TerritoryId(0));
        state.claim_territory(PlayerId(1), TerritoryId(0));
    }

    #[test]
    #[should_panic(expected = "every army")]
    fn fortify_keeps_one_army_behind() {
        let mut state = small_state();
        state.occupy(PlayerId(0), TerritoryId(0), 2);
        state.occupy(PlayerId(0), TerritoryId(1), 2);
        state.fortify_territory(TerritoryId(0), TerritoryId(1), 2);
    }

    #[test]
    fn eliminated_hand_returns_to_deck() {
        let mut state = small_state();
        let z = PlayerId(2);
        let mut dice = crate::random::LoadedDice::default();
        let card = state.deck.draw(&mut dice).unwrap();
        state.players[z.0].cards.push(card);

        state.eliminate_player(z);

        assert_eq!(state.active(), [PlayerId(0), PlayerId(1)]);
        assert_eq!(state.eliminated(), [z]);
        assert!(state.player(z).cards.is_empty());
        assert_eq!(state.deck().len(), state.deck().minted());
    }
}
