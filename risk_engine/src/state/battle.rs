use std::cmp::min;

use tracing::info;

use crate::{combat, map::TerritoryId, player::PlayerId, random::RandomSource};

use super::GameState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BattleOutcome {
    pub attacker_lost: u32,
    pub defender_lost: u32,
    pub conquered: bool,
    pub defender_eliminated: Option<PlayerId>,
}

impl GameState {
    /// Largest number of dice the attacker may throw from `from`.
    pub fn max_attack_dice(&self, from: TerritoryId) -> u32 {
        min(
            self.rules.max_attack_dice,
            self.world[from].armies().saturating_sub(1),
        )
    }

    /// Largest number of dice the defender of `to` may throw.
    pub fn max_defend_dice(&self, to: TerritoryId) -> u32 {
        min(self.rules.max_defend_dice, self.world[to].armies())
    }

    /// Rolls a battle and applies its result.
    pub fn attack_territory<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        from: TerritoryId,
        to: TerritoryId,
        attack_count: u32,
        defend_count: u32,
    ) -> BattleOutcome {
        assert!(
            (1..=self.max_attack_dice(from)).contains(&attack_count),
            "Invalid number of attacking dice."
        );
        assert!(
            (1..=self.max_defend_dice(to)).contains(&defend_count),
            "Invalid number of defending dice."
        );

        let net = combat::decide_battle(rng, attack_count, defend_count);
        self.apply_battle(from, to, attack_count, net)
    }

    /// Applies a battle with the given net result. A positive net costs the defender that
    /// many armies, a negative one costs the attacker, zero costs each side one. When the
    /// defender is wiped out `attack_count` armies march in.
    pub fn apply_battle(
        &mut self,
        from: TerritoryId,
        to: TerritoryId,
        attack_count: u32,
        net: i32,
    ) -> BattleOutcome {
        let Some(attacker) = self.world[from].owner() else {
            panic!("Tried to attack from an unoccupied territory.");
        };
        let Some(defender) = self.world[to].owner() else {
            panic!("Tried to attack an unoccupied territory.");
        };
        assert_ne!(attacker, defender, "Tried to attack own territory.");
        assert!(
            self.world.are_adjacent(from, to),
            "Tried to attack a territory that is not adjacent."
        );

        let (attacker_lost, defender_lost) = match net {
            n if n > 0 => (0, n.unsigned_abs()),
            n if n < 0 => (n.unsigned_abs(), 0),
            _ => (1, 1),
        };

        self.world.change_armies(from, -(attacker_lost as i32));
        self.world.change_armies(to, -(defender_lost as i32));

        let mut outcome = BattleOutcome {
            attacker_lost,
            defender_lost,
            conquered: false,
            defender_eliminated: None,
        };

        if self.world[to].armies() > 0 {
            return outcome;
        }

        assert!(
            self.world[from].armies() > attack_count,
            "Conquering army would leave its territory empty."
        );
        self.world.change_armies(from, -(attack_count as i32));
        self.occupy(attacker, to, attack_count);
        outcome.conquered = true;

        info!(
            attacker = %self.players[attacker.0].name,
            defender = %self.players[defender.0].name,
            territory = self.world[to].name(),
            "territory conquered"
        );

        if self.players[defender.0].controlled().is_empty() {
            self.eliminate_player(defender);
            outcome.defender_eliminated = Some(defender);
            info!(player = %self.players[defender.0].name, "player eliminated");
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::RulesConfig,
        map::{TerritoryId, World},
        player::{PlayerId, PlayerKind},
        random::LoadedDice,
        state::GameState,
    };

    const GB: TerritoryId = TerritoryId(0);
    const FRANCE: TerritoryId = TerritoryId(1);
    const BELGIUM: TerritoryId = TerritoryId(2);
    const ROOSEVELT: PlayerId = PlayerId(0);
    const CHURCHILL: PlayerId = PlayerId(1);

    fn channel(gb: u32, france: u32) -> GameState {
        let mut world = World::new();
        let ids = ["Great Britain", "France", "Belgium"]
            .map(|name| world.get_or_create_territory(name, Some("Europe")));
        for (a, b) in [(ids[0], ids[1]), (ids[1], ids[2]), (ids[0], ids[2])] {
            world.add_neighbor(a, b);
            world.add_neighbor(b, a);
        }

        let roster = ["Roosevelt", "Churchill", "Hitler"].map(|x| (x.to_owned(), PlayerKind::Human));
        let mut state = GameState::new("Channel", world, roster, RulesConfig::default());
        state.occupy(ROOSEVELT, GB, gb);
        state.occupy(CHURCHILL, FRANCE, france);
        state.occupy(PlayerId(2), BELGIUM, 1);
        state
    }

    #[test]
    fn defender_loses_net() {
        let mut state = channel(3, 3);
        let outcome = state.apply_battle(GB, FRANCE, 2, 1);

        assert_eq!(state.territory(FRANCE).armies(), 2);
        assert_eq!(state.territory(GB).armies(), 3);
        assert!(!outcome.conquered);
    }

    #[test]
    fn defender_conquered_and_eliminated() {
        let mut state = channel(3, 1);
        let outcome = state.apply_battle(GB, FRANCE, 1, 1);

        assert!(outcome.conquered);
        assert_eq!(outcome.defender_eliminated, Some(CHURCHILL));
        assert_eq!(state.territory(FRANCE).owner(), Some(ROOSEVELT));
        assert_eq!(state.territory(FRANCE).armies(), 1);
        assert_eq!(state.territory(GB).armies(), 2);
        assert_eq!(state.player(ROOSEVELT).controlled(), [GB, FRANCE]);
        assert_eq!(state.active(), [ROOSEVELT, PlayerId(2)]);
        assert_eq!(state.eliminated(), [CHURCHILL]);
    }

    #[test]
    fn attacker_loses_net() {
        let mut state = channel(3, 3);
        state.apply_battle(GB, FRANCE, 2, -1);

        assert_eq!(state.territory(GB).armies(), 2);
        assert_eq!(state.territory(FRANCE).armies(), 3);
    }

    #[test]
    fn draw_costs_both_sides() {
        let mut state = channel(3, 3);
        state.apply_battle(GB, FRANCE, 2, 0);

        assert_eq!(state.territory(GB).armies(), 2);
        assert_eq!(state.territory(FRANCE).armies(), 2);
    }

    #[test]
    fn rolled_battle_respects_dice_caps() {
        let mut state = channel(5, 2);
        assert_eq!(state.max_attack_dice(GB), 3);
        assert_eq!(state.max_defend_dice(FRANCE), 2);

        let mut dice = LoadedDice::new([6, 6, 6, 1, 1]);
        let outcome = state.attack_territory(&mut dice, GB, FRANCE, 3, 2);

        assert!(outcome.conquered);
        assert_eq!(outcome.defender_lost, 2);
        assert_eq!(state.territory(FRANCE).armies(), 3);
        assert_eq!(state.territory(GB).armies(), 2);
    }

    #[test]
    #[should_panic(expected = "attacking dice")]
    fn single_army_cannot_attack() {
        let mut state = channel(1, 2);
        state.attack_territory(&mut LoadedDice::default(), GB, FRANCE, 1, 1);
    }
}
