use tracing::debug;

use crate::{card::Card, player::PlayerId, random::RandomSource};

use super::GameState;

/// Armies a player receives at the start of a turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Reinforcements {
    pub base: u32,
    pub card: Option<Card>,
    pub bonus: u32,
}

impl Reinforcements {
    pub fn total(&self) -> u32 {
        self.base + self.bonus
    }
}

impl GameState {
    /// Sets every active player's pool to the starting allotment for this roster size.
    pub fn allocate_armies(&mut self) -> u32 {
        let armies = self.rules.starting_armies(self.active.len());
        for &player in &self.active {
            self.players[player.0].army_count = armies;
        }

        armies
    }

    /// Adds `card` to the player's hand. Three of its category are traded for the
    /// current bonus, which then escalates. Returns the armies awarded.
    pub fn determine_card_match(&mut self, player: PlayerId, card: Card) -> u32 {
        let hand = &mut self.players[player.0].cards;
        hand.push(card);

        if hand.iter().filter(|&&x| x == card).count() < 3 {
            return 0;
        }

        let mut removed = 0;
        hand.retain(|&x| {
            if x == card && removed < 3 {
                removed += 1;
                false
            } else {
                true
            }
        });

        self.deck.give_back([card; 3]);

        let bonus = self.trade_in_bonus;
        self.trade_in_bonus += self.rules.trade_in_increment;
        debug!(player = player.0, ?card, bonus, "traded cards");
        bonus
    }

    /// Credits the player's pool for a new turn and returns the breakdown.
    pub fn calculate_reinforcements<R: RandomSource + ?Sized>(
        &mut self,
        player: PlayerId,
        rng: &mut R,
    ) -> Reinforcements {
        let held = self.players[player.0].controlled().len();
        let base = if held <= self.rules.reinforcement_threshold {
            self.rules.min_reinforcements
        } else {
            held as u32 / 3
        };

        let card = self.deck.draw(rng);
        let bonus = card.map_or(0, |card| self.determine_card_match(player, card));

        let reinforcements = Reinforcements { base, card, bonus };
        self.players[player.0].army_count += reinforcements.total();
        reinforcements
    }
}
