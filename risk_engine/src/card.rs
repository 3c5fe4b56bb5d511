use tracing::warn;

use crate::random::RandomSource;

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, enumn::N, enum_map::Enum)]
#[cfg_attr(
    feature = "serde",
    derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr)
)]
pub enum Card {
    Infantry = 1,
    Cavalry = 2,
    Artillery = 3,
}

impl Card {
    pub const ALL: [Card; 3] = [Card::Infantry, Card::Cavalry, Card::Artillery];

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Cards not currently held by any player.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    minted: usize,
}

impl Deck {
    /// One card of each category per three territories; leftovers are not minted.
    pub fn for_territories(territory_count: usize) -> Self {
        let per_category = territory_count / Card::ALL.len();
        let cards = Card::ALL
            .into_iter()
            .flat_map(|card| std::iter::repeat(card).take(per_category))
            .collect::<Vec<_>>();

        Self {
            minted: cards.len(),
            cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn minted(&self) -> usize {
        self.minted
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn draw<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }

        let index = rng.pick(self.cards.len());
        Some(self.cards.swap_remove(index))
    }

    /// Returns cards to the deck. Cards beyond the minted total are dropped.
    pub fn give_back(&mut self, cards: impl IntoIterator<Item = Card>) {
        let mut dropped = 0;
        for card in cards {
            if self.cards.len() < self.minted {
                self.cards.push(card);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!(dropped, minted = self.minted, "deck full, dropped returned cards");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::LoadedDice;

    #[test]
    fn deck_is_balanced_and_discards_remainder() {
        let deck = Deck::for_territories(35);
        assert_eq!(deck.len(), 33);
        assert_eq!(deck.minted(), 33);
        for card in Card::ALL {
            assert_eq!(deck.cards().iter().filter(|&&x| x == card).count(), 11);
        }
    }

    #[test]
    fn draw_empties_deck() {
        let mut deck = Deck::for_territories(3);
        let mut dice = LoadedDice::default();
        let mut drawn = Vec::new();
        while let Some(card) = deck.draw(&mut dice) {
            drawn.push(card);
        }

        drawn.sort_by_key(|card| card.value());
        assert_eq!(drawn, Card::ALL);
        assert!(deck.is_empty());
    }

    #[test]
    fn give_back_is_capped() {
        let mut deck = Deck::for_territories(6);
        let mut dice = LoadedDice::default();
        deck.draw(&mut dice);

        deck.give_back([Card::Infantry, Card::Cavalry, Card::Artillery]);
        assert_eq!(deck.len(), 6);
    }

    #[test]
    fn card_values() {
        assert_eq!(Card::n(2), Some(Card::Cavalry));
        assert_eq!(Card::Artillery.value(), 3);
        assert_eq!(Card::n(0), None);
    }
}
