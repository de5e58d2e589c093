use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::Card;
use crate::cards::Cards;
use crate::result::Result;

/// The remainder of a 52 card deck after removing a known card set.
/// `reset` restores the full remainder, so one deck can serve many
/// simulation rounds without rebuilding the exclusion set.
pub struct Deck {
    cards: [Card; Card::COUNT],
    max_len: usize,
    len: usize,
}

impl Deck {
    pub fn from_cards(rng: &mut impl Rng, known_cards: Cards) -> Self {
        let mut cards = [Card::MIN; Card::COUNT];
        let mut index = 0;
        for card in Card::all() {
            if known_cards.has(card) {
                continue;
            }
            cards[index] = card;
            index += 1;
        }
        cards[..index].shuffle(rng);
        Deck {
            cards,
            max_len: index,
            len: index,
        }
    }

    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<Card> {
        if self.len == 0 {
            None
        } else {
            let index = rng.gen_range(0..self.len);
            let card = self.cards[index];
            self.cards.swap(index, self.len - 1);
            self.len -= 1;
            Some(card)
        }
    }

    pub fn draw_result(&mut self, rng: &mut impl Rng) -> Result<Card> {
        self.draw(rng).ok_or_else(|| "no more cards in deck".into())
    }

    pub fn deal(&mut self, rng: &mut impl Rng, n: usize) -> Result<Vec<Card>> {
        if n > self.len {
            return Err(format!(
                "cannot deal {n} cards, only {} remaining",
                self.len
            )
            .into());
        }
        (0..n).map(|_| self.draw_result(rng)).collect()
    }

    pub fn reset(&mut self) {
        self.len = self.max_len;
    }

    pub fn remaining(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn excludes_known_cards() {
        let mut rng = SmallRng::seed_from_u64(1);
        let known: Cards = "AhKh7d".parse().unwrap();
        let mut deck = Deck::from_cards(&mut rng, known);
        assert_eq!(deck.remaining(), 49);

        let mut seen = Cards::EMPTY;
        while let Some(card) = deck.draw(&mut rng) {
            assert!(!known.has(card));
            assert!(seen.try_add(card));
        }
        assert_eq!(seen.count(), 49);
    }

    #[test]
    fn deal_fails_past_remaining_size() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut deck = Deck::from_cards(&mut rng, Cards::EMPTY);
        assert_eq!(deck.deal(&mut rng, 5).unwrap().len(), 5);
        assert_eq!(deck.remaining(), 47);
        assert!(deck.deal(&mut rng, 48).is_err());
        // A failed deal must not consume cards.
        assert_eq!(deck.remaining(), 47);
    }

    #[test]
    fn reset_restores_the_full_remainder() {
        let mut rng = SmallRng::seed_from_u64(3);
        let known: Cards = "AhKh".parse().unwrap();
        let mut deck = Deck::from_cards(&mut rng, known);
        let _ = deck.deal(&mut rng, 10).unwrap();
        deck.reset();
        assert_eq!(deck.remaining(), 50);
    }
}
