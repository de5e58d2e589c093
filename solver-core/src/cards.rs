use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::card::Card;
use crate::hand::Hand;
use crate::result::{Error, Result};

/// A set of cards, one bit per card index. Each 16 bit suite group only
/// uses its low 13 bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Cards(u64);

impl fmt::Debug for Cards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Cards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.iter() {
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl FromStr for Cards {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl BitOr for Cards {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl FromIterator<Card> for Cards {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut cards = Cards::EMPTY;
        for card in iter {
            cards.try_add(card);
        }
        cards
    }
}

impl Cards {
    pub const EMPTY: Self = Self(0);

    pub(crate) const MASK_FULL: u64 = 0x1FFF_1FFF_1FFF_1FFF;

    /// Like [`Cards::from_bytes`], but for cards that are already parsed.
    /// Fails on the first repeated card.
    pub fn from_slice(cards: &[Card]) -> Result<Self> {
        let mut set = Cards::EMPTY;
        for card in cards.iter().copied() {
            if !set.try_add(card) {
                return Err(Error::DuplicateCard(card));
            }
        }
        Ok(set)
    }

    /// Parses concatenated two character card tokens, e.g. `AhKs7c`.
    pub fn from_bytes(s: &[u8]) -> Result<Self> {
        if s.len() % 2 != 0 {
            return Err(Error::InvalidCard(format!(
                "'{}': bad length",
                String::from_utf8_lossy(s)
            )));
        }
        let mut cards = Cards::EMPTY;
        for pair in s.chunks(2) {
            let card = Card::from_bytes(pair)?;
            if !cards.try_add(card) {
                return Err(Error::DuplicateCard(card));
            }
        }
        Ok(cards)
    }

    pub fn has(self, card: Card) -> bool {
        self.0 & (1 << card.to_index_u64()) != 0
    }

    pub fn add(&mut self, card: Card) {
        debug_assert!(!self.has(card));
        self.0 |= 1 << card.to_index_u64();
    }

    pub fn try_add(&mut self, card: Card) -> bool {
        if self.has(card) {
            false
        } else {
            self.add(card);
            true
        }
    }

    pub fn with(mut self, card: Card) -> Self {
        self.add(card);
        self
    }

    pub fn count(self) -> u8 {
        self.0.count_ones() as u8
    }

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    pub fn iter(self) -> impl Iterator<Item = Card> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let index = bits.trailing_zeros();
                bits &= bits - 1;
                Card::from_index(index as i8)
            }
        })
    }

    pub fn to_vec(self) -> Vec<Card> {
        self.iter().collect()
    }

    pub fn to_hand(self) -> Option<Hand> {
        if self.count() != 2 {
            return None;
        }
        let mut cards = self.iter();
        let a = cards.next()?;
        let b = cards.next()?;
        Hand::of_two_cards(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_counts_and_membership() {
        let cards: Cards = "AhKs7c".parse().unwrap();
        assert_eq!(cards.count(), 3);
        assert!(cards.has("Ah".parse().unwrap()));
        assert!(cards.has("Ks".parse().unwrap()));
        assert!(!cards.has("7d".parse().unwrap()));
    }

    #[test]
    fn parse_rejects_duplicates() {
        let err = "AhAh".parse::<Cards>().unwrap_err();
        assert_eq!(err, Error::DuplicateCard("Ah".parse().unwrap()));
    }

    #[test]
    fn from_slice_rejects_duplicates() {
        let ace: Card = "Ad".parse().unwrap();
        let king: Card = "Kd".parse().unwrap();
        assert!(Cards::from_slice(&[ace, king]).is_ok());
        let err = Cards::from_slice(&[ace, king, ace]).unwrap_err();
        assert_eq!(err, Error::DuplicateCard(ace));
    }

    #[test]
    fn iter_yields_every_added_card() {
        let cards: Cards = "2c2d2h2s".parse().unwrap();
        let collected = cards.to_vec();
        assert_eq!(collected.len(), 4);
        assert!(collected.iter().all(|card| card.rank().to_usize() == 0));
    }

    #[test]
    fn full_deck_matches_mask() {
        let all: Cards = Card::all().collect();
        assert_eq!(all.count() as usize, Card::COUNT);
        assert_eq!(all, Cards(Cards::MASK_FULL));
    }

    #[test]
    fn to_hand_requires_exactly_two_cards() {
        let two: Cards = "AhKs".parse().unwrap();
        let hand = two.to_hand().unwrap();
        assert_eq!(hand.to_string(), "AhKs");
        assert!("AhKs7c".parse::<Cards>().unwrap().to_hand().is_none());
    }
}
