use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::card::Card;
use crate::cards::Cards;
use crate::result::{Error, Result};

/// A two card holding, normalized so the stronger card comes first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct Hand(Card, Card);

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high(), self.low())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl FromStr for Hand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl Hand {
    pub fn of_two_cards(a: Card, b: Card) -> Option<Self> {
        match a.rank().cmp(&b.rank()) {
            Ordering::Less => Some(Self(b, a)),
            Ordering::Equal => match a.suite().cmp(&b.suite()) {
                Ordering::Less => Some(Self(b, a)),
                Ordering::Equal => None,
                Ordering::Greater => Some(Self(a, b)),
            },
            Ordering::Greater => Some(Self(a, b)),
        }
    }

    fn from_cards(cards: Cards) -> Result<Self> {
        if cards.count() != 2 {
            Err(Error::InvalidHandSize(usize::from(cards.count())))
        } else {
            // Unreachable: two distinct cards always form a hand.
            cards
                .to_hand()
                .ok_or_else(|| Error::InvalidHandSize(2))
        }
    }

    pub fn from_bytes(s: &[u8]) -> Result<Self> {
        Self::from_cards(Cards::from_bytes(s)?)
    }

    pub fn high(self) -> Card {
        self.0
    }

    pub fn low(self) -> Card {
        self.1
    }

    pub fn suited(self) -> bool {
        self.high().suite() == self.low().suite()
    }

    pub fn cmp_by_rank(self, other: Self) -> Ordering {
        self.high()
            .rank()
            .cmp(&other.high().rank())
            .then_with(|| self.low().rank().cmp(&other.low().rank()))
            .then_with(|| self.high().suite().cmp(&other.high().suite()))
            .then_with(|| self.low().suite().cmp(&other.low().suite()))
    }

    pub fn to_card_array(self) -> [Card; 2] {
        [self.high(), self.low()]
    }

    pub fn to_cards(self) -> Cards {
        Cards::EMPTY.with(self.high()).with(self.low())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_two_cards_normalizes_order() {
        let king: Card = "Kd".parse().unwrap();
        let ace: Card = "Ac".parse().unwrap();
        let hand = Hand::of_two_cards(king, ace).unwrap();
        assert_eq!(hand.high(), ace);
        assert_eq!(hand.low(), king);
        assert_eq!(hand, Hand::of_two_cards(ace, king).unwrap());
    }

    #[test]
    fn of_two_identical_cards_is_none() {
        let ace: Card = "Ac".parse().unwrap();
        assert!(Hand::of_two_cards(ace, ace).is_none());
    }

    #[test]
    fn parse_requires_exactly_two_cards() {
        let hand: Hand = "KsAh".parse().unwrap();
        assert_eq!(hand.to_string(), "AhKs");
        assert!(!hand.suited());
        assert!("Ah".parse::<Hand>().is_err());
        assert!("AhKsQd".parse::<Hand>().is_err());
        assert!("AhAh".parse::<Hand>().is_err());
    }

    #[test]
    fn serde_round_trip() {
        let hand: Hand = "AhKh".parse().unwrap();
        let encoded = serde_json::to_string(&hand).unwrap();
        assert_eq!(encoded, "\"AhKh\"");
        let decoded: Hand = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, hand);
    }
}
