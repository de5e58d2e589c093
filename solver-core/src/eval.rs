use std::cmp::Ordering;
use std::fmt;

use crate::card::Card;
use crate::rank::Rank;
use crate::result::{Error, Result};

/// The nine hand categories, weakest first. A hand of a higher category
/// always beats every hand of a lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 1,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Total hand strength: the category plus the rank sequence that breaks
/// ties within it. The derived ordering is lexicographic, category first,
/// then the tie break ranks in order. Equal scores are exact ties.
///
/// The tie break tail is padded with a constant so hands of the same
/// category (which always have tie break sequences of equal length)
/// compare element-wise, and hands of different categories never reach
/// the padding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore {
    category: HandCategory,
    tiebreaks: [Rank; 5],
    tiebreak_len: u8,
}

impl HandScore {
    fn new(category: HandCategory, ranks: &[Rank]) -> Self {
        debug_assert!(!ranks.is_empty() && ranks.len() <= 5);
        let mut tiebreaks = [Rank::Two; 5];
        tiebreaks[..ranks.len()].copy_from_slice(ranks);
        Self {
            category,
            tiebreaks,
            tiebreak_len: ranks.len() as u8,
        }
    }

    pub fn category(self) -> HandCategory {
        self.category
    }

    pub fn tiebreaks(&self) -> &[Rank] {
        &self.tiebreaks[..usize::from(self.tiebreak_len)]
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.category)?;
        for rank in self.tiebreaks() {
            write!(f, "{rank}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

/// Evaluates 5 to 7 cards to the strength of their best five card poker
/// hand. Fails with [`Error::InvalidHandSize`] outside that size range.
pub fn evaluate(cards: &[Card]) -> Result<HandScore> {
    match cards.len() {
        5..=7 => Ok(best_score(cards)),
        n => Err(Error::InvalidHandSize(n)),
    }
}

/// Compares two hands of 5 to 7 cards each. `Ordering::Greater` means the
/// first hand wins, `Ordering::Equal` an exact tie. This is a direct
/// comparison of the [`evaluate`] scores, there is no second code path.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Result<Ordering> {
    Ok(evaluate(a)?.cmp(&evaluate(b)?))
}

/// Best score over every five card subset: C(6,5) = 6 or C(7,5) = 21
/// combinations. Brute force is fine at this size.
pub(crate) fn best_score(cards: &[Card]) -> HandScore {
    debug_assert!((5..=7).contains(&cards.len()));
    let n = cards.len();
    let mut best = score_five([cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let score =
                            score_five([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if score > best {
                            best = score;
                        }
                    }
                }
            }
        }
    }
    best
}

fn score_five(cards: [Card; 5]) -> HandScore {
    let mut ranks = cards.map(|card| card.rank());
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|card| card.suite() == cards[0].suite());
    let distinct = ranks.windows(2).all(|pair| pair[0] != pair[1]);
    let is_wheel = ranks == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    let is_straight = distinct && (ranks[0].to_i8() - ranks[4].to_i8() == 4 || is_wheel);
    // The wheel is the one straight where the ace plays low.
    let straight_high = if is_wheel { Rank::Five } else { ranks[0] };

    if is_straight && is_flush {
        return HandScore::new(HandCategory::StraightFlush, &[straight_high]);
    }

    // Rank groups, largest count first; equal counts stay rank descending
    // (stable sort), which is what orders two pair and kickers correctly.
    let mut groups = [(0u8, Rank::Two); 5];
    let mut group_len = 0;
    for index in (0..Rank::COUNT).rev() {
        let count = ranks.iter().filter(|rank| rank.to_usize() == index).count() as u8;
        if count != 0 {
            groups[group_len] = (count, Rank::RANKS[index]);
            group_len += 1;
        }
    }
    let groups = &mut groups[..group_len];
    groups.sort_by(|a, b| b.0.cmp(&a.0));

    if groups[0].0 == 4 {
        return HandScore::new(HandCategory::FourOfAKind, &[groups[0].1, groups[1].1]);
    }
    if groups[0].0 == 3 && groups[1].0 == 2 {
        return HandScore::new(HandCategory::FullHouse, &[groups[0].1, groups[1].1]);
    }
    if is_flush {
        return HandScore::new(HandCategory::Flush, &ranks);
    }
    if is_straight {
        return HandScore::new(HandCategory::Straight, &[straight_high]);
    }
    if groups[0].0 == 3 {
        return HandScore::new(
            HandCategory::ThreeOfAKind,
            &[groups[0].1, groups[1].1, groups[2].1],
        );
    }
    if groups[0].0 == 2 && groups[1].0 == 2 {
        return HandScore::new(
            HandCategory::TwoPair,
            &[groups[0].1, groups[1].1, groups[2].1],
        );
    }
    if groups[0].0 == 2 {
        return HandScore::new(
            HandCategory::Pair,
            &[groups[0].1, groups[1].1, groups[2].1, groups[3].1],
        );
    }
    HandScore::new(HandCategory::HighCard, &ranks)
}
