use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::cards::Cards;
use crate::rank::Rank;
use crate::result::{Error, Result};
use crate::suite::Suite;

/// A single playing card, packed as `suite * 16 + rank` so that a [`Cards`]
/// set can use the index as a bit position directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Card(i8);

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suite())
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.suite().cmp(&other.suite()))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Card {
    pub const MIN: Self = Self(0);

    pub const COUNT: usize = Suite::COUNT * Rank::COUNT;

    pub const fn of(rank: Rank, suite: Suite) -> Self {
        Self(suite.to_index() + rank.to_i8())
    }

    pub fn from_index(index: i8) -> Option<Self> {
        if !(0..64).contains(&index) {
            None
        } else if Cards::MASK_FULL & (1u64 << u64::try_from(index).unwrap()) == 0 {
            None
        } else {
            Some(Self(index))
        }
    }

    pub fn from_bytes(s: &[u8]) -> Result<Self> {
        match s {
            [rank_raw, suite_raw] => {
                let rank = Rank::from_ascii(*rank_raw)?;
                let suite = Suite::from_ascii(*suite_raw)?;
                Ok(Self::of(rank, suite))
            }
            _ => Err(Error::InvalidCard(format!(
                "'{}': expected a rank and a suite character",
                String::from_utf8_lossy(s)
            ))),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Suite::SUITES
            .iter()
            .flat_map(|suite| Rank::RANKS.iter().map(|rank| Self::of(*rank, *suite)))
    }

    pub fn rank(self) -> Rank {
        Rank::try_from(self.0 % 16).unwrap()
    }

    pub fn suite(self) -> Suite {
        Suite::try_from(self.0 / 16).unwrap()
    }

    pub fn to_index(self) -> i8 {
        self.0
    }

    pub fn to_index_u64(self) -> u64 {
        self.0 as u64
    }
}
