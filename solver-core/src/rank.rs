use std::fmt;

use crate::result::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const COUNT: usize = 13;

    pub const RANKS: [Rank; Rank::COUNT] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn from_ascii(c: u8) -> Result<Self> {
        let rank = match c.to_ascii_uppercase() {
            b'2' => Rank::Two,
            b'3' => Rank::Three,
            b'4' => Rank::Four,
            b'5' => Rank::Five,
            b'6' => Rank::Six,
            b'7' => Rank::Seven,
            b'8' => Rank::Eight,
            b'9' => Rank::Nine,
            b'T' => Rank::Ten,
            b'J' => Rank::Jack,
            b'Q' => Rank::Queen,
            b'K' => Rank::King,
            b'A' => Rank::Ace,
            _ => {
                return Err(Error::InvalidCard(format!(
                    "unknown rank character '{}'",
                    char::from(c)
                )))
            }
        };
        Ok(rank)
    }

    pub fn to_ascii(self) -> u8 {
        b"23456789TJQKA"[self.to_usize()]
    }

    pub const fn to_i8(self) -> i8 {
        self as i8
    }

    pub const fn to_usize(self) -> usize {
        self as usize
    }
}

impl TryFrom<i8> for Rank {
    type Error = Error;

    fn try_from(n: i8) -> Result<Self> {
        usize::try_from(n)
            .ok()
            .and_then(|index| Rank::RANKS.get(index).copied())
            .ok_or_else(|| Error::InvalidCard(format!("rank index {n} out of range")))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.to_ascii()))
    }
}
