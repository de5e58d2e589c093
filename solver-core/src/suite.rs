use std::fmt;

use crate::result::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Suite {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suite {
    pub const COUNT: usize = 4;

    pub const SUITES: [Suite; Suite::COUNT] =
        [Suite::Clubs, Suite::Diamonds, Suite::Hearts, Suite::Spades];

    pub fn from_ascii(c: u8) -> Result<Self> {
        let suite = match c.to_ascii_lowercase() {
            b'c' => Suite::Clubs,
            b'd' => Suite::Diamonds,
            b'h' => Suite::Hearts,
            b's' => Suite::Spades,
            _ => {
                return Err(Error::InvalidCard(format!(
                    "unknown suite character '{}'",
                    char::from(c)
                )))
            }
        };
        Ok(suite)
    }

    pub fn to_ascii(self) -> u8 {
        b"cdhs"[self.to_usize()]
    }

    // Card packs a suite into the upper nibble of its index.
    pub(crate) const fn to_index(self) -> i8 {
        (self as i8) * 16
    }

    pub const fn to_usize(self) -> usize {
        self as usize
    }
}

impl TryFrom<i8> for Suite {
    type Error = Error;

    fn try_from(n: i8) -> Result<Self> {
        usize::try_from(n)
            .ok()
            .and_then(|index| Suite::SUITES.get(index).copied())
            .ok_or_else(|| Error::InvalidCard(format!("suite index {n} out of range")))
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.to_ascii()))
    }
}
