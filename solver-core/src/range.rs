use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::card::Card;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::result::{Error, Result};
use crate::suite::Suite;

/// One cell of a range chart: a pair (`88`), a suited combo (`AKs`) or
/// an offsuit combo (`AKo`).
#[derive(Clone, Copy, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct RangeEntry {
    high: Rank,
    low: Rank,
    suited: bool,
}

impl fmt::Display for RangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)?;
        if self.high == self.low {
            Ok(())
        } else if self.suited {
            write!(f, "s")
        } else {
            write!(f, "o")
        }
    }
}

impl fmt::Debug for RangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl FromStr for RangeEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl RangeEntry {
    pub fn new(high: Rank, low: Rank, suited: bool) -> Option<Self> {
        if high < low || (high == low && suited) {
            return None;
        }
        Some(Self { high, low, suited })
    }

    pub fn paired(rank: Rank) -> Self {
        Self {
            high: rank,
            low: rank,
            suited: false,
        }
    }

    pub fn from_hand(hand: Hand) -> Self {
        RangeEntry {
            high: hand.high().rank(),
            low: hand.low().rank(),
            suited: hand.suited(),
        }
    }

    pub fn from_bytes(b: &[u8]) -> Result<Self> {
        let (high, low, suited) = match b {
            [high, low] if *high == *low => (*high, *low, false),
            [high, low, b's' | b'S'] if *high != *low => (*high, *low, true),
            [high, low, b'o' | b'O'] if *high != *low => (*high, *low, false),
            _ => {
                return Err(format!(
                    "range entry '{}': invalid format",
                    String::from_utf8_lossy(b)
                )
                .into())
            }
        };
        let high = Rank::from_ascii(high)?;
        let low = Rank::from_ascii(low)?;
        Self::new(high, low, suited).ok_or_else(|| {
            format!(
                "range entry '{}': ranks out of order",
                String::from_utf8_lossy(b)
            )
            .into()
        })
    }

    pub fn high(self) -> Rank {
        self.high
    }

    pub fn low(self) -> Rank {
        self.low
    }

    pub fn suited(self) -> bool {
        self.suited
    }

    pub fn is_pair(self) -> bool {
        self.high == self.low
    }

    /// Concrete combinations: 6 for a pair, 4 suited, 12 offsuit.
    pub fn combo_count(self) -> u32 {
        if self.is_pair() {
            6
        } else if self.suited {
            4
        } else {
            12
        }
    }

    pub fn combos(self) -> Vec<Hand> {
        let mut hands = Vec::with_capacity(self.combo_count() as usize);
        if self.is_pair() {
            for (index, a) in Suite::SUITES.iter().enumerate() {
                for b in &Suite::SUITES[index + 1..] {
                    let high = Card::of(self.high, *a);
                    let low = Card::of(self.low, *b);
                    if let Some(hand) = Hand::of_two_cards(high, low) {
                        hands.push(hand);
                    }
                }
            }
        } else {
            for a in Suite::SUITES {
                for b in Suite::SUITES {
                    if self.suited != (a == b) {
                        continue;
                    }
                    let high = Card::of(self.high, a);
                    let low = Card::of(self.low, b);
                    if let Some(hand) = Hand::of_two_cards(high, low) {
                        hands.push(hand);
                    }
                }
            }
        }
        hands
    }
}

/// A 13 by 13 range chart. Pairs sit on the diagonal, suited combos below
/// it (row = high rank), offsuit combos above it.
#[derive(Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct RangeTable {
    table: [[bool; Rank::COUNT]; Rank::COUNT],
}

impl Default for RangeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RangeTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RangeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in self.entries() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{entry}")?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for RangeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl RangeTable {
    pub fn new() -> Self {
        Self {
            table: [[false; Rank::COUNT]; Rank::COUNT],
        }
    }

    /// Parses a comma separated range string. Entries are pairs (`AA`),
    /// suited (`AKs`) or offsuit (`AKo`) combos, a bare two rank entry
    /// (`AK`) meaning both, or any of those with a trailing `+` ladder:
    /// `88+` runs the pairs up to aces, `A9s+` runs the low rank up to
    /// one below the high rank. Empty entries are skipped.
    pub fn parse(s: &str) -> Result<Self> {
        let mut range = Self::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            range.parse_token(part)?;
        }
        Ok(range)
    }

    fn parse_token(&mut self, token: &str) -> Result<()> {
        let (base, plus) = match token.strip_suffix('+') {
            Some(base) => (base, true),
            None => (token, false),
        };
        match base.as_bytes() {
            [high, low] if *high != *low => {
                // Bare two rank entry covers suited and offsuit.
                self.parse_entry(RangeEntry::from_bytes(&[*high, *low, b's'])?, plus)?;
                self.parse_entry(RangeEntry::from_bytes(&[*high, *low, b'o'])?, plus)?;
                Ok(())
            }
            _ => self.parse_entry(RangeEntry::from_bytes(base.as_bytes())?, plus),
        }
    }

    fn parse_entry(&mut self, entry: RangeEntry, plus: bool) -> Result<()> {
        if !plus {
            self.add(entry);
            return Ok(());
        }
        if entry.is_pair() {
            for index in entry.high().to_usize()..Rank::COUNT {
                self.add(RangeEntry::paired(Rank::RANKS[index]));
            }
        } else {
            for index in entry.low().to_usize()..entry.high().to_usize() {
                // The low rank ladders up to one below the high rank.
                let laddered = RangeEntry::new(entry.high(), Rank::RANKS[index], entry.suited());
                match laddered {
                    Some(laddered) => self.add(laddered),
                    None => return Err(format!("range entry '{entry}+': invalid ladder").into()),
                }
            }
        }
        Ok(())
    }

    fn cell(entry: RangeEntry) -> (usize, usize) {
        if entry.suited() {
            (entry.high().to_usize(), entry.low().to_usize())
        } else {
            (entry.low().to_usize(), entry.high().to_usize())
        }
    }

    pub fn add(&mut self, entry: RangeEntry) {
        let (row, column) = Self::cell(entry);
        self.table[row][column] = true;
    }

    pub fn remove(&mut self, entry: RangeEntry) {
        let (row, column) = Self::cell(entry);
        self.table[row][column] = false;
    }

    pub fn contains(&self, entry: RangeEntry) -> bool {
        let (row, column) = Self::cell(entry);
        self.table[row][column]
    }

    pub fn is_empty(&self) -> bool {
        self.table.iter().all(|row| row.iter().all(|set| !set))
    }

    /// Entries from strongest high rank down: the pair first, then suited
    /// combos, then offsuit combos, each by descending low rank.
    pub fn entries(&self) -> impl Iterator<Item = RangeEntry> + '_ {
        let highs = (0..Rank::COUNT).rev().map(|index| Rank::RANKS[index]);
        highs.flat_map(move |high| {
            let pair = RangeEntry::paired(high);
            let lows = (0..high.to_usize()).rev().map(|index| Rank::RANKS[index]);
            std::iter::once(pair)
                .chain(lows.clone().filter_map(move |low| RangeEntry::new(high, low, true)))
                .chain(lows.filter_map(move |low| RangeEntry::new(high, low, false)))
                .filter(move |entry| self.contains(*entry))
        })
    }

    pub fn hands(&self) -> impl Iterator<Item = Hand> + '_ {
        self.entries().flat_map(|entry| entry.combos())
    }

    pub fn combo_count(&self) -> u32 {
        self.entries().map(|entry| entry.combo_count()).sum()
    }

    /// The preset top percentage tiers used by the push/fold solver.
    pub fn from_percentage(percentage: f64) -> Result<Self> {
        if !percentage.is_finite() || percentage < 0.0 {
            return Err("range percentage must be a non-negative number".into());
        }
        let range = if percentage >= 100.0 {
            "22+,AKs,AKo"
        } else if percentage >= 20.0 {
            "99+,AKs,AKo,AQs,AQo"
        } else if percentage >= 10.0 {
            "JJ+,AKs,AKo"
        } else {
            "QQ+"
        };
        Self::parse(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(s: &str) -> RangeEntry {
        s.parse().unwrap()
    }

    #[test]
    fn parse_single_entries() {
        let range = RangeTable::parse("AA,KQs,T9o").unwrap();
        assert!(range.contains(entry("AA")));
        assert!(range.contains(entry("KQs")));
        assert!(range.contains(entry("T9o")));
        assert!(!range.contains(entry("KQo")));
        assert!(!range.contains(entry("KK")));
    }

    #[test]
    fn parse_pair_ladder() {
        let range = RangeTable::parse("88+").unwrap();
        for pair in ["88", "99", "TT", "JJ", "QQ", "KK", "AA"] {
            assert!(range.contains(entry(pair)), "missing {pair}");
        }
        assert!(!range.contains(entry("77")));
        assert_eq!(range.combo_count(), 7 * 6);
    }

    #[test]
    fn parse_suited_ladder() {
        let range = RangeTable::parse("A9s+").unwrap();
        for suited in ["A9s", "ATs", "AJs", "AQs", "AKs"] {
            assert!(range.contains(entry(suited)), "missing {suited}");
        }
        assert!(!range.contains(entry("A8s")));
        assert!(!range.contains(entry("A9o")));
    }

    #[test]
    fn bare_entry_covers_both() {
        let range = RangeTable::parse("AK").unwrap();
        assert!(range.contains(entry("AKs")));
        assert!(range.contains(entry("AKo")));
        assert_eq!(range.combo_count(), 16);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(RangeTable::parse("AKx").is_err());
        assert!(RangeTable::parse("KAs").is_err());
        assert!(RangeTable::parse("AAs").is_err());
        assert!(RangeTable::parse("A").is_err());
    }

    #[test]
    fn empty_string_is_an_empty_range() {
        let range = RangeTable::parse("").unwrap();
        assert!(range.is_empty());
        assert_eq!(range.combo_count(), 0);
    }

    #[test]
    fn display_round_trips() {
        let range = RangeTable::parse("KK,AKo,T9s,AA,QQ,AKs").unwrap();
        // Display is canonical: high rank first, pair, suited, offsuit.
        assert_eq!(range.to_string(), "AA,AKs,AKo,KK,QQ,T9s");
        assert_eq!(RangeTable::parse(&range.to_string()).unwrap(), range);
    }

    #[test]
    fn combos_expand_per_entry() {
        assert_eq!(entry("AA").combos().len(), 6);
        assert_eq!(entry("AKs").combos().len(), 4);
        assert_eq!(entry("AKo").combos().len(), 12);

        for hand in entry("AKs").combos() {
            assert!(hand.suited());
            assert_eq!(hand.high().rank(), Rank::Ace);
            assert_eq!(hand.low().rank(), Rank::King);
        }
    }

    #[test]
    fn hands_are_distinct() {
        let range = RangeTable::parse("22+,A2s+,A2o+,KQ").unwrap();
        let hands: Vec<_> = range.hands().collect();
        assert_eq!(hands.len() as u32, range.combo_count());
        let cards_sets: std::collections::HashSet<_> = hands.iter().copied().collect();
        assert_eq!(cards_sets.len(), hands.len());
    }

    #[test]
    fn from_percentage_tiers() {
        assert!(RangeTable::from_percentage(5.0).unwrap().contains(entry("QQ")));
        assert!(!RangeTable::from_percentage(5.0).unwrap().contains(entry("JJ")));
        assert!(RangeTable::from_percentage(15.0).unwrap().contains(entry("JJ")));
        assert!(RangeTable::from_percentage(25.0).unwrap().contains(entry("99")));
        assert!(RangeTable::from_percentage(100.0).unwrap().contains(entry("22")));
        assert!(RangeTable::from_percentage(-1.0).is_err());
    }
}
