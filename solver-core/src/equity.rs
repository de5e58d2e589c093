use std::fmt;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::card::Card;
use crate::cards::Cards;
use crate::deck::Deck;
use crate::eval::{self, HandScore};
use crate::hand::Hand;
use crate::result::{Error, Result};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;

fn try_u64_to_f64(n: u64) -> Option<f64> {
    const F64_MAX_SAFE_INT: u64 = 2 << 53;
    if (F64_MAX_SAFE_INT - 1) & n != n {
        None
    } else {
        Some(n as f64)
    }
}

/// Win and tie shares of a single hand, as fractions of the simulated
/// rounds. The tie share is already divided among the joint winners of
/// each round.
#[derive(Debug, Clone, Copy)]
pub struct Equity {
    win_percent: f64,
    tie_percent: f64,
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "equity={:2.2} win={:2.2} tie={:2.2}",
            self.equity_percent() * 100.0,
            self.win_percent() * 100.0,
            self.tie_percent() * 100.0,
        )
    }
}

impl Equity {
    pub fn simulate(
        hands: &[Hand],
        board: Cards,
        dead_cards: Cards,
        rounds: u64,
    ) -> Result<Vec<Equity>> {
        let mut rng = SmallRng::from_entropy();
        Self::simulate_with_rng(hands, board, dead_cards, rounds, &mut rng)
    }

    pub fn simulate_with_rng(
        hands: &[Hand],
        board: Cards,
        dead_cards: Cards,
        rounds: u64,
        rng: &mut impl Rng,
    ) -> Result<Vec<Equity>> {
        Ok(EquityResult::simulate(hands, board, dead_cards, rounds, rng)?.equities())
    }

    pub fn equity_percent(self) -> f64 {
        self.win_percent + self.tie_percent
    }

    pub fn win_percent(self) -> f64 {
        self.win_percent
    }

    pub fn tie_percent(self) -> f64 {
        self.tie_percent
    }
}

/// Raw outcome counters of a simulation run: per hand, the rounds it won
/// outright, the rounds it tied for the win, and the tie credit (the sum
/// of `1/k` over its tied rounds, k being the number of joint winners of
/// that round).
#[derive(Debug, Clone)]
pub struct EquityResult {
    rounds: u64,
    wins: Vec<u64>,
    ties: Vec<u64>,
    tie_credit: Vec<f64>,
}

impl EquityResult {
    /// Runs `rounds` Monte Carlo rounds. Every round completes the board
    /// to five cards from a deck that excludes all hand, board and dead
    /// cards, evaluates each hand's seven cards and credits the winner,
    /// or splits the tie credit among the joint winners of that round.
    ///
    /// All preconditions are checked before the first round: 2 to 9
    /// hands, at most 5 board cards, no card may appear twice across
    /// hands, board and dead cards, and `rounds` must be positive (a
    /// zero round simulation is rejected rather than reported as all
    /// zero equities).
    pub fn simulate(
        hands: &[Hand],
        board: Cards,
        dead_cards: Cards,
        rounds: u64,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let known_cards = validate(hands, board, dead_cards)?;
        if rounds == 0 {
            return Err("simulate: rounds must be positive".into());
        }
        debug!(
            "simulating {rounds} rounds: {} hands, board [{board}], {} dead cards",
            hands.len(),
            dead_cards.count(),
        );

        let board_len = usize::from(board.count());
        let mut board_cards = [Card::MIN; 5];
        for (slot, card) in board_cards.iter_mut().zip(board.iter()) {
            *slot = card;
        }

        let mut wins = vec![0u64; hands.len()];
        let mut ties = vec![0u64; hands.len()];
        let mut tie_credit = vec![0.0f64; hands.len()];
        let mut scores: Vec<HandScore> = Vec::with_capacity(hands.len());
        let mut deck = Deck::from_cards(rng, known_cards);

        for _ in 0..rounds {
            deck.reset();
            for slot in board_cards[board_len..].iter_mut() {
                *slot = deck.draw_result(rng)?;
            }
            let [b0, b1, b2, b3, b4] = board_cards;

            scores.clear();
            for hand in hands {
                let seven = [hand.high(), hand.low(), b0, b1, b2, b3, b4];
                scores.push(eval::best_score(&seven));
            }
            showdown(&scores, &mut wins, &mut ties, &mut tie_credit);
        }

        Ok(EquityResult {
            rounds,
            wins,
            ties,
            tie_credit,
        })
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn wins(&self) -> &[u64] {
        &self.wins
    }

    pub fn ties(&self) -> &[u64] {
        &self.ties
    }

    pub fn equities(&self) -> Vec<Equity> {
        assert_ne!(self.rounds, 0);
        let total = try_u64_to_f64(self.rounds).unwrap();
        self.wins
            .iter()
            .copied()
            .zip(self.tie_credit.iter().copied())
            .map(|(wins, tie_credit)| Equity {
                win_percent: try_u64_to_f64(wins).unwrap() / total,
                tie_percent: tie_credit / total,
            })
            .collect()
    }

    /// Equity per hand index, in percent. Sums to 100 up to floating
    /// point rounding.
    pub fn equity_percentages(&self) -> Vec<f64> {
        self.equities()
            .into_iter()
            .map(|equity| equity.equity_percent() * 100.0)
            .collect()
    }
}

fn validate(hands: &[Hand], board: Cards, dead_cards: Cards) -> Result<Cards> {
    if hands.len() < MIN_PLAYERS || hands.len() > MAX_PLAYERS {
        return Err(format!(
            "equity: expected {MIN_PLAYERS} to {MAX_PLAYERS} hands, got {}",
            hands.len()
        )
        .into());
    }
    if board.count() > 5 {
        return Err(Error::InvalidBoardSize(board.count()));
    }
    let mut known_cards = Cards::EMPTY;
    for hand in hands {
        for card in hand.to_card_array() {
            if !known_cards.try_add(card) {
                return Err(Error::DuplicateCard(card));
            }
        }
    }
    for card in board.iter().chain(dead_cards.iter()) {
        if !known_cards.try_add(card) {
            return Err(Error::DuplicateCard(card));
        }
    }
    Ok(known_cards)
}

fn showdown(scores: &[HandScore], wins: &mut [u64], ties: &mut [u64], tie_credit: &mut [f64]) {
    let max_score = scores.iter().copied().max().unwrap();
    let winners = scores
        .iter()
        .copied()
        .filter(|score| *score == max_score)
        .count();
    if winners == 1 {
        let winner_index = scores
            .iter()
            .position(|score| *score == max_score)
            .unwrap();
        wins[winner_index] += 1;
    } else {
        let share = 1.0 / try_u64_to_f64(u64::try_from(winners).unwrap()).unwrap();
        for (index, score) in scores.iter().copied().enumerate() {
            if score == max_score {
                ties[index] += 1;
                tie_credit[index] += share;
            }
        }
    }
}

/// Equity per hand index in percent, seeded from entropy. See
/// [`EquityResult::simulate`] for the preconditions.
pub fn calculate_equity(
    hands: &[Hand],
    board: Cards,
    dead_cards: Cards,
    rounds: u64,
) -> Result<Vec<f64>> {
    let mut rng = SmallRng::from_entropy();
    calculate_equity_with_rng(hands, board, dead_cards, rounds, &mut rng)
}

pub fn calculate_equity_with_rng(
    hands: &[Hand],
    board: Cards,
    dead_cards: Cards,
    rounds: u64,
    rng: &mut impl Rng,
) -> Result<Vec<f64>> {
    Ok(EquityResult::simulate(hands, board, dead_cards, rounds, rng)?.equity_percentages())
}

/// Two way convenience view: win percentages of both hands plus the
/// percentage of rounds that tied, from the same counters the general
/// calculation uses.
pub fn hand_vs_hand(
    hand1: Hand,
    hand2: Hand,
    board: Cards,
    rounds: u64,
) -> Result<(f64, f64, f64)> {
    let mut rng = SmallRng::from_entropy();
    hand_vs_hand_with_rng(hand1, hand2, board, rounds, &mut rng)
}

pub fn hand_vs_hand_with_rng(
    hand1: Hand,
    hand2: Hand,
    board: Cards,
    rounds: u64,
    rng: &mut impl Rng,
) -> Result<(f64, f64, f64)> {
    let result = EquityResult::simulate(&[hand1, hand2], board, Cards::EMPTY, rounds, rng)?;
    let total = try_u64_to_f64(result.rounds).unwrap();
    let win1 = try_u64_to_f64(result.wins[0]).unwrap() / total * 100.0;
    let win2 = try_u64_to_f64(result.wins[1]).unwrap() / total * 100.0;
    let tie = try_u64_to_f64(result.ties[0]).unwrap() / total * 100.0;
    Ok((win1, win2, tie))
}
