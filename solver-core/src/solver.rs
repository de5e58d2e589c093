//! Closed-form betting math: pot odds, defense frequencies, sizing and
//! expected value. These are static formulas, not an equilibrium solver.

use std::fmt;

use crate::range::RangeTable;
use crate::result::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Call,
    Raise,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Fold => "fold",
            Action::Call => "call",
            Action::Raise => "raise",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct PushFoldSolution {
    pub range: RangeTable,
    pub equity_threshold_percent: f64,
}

fn check_amount(name: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        Err(format!("{name} must be a non-negative number").into())
    } else {
        Ok(())
    }
}

/// The share of the pot a caller pays: `bet / (pot + bet)`, in percent.
/// A call needs at least this much equity to break even.
pub fn pot_odds(bet_size: f64, pot_size: f64) -> Result<f64> {
    check_amount("bet size", bet_size)?;
    check_amount("pot size", pot_size)?;
    if bet_size + pot_size == 0.0 {
        return Err("pot odds: pot and bet cannot both be zero".into());
    }
    Ok(bet_size / (pot_size + bet_size) * 100.0)
}

/// How often the defender must continue so the bettor cannot profit with
/// any two cards: `pot / (pot + bet)`, in percent.
pub fn minimum_defense_frequency(bet_size: f64, pot_size: f64) -> Result<f64> {
    check_amount("bet size", bet_size)?;
    check_amount("pot size", pot_size)?;
    if bet_size + pot_size == 0.0 {
        return Err("minimum defense frequency: pot and bet cannot both be zero".into());
    }
    Ok(pot_size / (pot_size + bet_size) * 100.0)
}

/// A balanced default sizing of two thirds pot.
pub fn optimal_bet_size(pot_size: f64) -> Result<f64> {
    check_amount("pot size", pot_size)?;
    Ok(pot_size * 0.67)
}

/// Expected value of an action given our equity and how often the
/// opponent folds to a raise. Folding is always worth exactly zero.
pub fn expected_value(
    action: Action,
    equity_percent: f64,
    pot_size: f64,
    bet_size: f64,
    fold_equity_percent: f64,
) -> Result<f64> {
    check_amount("pot size", pot_size)?;
    check_amount("bet size", bet_size)?;
    check_amount("equity", equity_percent)?;
    check_amount("fold equity", fold_equity_percent)?;
    let equity = equity_percent / 100.0;
    let fold_equity = fold_equity_percent / 100.0;
    let value = match action {
        Action::Fold => 0.0,
        Action::Call => equity * (pot_size + bet_size) - bet_size,
        Action::Raise => {
            let fold_value = fold_equity * pot_size;
            let call_value =
                (1.0 - fold_equity) * (equity * (pot_size + 2.0 * bet_size) - bet_size);
            fold_value + call_value
        }
    };
    Ok(value)
}

/// Tiered push/fold preset: the shorter the stack, the wider the shove
/// range and the lower the equity a call needs.
pub fn solve_push_fold(stack_size_bb: f64) -> Result<PushFoldSolution> {
    check_amount("stack size", stack_size_bb)?;
    let (percentage, equity_threshold_percent) = if stack_size_bb <= 10.0 {
        (30.0, 35.0)
    } else if stack_size_bb <= 20.0 {
        (20.0, 40.0)
    } else {
        (10.0, 45.0)
    };
    Ok(PushFoldSolution {
        range: RangeTable::from_percentage(percentage)?,
        equity_threshold_percent,
    })
}

/// Raise when bluffing shows a profit against this opponent's fold
/// frequency, otherwise give up.
pub fn exploit_action(
    opponent_fold_percent: f64,
    equity_percent: f64,
    pot_size: f64,
    bet_size: f64,
) -> Result<Action> {
    let bluff_value = expected_value(
        Action::Raise,
        equity_percent,
        pot_size,
        bet_size,
        opponent_fold_percent,
    )?;
    if bluff_value > 0.0 {
        Ok(Action::Raise)
    } else {
        Ok(Action::Fold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pot_odds_of_a_half_pot_bet() {
        let odds = pot_odds(10.0, 20.0).unwrap();
        assert!((odds - 33.333333).abs() < 1e-4);
        assert!(pot_odds(0.0, 0.0).is_err());
        assert!(pot_odds(-1.0, 20.0).is_err());
        assert!(pot_odds(f64::NAN, 20.0).is_err());
    }

    #[test]
    fn mdf_complements_pot_odds() {
        let odds = pot_odds(10.0, 20.0).unwrap();
        let mdf = minimum_defense_frequency(10.0, 20.0).unwrap();
        assert!((odds + mdf - 100.0).abs() < 1e-9);
        assert!((mdf - 66.666666).abs() < 1e-4);
    }

    #[test]
    fn default_sizing_is_two_thirds_pot() {
        assert_eq!(optimal_bet_size(100.0).unwrap(), 67.0);
        assert!(optimal_bet_size(-5.0).is_err());
    }

    #[test]
    fn call_value_needs_pot_odds_equity() {
        // Exactly break even at the pot odds equity.
        let odds = pot_odds(10.0, 20.0).unwrap();
        let value = expected_value(Action::Call, odds, 20.0, 10.0, 0.0).unwrap();
        assert!(value.abs() < 1e-9);
        // More equity, positive value; folding is always zero.
        assert!(expected_value(Action::Call, 50.0, 20.0, 10.0, 0.0).unwrap() > 0.0);
        assert_eq!(expected_value(Action::Fold, 50.0, 20.0, 10.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn raise_value_includes_fold_equity() {
        // With no equity when called, the raise value is pure fold equity
        // minus the lost bet when called.
        let value = expected_value(Action::Raise, 0.0, 20.0, 10.0, 50.0).unwrap();
        assert!((value - (10.0 - 5.0)).abs() < 1e-9);
    }

    #[test]
    fn push_fold_tiers_widen_with_shorter_stacks() {
        let short = solve_push_fold(8.0).unwrap();
        let mid = solve_push_fold(15.0).unwrap();
        let deep = solve_push_fold(40.0).unwrap();
        assert!(short.range.combo_count() >= mid.range.combo_count());
        assert!(mid.range.combo_count() > deep.range.combo_count());
        assert!(short.equity_threshold_percent < mid.equity_threshold_percent);
        assert!(mid.equity_threshold_percent < deep.equity_threshold_percent);
    }

    #[test]
    fn exploit_rule_attacks_frequent_folders() {
        assert_eq!(
            exploit_action(80.0, 10.0, 20.0, 10.0).unwrap(),
            Action::Raise
        );
        assert_eq!(exploit_action(0.0, 10.0, 20.0, 10.0).unwrap(), Action::Fold);
    }
}
