use solver_core::cards::Cards;
use solver_core::equity::{self, Equity};
use solver_core::eval;
use solver_core::hand::Hand;
use solver_core::range::RangeTable;
use solver_core::result::Result;
use solver_core::solver;

const INVALID_COMMAND_ERROR: &str = "Invalid command. See README for usage.";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<_> = std::env::args().collect();
    match args.get(1).map(|s| s.as_str()) {
        Some("evaluate") => evaluate(&args[2..]),
        Some("equity") => calculate_equity(&args[2..]),
        Some("hand-vs-hand") => hand_vs_hand(&args[2..]),
        Some("range") => range(&args[2..]),
        Some("pot-odds") => pot_odds(&args[2..]),
        Some("push-fold") => push_fold(&args[2..]),
        Some("bet-size") => bet_size(&args[2..]),
        _ => Err(INVALID_COMMAND_ERROR.into()),
    }
}

fn evaluate(args: &[String]) -> Result<()> {
    let [cards_raw] = args else {
        return Err(INVALID_COMMAND_ERROR.into());
    };
    let cards: Cards = cards_raw.parse()?;
    let score = eval::evaluate(&cards.to_vec())?;
    println!("hand: {cards}");
    println!("rank: {}", score.category());
    print!("kickers:");
    for rank in score.tiebreaks() {
        print!(" {rank}");
    }
    println!();
    Ok(())
}

fn parse_board(raw: &str) -> Result<Cards> {
    if raw == "-" {
        Ok(Cards::EMPTY)
    } else {
        raw.parse()
    }
}

fn calculate_equity(args: &[String]) -> Result<()> {
    let [rounds_raw, board_raw, hands_raw @ ..] = args else {
        return Err(INVALID_COMMAND_ERROR.into());
    };
    let rounds: u64 = rounds_raw.parse()?;
    let board = parse_board(board_raw)?;
    let hands = hands_raw
        .iter()
        .map(|raw_hand| raw_hand.parse())
        .collect::<Result<Vec<Hand>>>()?;
    let equities = Equity::simulate(&hands, board, Cards::EMPTY, rounds)?;
    for (i, equity) in equities.iter().enumerate() {
        println!("player {}: {}", i + 1, equity);
    }
    Ok(())
}

fn hand_vs_hand(args: &[String]) -> Result<()> {
    let [rounds_raw, board_raw, hand1_raw, hand2_raw] = args else {
        return Err(INVALID_COMMAND_ERROR.into());
    };
    let rounds: u64 = rounds_raw.parse()?;
    let board = parse_board(board_raw)?;
    let hand1: Hand = hand1_raw.parse()?;
    let hand2: Hand = hand2_raw.parse()?;
    let (equity1, equity2, tie) = equity::hand_vs_hand(hand1, hand2, board, rounds)?;
    println!("{hand1}: {equity1:.2}%");
    println!("{hand2}: {equity2:.2}%");
    println!("tie: {tie:.2}%");
    Ok(())
}

fn range(args: &[String]) -> Result<()> {
    let [range_raw] = args else {
        return Err(INVALID_COMMAND_ERROR.into());
    };
    let range = RangeTable::parse(range_raw)?;
    println!("range: {range}");
    println!("combos: {}", range.combo_count());
    for entry in range.entries() {
        let combos: Vec<_> = entry.combos().iter().map(Hand::to_string).collect();
        println!("  - {}: {}", entry, combos.join(" "));
    }
    Ok(())
}

fn pot_odds(args: &[String]) -> Result<()> {
    let [bet_raw, pot_raw] = args else {
        return Err(INVALID_COMMAND_ERROR.into());
    };
    let bet: f64 = bet_raw.parse()?;
    let pot: f64 = pot_raw.parse()?;
    println!("pot odds: {:.2}%", solver::pot_odds(bet, pot)?);
    println!(
        "minimum defense frequency: {:.2}%",
        solver::minimum_defense_frequency(bet, pot)?
    );
    Ok(())
}

fn push_fold(args: &[String]) -> Result<()> {
    let [stack_raw] = args else {
        return Err(INVALID_COMMAND_ERROR.into());
    };
    let stack: f64 = stack_raw.parse()?;
    let solution = solver::solve_push_fold(stack)?;
    println!("stack: {stack} bb");
    println!("push range: {}", solution.range);
    println!(
        "equity threshold: {:.1}%",
        solution.equity_threshold_percent
    );
    Ok(())
}

fn bet_size(args: &[String]) -> Result<()> {
    let [pot_raw] = args else {
        return Err(INVALID_COMMAND_ERROR.into());
    };
    let pot: f64 = pot_raw.parse()?;
    let bet = solver::optimal_bet_size(pot)?;
    println!("pot: {pot}");
    println!("recommended bet: {bet:.2}");
    Ok(())
}
