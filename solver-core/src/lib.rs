pub mod card;
pub mod cards;
pub mod deck;
pub mod equity;
pub mod eval;
pub mod hand;
pub mod range;
pub mod rank;
pub mod result;
pub mod solver;
pub mod suite;
