use thiserror::Error;

use crate::cards::Card;

/// Malformed input to the hand evaluator. Never expected in normal play;
/// the decision engine absorbs it into the fallback path rather than failing
/// the match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    #[error("hand needs at least 2 cards, got {got}")]
    TooFewCards { got: usize },
    #[error("hand holds at most 7 cards, got {got}")]
    TooManyCards { got: usize },
    #[error("duplicate card in hand: {0}")]
    DuplicateCard(Card),
}

/// A game-state snapshot that fails defensive validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("duplicate card in snapshot: {0}")]
    DuplicateCard(Card),
    #[error("board has {got} cards, {street} allows at most {max}")]
    BoardOverflow {
        street: &'static str,
        got: usize,
        max: usize,
    },
}

/// Violations of the betting rules when validating a chosen action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid raise amount: {amount}, minimum: {minimum}")]
    InvalidRaiseAmount { amount: u32, minimum: u32 },
    #[error("cannot check while facing a bet")]
    CheckFacingBet,
    #[error("insufficient chips for action")]
    InsufficientChips,
}
