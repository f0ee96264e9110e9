use serde::{Deserialize, Serialize};

use crate::cards::{Card, DECK_SIZE};
use crate::errors::StateError;

/// Betting street within one hand. The discard window covers Preflop and
/// Flop; see [`crate::rules::LegalActions`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    /// Ordinal 0..=3, used for normalized encoding.
    pub fn index(self) -> u8 {
        match self {
            Street::Preflop => 0,
            Street::Flop => 1,
            Street::Turn => 2,
            Street::River => 3,
        }
    }

    /// Maximum number of board cards revealed on this street.
    pub fn board_cards(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

/// Snapshot of the table as seen by the acting player at one decision point.
///
/// Constructed fresh from each turn notification and read-only afterwards;
/// the decision pipeline never mutates it. Chip amounts are in the match's
/// native units (blinds of 1/2, stacks around 100 in the reference rules).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current betting street
    pub street: Street,
    /// The acting player's two hole cards
    pub hole: [Card; 2],
    /// Community cards revealed so far (0-5)
    pub board: Vec<Card>,
    /// Total chips in the pot, both players' commitments included
    pub pot: u32,
    /// Chips required to match the outstanding bet (0 when checking is free)
    pub to_call: u32,
    /// Minimum legal raise increment
    pub min_raise: u32,
    /// Maximum raise increment permitted by the table rules
    pub max_raise: u32,
    /// The acting player's remaining stack
    pub stack: u32,
    /// Chips the acting player has committed this hand
    pub committed: u32,
    /// The opponent's remaining stack
    pub opponent_stack: u32,
    /// Chips the opponent has committed this hand
    pub opponent_committed: u32,
    /// Stable opponent identifier for profile lookups
    pub opponent_id: u32,
    /// Whether the acting player has already used the per-hand discard
    pub discard_used: bool,
    /// Whether the opponent is known to have discarded this hand
    pub opponent_discarded: bool,
}

impl GameState {
    /// Defensive validation: card identities must be unique across hole and
    /// board, and the board may not exceed what the street allows. An
    /// invalid snapshot routes the decision engine to its conservative
    /// fallback; it never panics the match.
    pub fn validate(&self) -> Result<(), StateError> {
        let max = self.street.board_cards();
        if self.board.len() > max {
            return Err(StateError::BoardOverflow {
                street: self.street.name(),
                got: self.board.len(),
                max,
            });
        }
        let mut seen = [false; DECK_SIZE];
        for &c in self.hole.iter().chain(self.board.iter()) {
            let i = c.index() as usize;
            if seen[i] {
                return Err(StateError::DuplicateCard(c));
            }
            seen[i] = true;
        }
        Ok(())
    }

    /// Fraction of the pot the caller must pay to continue:
    /// `to_call / (pot + to_call)`, 0 when checking is free.
    pub fn pot_odds(&self) -> f32 {
        if self.to_call == 0 {
            return 0.0;
        }
        self.to_call as f32 / (self.pot + self.to_call) as f32
    }

    /// Hole and board cards together, hole first.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut v = Vec::with_capacity(2 + self.board.len());
        v.extend_from_slice(&self.hole);
        v.extend_from_slice(&self.board);
        v
    }
}
