use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::state::{GameState, Street};

/// A betting action as emitted by the decision engine. Raise carries the
/// increment beyond the call amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u32),
}

/// Legal raise increments for the current betting context.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RaiseBounds {
    /// Smallest legal increment (an all-in short of the table minimum is
    /// still offered, in which case `min == max`)
    pub min: u32,
    /// Largest legal increment, capped by the player's stack beyond the call
    pub max: u32,
}

impl RaiseBounds {
    pub fn contains(&self, amount: u32) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// Clamp an arbitrary amount into the legal range.
    pub fn clamp(&self, amount: u32) -> u32 {
        amount.clamp(self.min, self.max)
    }
}

/// The set of actions currently legal, computed from the game rules and
/// betting context. This is a hard post-filter on whatever the policy model
/// scores: nothing outside this set may be selected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LegalActions {
    pub fold: bool,
    pub check: bool,
    pub call: bool,
    pub raise: Option<RaiseBounds>,
    /// Whether the one-per-hand discard of a hole card is currently offered
    pub discard: bool,
}

impl LegalActions {
    /// Derive the legal set from a snapshot. Check and call are mutually
    /// exclusive on `to_call`; raising requires chips beyond the call; the
    /// discard window is Preflop and Flop, once per hand. The result always
    /// contains fold or check, so the set is never empty.
    pub fn from_state(state: &GameState) -> Self {
        let check = state.to_call == 0;
        let call = state.to_call > 0;
        let beyond_call = state.stack.saturating_sub(state.to_call);
        let raise = if beyond_call > 0 && state.max_raise > 0 {
            let max = state.max_raise.min(beyond_call);
            let min = state.min_raise.min(max).max(1);
            Some(RaiseBounds { min, max })
        } else {
            None
        };
        let discard = !state.discard_used
            && matches!(state.street, Street::Preflop | Street::Flop);
        Self {
            fold: true,
            check,
            call,
            raise,
            discard,
        }
    }

    pub fn permits(&self, action: Action) -> bool {
        match action {
            Action::Fold => self.fold,
            Action::Check => self.check,
            Action::Call => self.call,
            Action::Raise(amount) => self.raise.is_some_and(|b| b.contains(amount)),
        }
    }
}

/// Final guard converting a chosen action into one the table will accept.
///
/// Enforces the minimum-raise rule and converts an over-stack raise into the
/// all-in increment rather than rejecting it.
///
/// # Errors
///
/// [`GameError::CheckFacingBet`] for a check with a bet outstanding,
/// [`GameError::InsufficientChips`] for a raise with no chips beyond the
/// call, [`GameError::InvalidRaiseAmount`] for a raise below the minimum
/// that is not an all-in.
///
/// ```
/// use ternion_engine::rules::{validate_action, Action};
///
/// // stack 80 cannot cover call 50 + raise 100: the raise becomes all-in
/// let v = validate_action(80, 50, 10, Action::Raise(100)).unwrap();
/// assert_eq!(v, Action::Raise(30));
/// ```
pub fn validate_action(
    stack: u32,
    to_call: u32,
    min_raise: u32,
    action: Action,
) -> Result<Action, GameError> {
    match action {
        Action::Fold => Ok(Action::Fold),
        Action::Check => {
            if to_call == 0 {
                Ok(Action::Check)
            } else {
                Err(GameError::CheckFacingBet)
            }
        }
        Action::Call => Ok(Action::Call),
        Action::Raise(amount) => {
            let beyond_call = stack.saturating_sub(to_call);
            if beyond_call == 0 {
                return Err(GameError::InsufficientChips);
            }
            if amount >= beyond_call {
                // all-in for whatever is left beyond the call
                return Ok(Action::Raise(beyond_call));
            }
            if amount < min_raise {
                return Err(GameError::InvalidRaiseAmount {
                    amount,
                    minimum: min_raise,
                });
            }
            Ok(Action::Raise(amount))
        }
    }
}
