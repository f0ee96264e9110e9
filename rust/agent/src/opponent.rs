use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const NEUTRAL_AGGRESSION: f32 = 0.5;
const EPSILON: f32 = 1e-6;

/// An opponent action as reported by the match transport after it was
/// realized. Raise covers bets and raises alike.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ObservedAction {
    Fold,
    Check,
    Call,
    Raise,
}

/// Exponentially decayed action weights for one opponent. Each observation
/// multiplies every weight by the decay factor before crediting the realized
/// action, so recent behavior dominates stale behavior.
#[derive(Debug, Clone, Default)]
pub struct OpponentProfile {
    fold_w: f32,
    check_w: f32,
    call_w: f32,
    raise_w: f32,
}

impl OpponentProfile {
    fn observe(&mut self, action: ObservedAction, decay: f32) {
        self.fold_w *= decay;
        self.check_w *= decay;
        self.call_w *= decay;
        self.raise_w *= decay;
        match action {
            ObservedAction::Fold => self.fold_w += 1.0,
            ObservedAction::Check => self.check_w += 1.0,
            ObservedAction::Call => self.call_w += 1.0,
            ObservedAction::Raise => self.raise_w += 1.0,
        }
    }

    /// Raise weight relative to all betting responses (fold + call + raise).
    /// Trends toward 1 under constant raising and 0 under constant folding.
    fn aggression(&self) -> f32 {
        let total = self.fold_w + self.call_w + self.raise_w;
        if total < EPSILON {
            return NEUTRAL_AGGRESSION;
        }
        self.raise_w / total
    }

    fn fold_frequency(&self) -> f32 {
        let total = self.fold_w + self.check_w + self.call_w + self.raise_w;
        if total < EPSILON {
            return 0.0;
        }
        self.fold_w / total
    }
}

/// Per-opponent running statistics for one match. Keyed by opponent id,
/// mutated only by the single decision thread, and dropped with the match;
/// a new match constructs a fresh model so nothing leaks across matches.
#[derive(Debug, Clone)]
pub struct OpponentModel {
    decay: f32,
    profiles: HashMap<u32, OpponentProfile>,
}

impl OpponentModel {
    pub fn new(decay: f32) -> Self {
        Self {
            decay,
            profiles: HashMap::new(),
        }
    }

    /// Record a realized opponent action.
    pub fn observe(&mut self, opponent_id: u32, action: ObservedAction) {
        self.profiles
            .entry(opponent_id)
            .or_default()
            .observe(action, self.decay);
        tracing::debug!(opponent_id, ?action, "opponent action observed");
    }

    /// Current aggression estimate; 0.5 neutral before any observation.
    ///
    /// ```
    /// use ternion_agent::opponent::OpponentModel;
    /// let model = OpponentModel::new(0.9);
    /// assert_eq!(model.aggression(7), 0.5);
    /// ```
    pub fn aggression(&self, opponent_id: u32) -> f32 {
        self.profiles
            .get(&opponent_id)
            .map_or(NEUTRAL_AGGRESSION, OpponentProfile::aggression)
    }

    /// Share of observed actions that were folds; 0.0 before any observation.
    pub fn fold_frequency(&self, opponent_id: u32) -> f32 {
        self.profiles
            .get(&opponent_id)
            .map_or(0.0, OpponentProfile::fold_frequency)
    }
}
