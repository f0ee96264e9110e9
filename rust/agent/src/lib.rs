//! Real-time decision agent for three-suit discard hold'em.
//!
//! The agent turns [`GameState`](ternion_engine::state::GameState) snapshots
//! into legal actions under a match-wide wall-clock budget. A pluggable
//! [`PolicyModel`] proposes action probabilities; the engine masks them to
//! the legal set, applies the value-bet and bluff overrides, and races the
//! model against a per-decision deadline. When the model is late, degenerate,
//! or the budget is critical, a deterministic fallback rule answers instead,
//! so every decision point gets a legal action in time.
//!
//! ```
//! use std::sync::Arc;
//! use ternion_agent::{PolicyModel, PolicyOutput, Session};
//! use ternion_agent::config::AgentConfig;
//! use ternion_agent::encode::Features;
//! use ternion_engine::rules::LegalActions;
//!
//! struct Caller;
//!
//! impl PolicyModel for Caller {
//!     fn score(&self, _features: &Features, legal: &LegalActions) -> PolicyOutput {
//!         let mut probs = [0.0; 4];
//!         probs[if legal.call { PolicyOutput::CALL } else { PolicyOutput::CHECK }] = 1.0;
//!         PolicyOutput { action_probs: probs, raise_fraction: 0.0, discard_score: 0.0 }
//!     }
//! }
//!
//! let session = Session::new(AgentConfig::default(), Arc::new(Caller));
//! assert!(!session.budget().is_critical());
//! ```

pub mod clock;
pub mod config;
pub mod decide;
pub mod discard;
pub mod encode;
pub mod opponent;
pub mod record;
pub mod strength;

use std::sync::Arc;

use ternion_engine::state::GameState;

use crate::clock::TimeBudget;
use crate::config::AgentConfig;
use crate::decide::{ActionDecision, DecisionEngine};
use crate::encode::Features;
use crate::opponent::{ObservedAction, OpponentModel};
use crate::record::{DecisionLogger, DecisionRecord};
use ternion_engine::rules::LegalActions;

/// What a policy model returns for one encoded state.
#[derive(Debug, Clone)]
pub struct PolicyOutput {
    /// Unnormalized probabilities indexed by the `FOLD`..`RAISE` constants
    pub action_probs: [f32; 4],
    /// Raise sizing on [0, 1], interpolated across the legal raise bounds
    pub raise_fraction: f32,
    /// Inclination to take the discard option, compared to the threshold
    pub discard_score: f32,
}

impl PolicyOutput {
    pub const FOLD: usize = 0;
    pub const CHECK: usize = 1;
    pub const CALL: usize = 2;
    pub const RAISE: usize = 3;
}

/// A scoring backend. Implementations must tolerate being raced against a
/// deadline: a call whose result arrives late is discarded, never retried.
pub trait PolicyModel: Send + Sync {
    fn score(&self, features: &Features, legal: &LegalActions) -> PolicyOutput;

    fn name(&self) -> &str {
        "policy"
    }
}

/// One match from the agent's side: the decision engine, the opponent
/// statistics, and the clock, constructed together at match start and
/// dropped together at match end.
pub struct Session {
    engine: DecisionEngine,
    opponents: OpponentModel,
    budget: TimeBudget,
    logger: Option<DecisionLogger>,
    hand_no: u64,
}

impl Session {
    pub fn new(config: AgentConfig, model: Arc<dyn PolicyModel>) -> Self {
        let budget = TimeBudget::from_config(&config);
        let opponents = OpponentModel::new(config.opponent_decay);
        Self {
            engine: DecisionEngine::new(config, model),
            opponents,
            budget,
            logger: None,
            hand_no: 0,
        }
    }

    /// Attach a JSONL decision log; every decision from here on is recorded.
    pub fn with_logger(mut self, logger: DecisionLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn start_hand(&mut self) {
        self.hand_no += 1;
    }

    /// Decide the action for the current state, debiting the match budget.
    pub fn decide(&mut self, state: &GameState) -> ActionDecision {
        let aggression = self.opponents.aggression(state.opponent_id);
        let fold_frequency = self.opponents.fold_frequency(state.opponent_id);
        let decision = self
            .engine
            .decide(state, &mut self.budget, aggression, fold_frequency);

        if let Some(logger) = &mut self.logger {
            let record = DecisionRecord::new(
                self.hand_no,
                state.street,
                state.pot,
                state.to_call,
                aggression,
                &decision,
                self.budget.remaining(),
            );
            if let Err(err) = logger.log(&record) {
                tracing::warn!(%err, "decision log write failed");
            }
        }
        decision
    }

    /// Feed a realized opponent action into the per-opponent statistics.
    pub fn observe_opponent(&mut self, opponent_id: u32, action: ObservedAction) {
        self.opponents.observe(opponent_id, action);
    }

    pub fn budget(&self) -> &TimeBudget {
        &self.budget
    }

    pub fn opponents(&self) -> &OpponentModel {
        &self.opponents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ternion_engine::cards::{Card, Rank, Suit};
    use ternion_engine::rules::Action;
    use ternion_engine::state::Street;

    struct Checker;

    impl PolicyModel for Checker {
        fn score(&self, _features: &Features, legal: &LegalActions) -> PolicyOutput {
            let mut probs = [0.0; 4];
            probs[if legal.check {
                PolicyOutput::CHECK
            } else {
                PolicyOutput::CALL
            }] = 1.0;
            PolicyOutput {
                action_probs: probs,
                raise_fraction: 0.0,
                discard_score: 0.0,
            }
        }
    }

    fn state() -> GameState {
        GameState {
            street: Street::Preflop,
            hole: [
                Card {
                    suit: Suit::Spades,
                    rank: Rank::Ace,
                },
                Card {
                    suit: Suit::Hearts,
                    rank: Rank::Ace,
                },
            ],
            board: vec![],
            pot: 30,
            to_call: 0,
            min_raise: 10,
            max_raise: 100,
            stack: 200,
            committed: 15,
            opponent_stack: 200,
            opponent_committed: 15,
            opponent_id: 1,
            discard_used: false,
            opponent_discarded: false,
        }
    }

    #[test]
    fn session_decides_and_debits_the_budget() {
        let cfg = AgentConfig {
            rng_seed: Some(3),
            ..AgentConfig::default()
        };
        let mut session = Session::new(cfg, Arc::new(Checker));
        let before = session.budget().decisions_left();
        let d = session.decide(&state());
        assert_eq!(d.action, Action::Check);
        assert_eq!(session.budget().decisions_left(), before - 1);
    }

    #[test]
    fn session_tracks_opponents_across_decisions() {
        let mut session = Session::new(AgentConfig::default(), Arc::new(Checker));
        for _ in 0..20 {
            session.observe_opponent(1, ObservedAction::Raise);
        }
        assert!(session.opponents().aggression(1) > 0.9);
        assert_eq!(session.opponents().aggression(2), 0.5);
    }

    #[test]
    fn session_logs_decisions_when_a_logger_is_attached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.jsonl");
        let cfg = AgentConfig {
            rng_seed: Some(3),
            ..AgentConfig::default()
        };
        let mut session = Session::new(cfg, Arc::new(Checker))
            .with_logger(DecisionLogger::create(&path).unwrap());
        session.start_hand();
        session.decide(&state());
        session.decide(&state());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
