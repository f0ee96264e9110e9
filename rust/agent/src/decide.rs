use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use ternion_engine::hand::evaluate_hand;
use ternion_engine::rules::{Action, LegalActions};
use ternion_engine::state::{GameState, Street};

use crate::clock::TimeBudget;
use crate::config::AgentConfig;
use crate::discard::choose_discard;
use crate::encode::{Features, encode};
use crate::strength::preflop_strength;
use crate::{PolicyModel, PolicyOutput};

/// Policy confidence below which a strong hand is steered toward a value
/// raise instead of the model's argmax.
const LOW_CONFIDENCE: f32 = 0.40;
/// Hand strength below which the bluff gate may fire.
const BLUFF_STRENGTH_CAP: f32 = 0.35;
const EPSILON: f32 = 1e-6;

/// Why a decision bypassed the model and took the fallback rule.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Match budget is inside the critical reserve
    BudgetExhausted,
    /// The per-decision slice ran out before scoring started
    DeadlineExpired,
    /// Model scoring did not return before the slice deadline
    ScoringTimeout,
    /// Model output was non-finite or put no mass on any legal action
    DegenerateOutput,
    /// Hole and board cards did not form an evaluable hand
    InvalidHand,
    /// The state snapshot failed validation
    InvalidState,
}

/// How an action was produced. Every decision carries this tag so match
/// logs can separate model play from fallback play.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum DecisionPath {
    Policy,
    Fallback { reason: FallbackReason },
}

/// The engine's answer for one decision point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDecision {
    pub action: Action,
    /// Hole-card index to discard, when the discard option is taken
    pub discard: Option<usize>,
    pub path: DecisionPath,
    /// Hand score the decision was based on; 0 when the hand was rejected
    pub hand_strength: f32,
    pub elapsed: Duration,
}

/// Turns state snapshots into actions within a wall-clock slice. The model
/// runs on a scratch thread and is raced against the slice deadline; if it
/// loses, misbehaves, or the budget is critical, the deterministic fallback
/// rule answers instead, so `decide` always returns a legal action.
pub struct DecisionEngine {
    config: AgentConfig,
    model: Arc<dyn PolicyModel>,
    rng: ChaCha20Rng,
}

impl DecisionEngine {
    pub fn new(config: AgentConfig, model: Arc<dyn PolicyModel>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        Self { config, model, rng }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Decide the current action. Never panics and never returns an action
    /// outside the legal set for `state`.
    pub fn decide(
        &mut self,
        state: &GameState,
        budget: &mut TimeBudget,
        aggression: f32,
        fold_frequency: f32,
    ) -> ActionDecision {
        let start = Instant::now();
        let legal = LegalActions::from_state(state);

        if let Err(err) = state.validate() {
            tracing::warn!(%err, "state rejected, falling back");
            return self.finish(
                fallback_action(&legal, 0.0, 1.0),
                None,
                fallback(FallbackReason::InvalidState),
                0.0,
                start,
                budget,
            );
        }

        let hand_strength = match hand_score(state) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%err, "hand not evaluable, falling back");
                return self.finish(
                    fallback_action(&legal, 0.0, 1.0),
                    None,
                    fallback(FallbackReason::InvalidHand),
                    0.0,
                    start,
                    budget,
                );
            }
        };
        let pot_odds = state.pot_odds();

        if budget.is_critical() {
            return self.finish(
                fallback_action(&legal, hand_strength, pot_odds),
                None,
                fallback(FallbackReason::BudgetExhausted),
                hand_strength,
                start,
                budget,
            );
        }

        let slice = budget.allocate();
        let deadline = start + slice;

        let output = match self.run_policy(state, legal, hand_strength, aggression, fold_frequency, deadline) {
            Ok(output) => output,
            Err(reason) => {
                return self.finish(
                    fallback_action(&legal, hand_strength, pot_odds),
                    None,
                    fallback(reason),
                    hand_strength,
                    start,
                    budget,
                );
            }
        };

        let action = self.select_action(&output, &legal, hand_strength);
        let discard = self.select_discard(&output, &legal, state);
        self.finish(action, discard, DecisionPath::Policy, hand_strength, start, budget)
    }

    fn finish(
        &self,
        action: Action,
        discard: Option<usize>,
        path: DecisionPath,
        hand_strength: f32,
        start: Instant,
        budget: &mut TimeBudget,
    ) -> ActionDecision {
        let elapsed = start.elapsed();
        budget.consume(elapsed);
        tracing::debug!(
            ?action,
            ?path,
            elapsed_us = elapsed.as_micros() as u64,
            remaining_ms = budget.remaining().as_millis() as u64,
            "decision"
        );
        ActionDecision {
            action,
            discard,
            path,
            hand_strength,
            elapsed,
        }
    }

    /// Score the encoded state on a scratch thread, racing the deadline.
    /// A late result is discarded; the thread finishes on its own.
    fn run_policy(
        &self,
        state: &GameState,
        legal: LegalActions,
        hand_strength: f32,
        aggression: f32,
        fold_frequency: f32,
        deadline: Instant,
    ) -> Result<PolicyOutput, FallbackReason> {
        let now = Instant::now();
        if now >= deadline {
            return Err(FallbackReason::DeadlineExpired);
        }

        let features = encode(state, hand_strength, aggression, fold_frequency);
        let output = score_within(Arc::clone(&self.model), features, legal, deadline)
            .ok_or(FallbackReason::ScoringTimeout)?;

        if output_is_sane(&output, &legal) {
            Ok(output)
        } else {
            tracing::warn!(model = self.model.name(), "degenerate model output");
            Err(FallbackReason::DegenerateOutput)
        }
    }

    /// Pick among the legal actions: masked argmax over the model's action
    /// probabilities, with two overrides on top. A strong hand scored with
    /// low confidence is steered to a value raise, and a weak hand may fire
    /// a minimum-raise bluff at the configured probability.
    fn select_action(
        &mut self,
        output: &PolicyOutput,
        legal: &LegalActions,
        hand_strength: f32,
    ) -> Action {
        let candidate = masked_argmax(output, legal);

        if let Some(bounds) = legal.raise {
            let confidence = legal_mass(output, legal);
            if hand_strength >= self.config.value_bet_threshold && confidence < LOW_CONFIDENCE {
                return Action::Raise(raise_amount(output.raise_fraction, bounds.min, bounds.max));
            }
            if hand_strength < BLUFF_STRENGTH_CAP
                && candidate != PolicyOutput::RAISE
                && self.rng.random::<f32>() < self.config.bluff_probability
            {
                return Action::Raise(bounds.min);
            }
        }

        match candidate {
            PolicyOutput::CHECK => Action::Check,
            PolicyOutput::CALL => Action::Call,
            PolicyOutput::RAISE => {
                // unreachable without bounds: raise is only a candidate when legal
                match legal.raise {
                    Some(bounds) => {
                        Action::Raise(raise_amount(output.raise_fraction, bounds.min, bounds.max))
                    }
                    None => Action::Fold,
                }
            }
            _ => Action::Fold,
        }
    }

    fn select_discard(
        &self,
        output: &PolicyOutput,
        legal: &LegalActions,
        state: &GameState,
    ) -> Option<usize> {
        if legal.discard && output.discard_score > self.config.discard_threshold {
            Some(choose_discard(state.hole, &state.board))
        } else {
            None
        }
    }
}

/// Deterministic last resort, O(1) and never raising or discarding:
/// check when free, call when the hand's score covers the pot odds,
/// otherwise fold.
pub fn fallback_action(legal: &LegalActions, hand_strength: f32, pot_odds: f32) -> Action {
    if legal.check {
        Action::Check
    } else if legal.call && hand_strength >= pot_odds {
        Action::Call
    } else {
        Action::Fold
    }
}

fn fallback(reason: FallbackReason) -> DecisionPath {
    DecisionPath::Fallback { reason }
}

/// Hand score on [0, 1]: the preflop table with an empty board, the
/// evaluator's score bands once board cards are out.
fn hand_score(state: &GameState) -> Result<f32, ternion_engine::errors::HandError> {
    if state.street == Street::Preflop && state.board.is_empty() {
        return Ok(preflop_strength(state.hole));
    }
    let cards = state.known_cards();
    Ok(evaluate_hand(&cards)?.score())
}

fn score_within(
    model: Arc<dyn PolicyModel>,
    features: Features,
    legal: LegalActions,
    deadline: Instant,
) -> Option<PolicyOutput> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // the receiver may be gone already; a late result is simply dropped
        let _ = tx.send(model.score(&features, &legal));
    });
    let timeout = deadline.saturating_duration_since(Instant::now());
    rx.recv_timeout(timeout).ok()
}

/// A usable output is finite, non-negative, and puts real probability mass
/// on at least one legal action.
fn output_is_sane(output: &PolicyOutput, legal: &LegalActions) -> bool {
    let finite = output.action_probs.iter().all(|p| p.is_finite() && *p >= 0.0)
        && output.raise_fraction.is_finite()
        && (0.0..=1.0).contains(&output.raise_fraction)
        && output.discard_score.is_finite();
    finite && legal_mass(output, legal) > EPSILON
}

fn legal_mass(output: &PolicyOutput, legal: &LegalActions) -> f32 {
    legal_indices(legal)
        .into_iter()
        .map(|i| output.action_probs[i])
        .sum()
}

fn masked_argmax(output: &PolicyOutput, legal: &LegalActions) -> usize {
    let mut best = PolicyOutput::FOLD;
    let mut best_p = f32::MIN;
    for i in legal_indices(legal) {
        if output.action_probs[i] > best_p {
            best_p = output.action_probs[i];
            best = i;
        }
    }
    best
}

fn legal_indices(legal: &LegalActions) -> Vec<usize> {
    let mut indices = vec![PolicyOutput::FOLD];
    if legal.check {
        indices.push(PolicyOutput::CHECK);
    }
    if legal.call {
        indices.push(PolicyOutput::CALL);
    }
    if legal.raise.is_some() {
        indices.push(PolicyOutput::RAISE);
    }
    indices
}

fn raise_amount(fraction: f32, min: u32, max: u32) -> u32 {
    let span = (max - min) as f32;
    let amount = min + (fraction * span).round() as u32;
    amount.clamp(min, max)
}
