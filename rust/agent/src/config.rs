use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Tunable thresholds for the decision engine. Loaded from an optional TOML
/// file pointed at by `TERNION_CONFIG`, with a few env-var overrides on top;
/// every field has a documented default so the agent runs with no config at
/// all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Probability of a minimum-raise bluff with a weak hand (default 0.15)
    pub bluff_probability: f32,
    /// Hand-strength score at or above which value raising is preferred
    /// (default 0.70)
    pub value_bet_threshold: f32,
    /// Model discard score above which the discard option is taken
    /// (default 0.5)
    pub discard_threshold: f32,
    /// Total wall-clock budget for one match, in milliseconds
    /// (default 1_500_000)
    pub match_budget_ms: u64,
    /// Expected number of decisions in a match, used to size time slices
    /// (default 4_000)
    pub estimated_decisions: u32,
    /// Hard per-decision ceiling in milliseconds (default 500)
    pub decision_ceiling_ms: u64,
    /// Minimal slice in milliseconds, enough for the fallback path only
    /// (default 5)
    pub minimal_slice_ms: u64,
    /// Reserve below which the budget is critical and only the fallback
    /// runs (default 1_000)
    pub critical_reserve_ms: u64,
    /// Per-observation retention of old opponent statistics, in (0, 1]
    /// (default 0.90)
    pub opponent_decay: f32,
    /// Seed for the bluff gate RNG; None draws from the OS
    pub rng_seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            bluff_probability: 0.15,
            value_bet_threshold: 0.70,
            discard_threshold: 0.5,
            match_budget_ms: 1_500_000,
            estimated_decisions: 4_000,
            decision_ceiling_ms: 500,
            minimal_slice_ms: 5,
            critical_reserve_ms: 1_000,
            opponent_decay: 0.90,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// All fields optional so a config file can override just a few values.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bluff_probability: Option<f32>,
    value_bet_threshold: Option<f32>,
    discard_threshold: Option<f32>,
    match_budget_ms: Option<u64>,
    estimated_decisions: Option<u32>,
    decision_ceiling_ms: Option<u64>,
    minimal_slice_ms: Option<u64>,
    critical_reserve_ms: Option<u64>,
    opponent_decay: Option<f32>,
    rng_seed: Option<u64>,
}

/// Resolve the effective config: defaults, then the `TERNION_CONFIG` TOML
/// file if set, then `TERNION_SEED` / `TERNION_BLUFF` / `TERNION_BUDGET_MS`
/// env overrides.
pub fn load() -> Result<AgentConfig, ConfigError> {
    let mut cfg = AgentConfig::default();

    if let Ok(path) = std::env::var("TERNION_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, f);
    }

    if let Ok(seed) = std::env::var("TERNION_SEED")
        && !seed.is_empty()
    {
        cfg.rng_seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("invalid TERNION_SEED".into()))?,
        );
    }
    if let Ok(bluff) = std::env::var("TERNION_BLUFF")
        && !bluff.is_empty()
    {
        cfg.bluff_probability = bluff
            .parse()
            .map_err(|_| ConfigError::Invalid("invalid TERNION_BLUFF".into()))?;
    }
    if let Ok(budget) = std::env::var("TERNION_BUDGET_MS")
        && !budget.is_empty()
    {
        cfg.match_budget_ms = budget
            .parse()
            .map_err(|_| ConfigError::Invalid("invalid TERNION_BUDGET_MS".into()))?;
    }

    validate(&cfg)?;
    Ok(cfg)
}

fn apply_file(cfg: &mut AgentConfig, f: FileConfig) {
    if let Some(v) = f.bluff_probability {
        cfg.bluff_probability = v;
    }
    if let Some(v) = f.value_bet_threshold {
        cfg.value_bet_threshold = v;
    }
    if let Some(v) = f.discard_threshold {
        cfg.discard_threshold = v;
    }
    if let Some(v) = f.match_budget_ms {
        cfg.match_budget_ms = v;
    }
    if let Some(v) = f.estimated_decisions {
        cfg.estimated_decisions = v;
    }
    if let Some(v) = f.decision_ceiling_ms {
        cfg.decision_ceiling_ms = v;
    }
    if let Some(v) = f.minimal_slice_ms {
        cfg.minimal_slice_ms = v;
    }
    if let Some(v) = f.critical_reserve_ms {
        cfg.critical_reserve_ms = v;
    }
    if let Some(v) = f.opponent_decay {
        cfg.opponent_decay = v;
    }
    if let Some(v) = f.rng_seed {
        cfg.rng_seed = Some(v);
    }
}

pub fn validate(cfg: &AgentConfig) -> Result<(), ConfigError> {
    for (name, v) in [
        ("bluff_probability", cfg.bluff_probability),
        ("value_bet_threshold", cfg.value_bet_threshold),
        ("discard_threshold", cfg.discard_threshold),
    ] {
        if !(0.0..=1.0).contains(&v) {
            return Err(ConfigError::Invalid(format!(
                "{} must be within [0, 1], got {}",
                name, v
            )));
        }
    }
    if cfg.opponent_decay <= 0.0 || cfg.opponent_decay > 1.0 {
        return Err(ConfigError::Invalid(format!(
            "opponent_decay must be within (0, 1], got {}",
            cfg.opponent_decay
        )));
    }
    if cfg.match_budget_ms == 0 {
        return Err(ConfigError::Invalid("match_budget_ms must be positive".into()));
    }
    if cfg.estimated_decisions == 0 {
        return Err(ConfigError::Invalid(
            "estimated_decisions must be positive".into(),
        ));
    }
    if cfg.decision_ceiling_ms < cfg.minimal_slice_ms {
        return Err(ConfigError::Invalid(
            "decision_ceiling_ms must not be below minimal_slice_ms".into(),
        ));
    }
    Ok(())
}
