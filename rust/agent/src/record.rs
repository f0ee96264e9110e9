use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ternion_engine::rules::Action;
use ternion_engine::state::Street;

use crate::decide::{ActionDecision, DecisionPath};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One line of the decision log. Carries everything needed to replay why
/// the engine acted: the inputs it saw, the path it took, and the time it
/// spent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub ts: String,
    pub hand_no: u64,
    pub street: Street,
    pub pot: u32,
    pub to_call: u32,
    pub hand_strength: f32,
    pub aggression: f32,
    pub action: Action,
    pub discard: Option<usize>,
    #[serde(flatten)]
    pub path: DecisionPath,
    pub elapsed_us: u64,
    pub budget_remaining_ms: u64,
}

impl DecisionRecord {
    pub fn new(
        hand_no: u64,
        street: Street,
        pot: u32,
        to_call: u32,
        aggression: f32,
        decision: &ActionDecision,
        budget_remaining: Duration,
    ) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339(),
            hand_no,
            street,
            pot,
            to_call,
            hand_strength: decision.hand_strength,
            aggression,
            action: decision.action,
            discard: decision.discard,
            path: decision.path,
            elapsed_us: decision.elapsed.as_micros() as u64,
            budget_remaining_ms: budget_remaining.as_millis() as u64,
        }
    }
}

/// Append-only JSONL writer for decision records. One record per line,
/// flushed per write so a crash mid-match loses at most the current line.
pub struct DecisionLogger {
    out: BufWriter<File>,
}

impl DecisionLogger {
    pub fn create(path: &Path) -> Result<Self, RecordError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    pub fn log(&mut self, record: &DecisionRecord) -> Result<(), RecordError> {
        let line = serde_json::to_string(record)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}
