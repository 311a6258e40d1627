use crate::types::{Difficulty, Direction};

use serde::{Deserialize, Serialize};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub player_name: String,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    /// Session clock reading when the input was applied.
    pub at_ms: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    OpenLevelSelect,
    SelectLevel { difficulty: Difficulty },
    Move { direction: Direction },
    Restart,
    Home,
}

impl InputJournal {
    pub fn new(seed: u64, player_name: impl Into<String>) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            seed,
            player_name: player_name.into(),
            inputs: Vec::new(),
        }
    }

    pub fn append(&mut self, at_ms: u64, payload: InputPayload) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, at_ms, payload });
    }
}
