use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::journal::{InputJournal, InputPayload, JOURNAL_FORMAT_VERSION};
use crate::session::{Session, SessionError};
use crate::types::{Pos, ScoreEntry, Screen};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("journal format {found} is not supported (expected {})", JOURNAL_FORMAT_VERSION)]
    UnsupportedFormat { found: u16 },
    #[error("input #{seq} was rejected: {source}")]
    Rejected { seq: u64, source: SessionError },
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ReplayResult {
    pub final_screen: Screen,
    pub player_pos: Pos,
    pub scores: Vec<ScoreEntry>,
    pub grid_fingerprint: Option<u64>,
    pub final_snapshot_hash: u64,
}

/// Rebuilds a session from its seed and re-applies every journaled input.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedFormat { found: journal.format_version });
    }

    let mut session = Session::new(journal.seed, journal.player_name.clone());
    for record in &journal.inputs {
        let now = Duration::from_millis(record.at_ms);
        let applied = match &record.payload {
            InputPayload::OpenLevelSelect => session.open_level_select(now),
            InputPayload::SelectLevel { difficulty } => session.select_level(*difficulty, now),
            InputPayload::Move { direction } => session.step(*direction, now).map(|_| ()),
            InputPayload::Restart => session.restart(now),
            InputPayload::Home => session.go_home(now),
        };
        applied.map_err(|source| ReplayError::Rejected { seq: record.seq, source })?;
    }

    Ok(ReplayResult {
        final_screen: session.screen(),
        player_pos: session.player_pos(),
        scores: session.scores().to_vec(),
        grid_fingerprint: session.grid().map(|grid| grid.fingerprint()),
        final_snapshot_hash: session.snapshot_hash(),
    })
}
