//! Headless game-state coordinator: menus, level choice, timing and scores.
//!
//! The caller supplies the clock as a `Duration` since any fixed epoch. Readings
//! are truncated to whole milliseconds so a recorded [`InputJournal`] replays to
//! the same timings.

use std::hash::Hasher;
use std::time::Duration;

use log::info;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;
use xxhash_rust::xxh3::Xxh3;

use crate::grid::Grid;
use crate::journal::{InputJournal, InputPayload};
use crate::mapgen::{GenerationError, MazeGenerator};
use crate::player::Player;
use crate::types::{Difficulty, Direction, LogEvent, MoveOutcome, Pos, ScoreEntry, Screen};

pub const DEFAULT_PLAYER_NAME: &str = "Player 1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    OpenLevelSelect,
    SelectLevel,
    Move,
    Restart,
    GoHome,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{action:?} is not available on the {screen:?} screen")]
    InvalidScreen { action: SessionAction, screen: Screen },
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

pub struct Session {
    seed: u64,
    rng: ChaCha8Rng,
    player_name: String,
    screen: Screen,
    difficulty: Option<Difficulty>,
    grid: Option<Grid>,
    player: Player,
    started_at: Duration,
    scores: Vec<ScoreEntry>,
    log: Vec<LogEvent>,
    journal: InputJournal,
}

impl Session {
    pub fn new(seed: u64, player_name: impl Into<String>) -> Self {
        let player_name = player_name.into();
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            journal: InputJournal::new(seed, player_name.clone()),
            player_name,
            screen: Screen::MainMenu,
            difficulty: None,
            grid: None,
            player: Player::new(),
            started_at: Duration::ZERO,
            scores: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Maze currently on screen, if any.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn player_pos(&self) -> Pos {
        self.player.pos()
    }

    pub fn scores(&self) -> &[ScoreEntry] {
        &self.scores
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Every input accepted so far, replayable with [`crate::replay::replay_to_end`].
    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    /// Running time while playing, final time once won.
    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        match self.screen {
            Screen::Playing => Some(whole_millis(now).saturating_sub(self.started_at)),
            Screen::Won { elapsed } => Some(elapsed),
            Screen::MainMenu | Screen::LevelSelect => None,
        }
    }

    pub fn open_level_select(&mut self, now: Duration) -> Result<(), SessionError> {
        self.expect_screen(SessionAction::OpenLevelSelect, |screen| screen == Screen::MainMenu)?;
        self.screen = Screen::LevelSelect;
        self.record(now, InputPayload::OpenLevelSelect);
        Ok(())
    }

    pub fn select_level(
        &mut self,
        difficulty: Difficulty,
        now: Duration,
    ) -> Result<(), SessionError> {
        self.expect_screen(SessionAction::SelectLevel, |screen| screen == Screen::LevelSelect)?;
        self.start_level(difficulty, now)?;
        self.record(now, InputPayload::SelectLevel { difficulty });
        Ok(())
    }

    /// Moves the player one cell. Walls block silently.
    pub fn step(
        &mut self,
        direction: Direction,
        now: Duration,
    ) -> Result<MoveOutcome, SessionError> {
        let (Screen::Playing, Some(grid), Some(difficulty)) =
            (self.screen, self.grid.as_ref(), self.difficulty)
        else {
            return Err(self.invalid(SessionAction::Move));
        };

        let from = self.player.pos();
        let outcome = self.player.try_move(grid, direction);
        let won = self.player.has_won(grid);
        self.record(now, InputPayload::Move { direction });

        match outcome {
            MoveOutcome::Blocked => self.log.push(LogEvent::MoveBlocked { from, direction }),
            MoveOutcome::Moved(_) if won => self.finish_level(difficulty, now),
            MoveOutcome::Moved(_) => {}
        }
        Ok(outcome)
    }

    /// Fresh maze of the current difficulty, player back at the start, timer reset.
    pub fn restart(&mut self, now: Duration) -> Result<(), SessionError> {
        let Some(difficulty) = self.difficulty.filter(|_| self.in_level()) else {
            return Err(self.invalid(SessionAction::Restart));
        };
        self.start_level(difficulty, now)?;
        self.record(now, InputPayload::Restart);
        Ok(())
    }

    pub fn go_home(&mut self, now: Duration) -> Result<(), SessionError> {
        self.expect_screen(SessionAction::GoHome, |screen| {
            matches!(screen, Screen::Playing | Screen::Won { .. })
        })?;
        self.screen = Screen::MainMenu;
        self.grid = None;
        self.player.reset();
        self.log.push(LogEvent::ReturnedHome);
        self.record(now, InputPayload::Home);
        Ok(())
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u8(self.screen.code());
        if let Screen::Won { elapsed } = self.screen {
            hasher.write_u128(elapsed.as_millis());
        }
        hasher.write_u8(self.difficulty.map_or(u8::MAX, Difficulty::code));
        hasher.write_u64(self.grid.as_ref().map_or(0, Grid::fingerprint));
        hasher.write_i32(self.player.pos().x);
        hasher.write_i32(self.player.pos().y);
        hasher.write_u128(self.started_at.as_millis());
        hasher.write_usize(self.scores.len());
        for score in &self.scores {
            hasher.write_u8(score.difficulty.code());
            hasher.write_u128(score.elapsed.as_millis());
        }
        hasher.finish()
    }

    fn start_level(&mut self, difficulty: Difficulty, now: Duration) -> Result<(), SessionError> {
        let side = difficulty.side();
        let maze = MazeGenerator::new(side, side).generate(&mut self.rng)?;
        let fingerprint = maze.grid.fingerprint();

        info!("starting {difficulty:?} level ({side}x{side}, fingerprint {fingerprint:#018x})");
        self.log.push(LogEvent::LevelStarted { difficulty, fingerprint, attempts: maze.attempts });
        self.grid = Some(maze.grid);
        self.difficulty = Some(difficulty);
        self.player.reset();
        self.started_at = whole_millis(now);
        self.screen = Screen::Playing;
        Ok(())
    }

    fn finish_level(&mut self, difficulty: Difficulty, now: Duration) {
        let elapsed = whole_millis(now).saturating_sub(self.started_at);

        info!("{} cleared {difficulty:?} in {:.2}s", self.player_name, elapsed.as_secs_f64());
        self.screen = Screen::Won { elapsed };
        self.scores.push(ScoreEntry {
            player_name: self.player_name.clone(),
            difficulty,
            elapsed,
        });
        self.log.push(LogEvent::LevelWon { difficulty, elapsed });
    }

    fn in_level(&self) -> bool {
        matches!(self.screen, Screen::Playing | Screen::Won { .. })
    }

    fn expect_screen(
        &self,
        action: SessionAction,
        allowed: impl Fn(Screen) -> bool,
    ) -> Result<(), SessionError> {
        if allowed(self.screen) { Ok(()) } else { Err(self.invalid(action)) }
    }

    fn invalid(&self, action: SessionAction) -> SessionError {
        SessionError::InvalidScreen { action, screen: self.screen }
    }

    fn record(&mut self, now: Duration, payload: InputPayload) {
        self.journal.append(whole_millis(now).as_millis() as u64, payload);
    }
}

fn whole_millis(now: Duration) -> Duration {
    Duration::from_millis(now.as_millis() as u64)
}
