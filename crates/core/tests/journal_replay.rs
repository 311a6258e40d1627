use std::time::Duration;

use maze_core::journal::{InputJournal, InputPayload};
use maze_core::replay::{ReplayError, replay_to_end};
use maze_core::{Difficulty, Direction, Screen, Session, SessionError};

/// Steps the player along the wall on its right hand until the goal is reached.
fn play_to_win(session: &mut Session, mut now: Duration) -> Duration {
    let mut facing = Direction::South;
    for _ in 0..10_000 {
        if matches!(session.screen(), Screen::Won { .. }) {
            return now;
        }
        now += Duration::from_millis(15);
        let turn_order =
            [facing.turned_right(), facing, facing.turned_left(), facing.turned_left().turned_left()];
        let grid = session.grid().expect("level should be on screen");
        let pos = session.player_pos();
        let next = turn_order
            .into_iter()
            .find(|&direction| grid.is_open_at(pos.step(direction)))
            .expect("every open cell has an open neighbour");
        facing = next;
        session.step(next, now).unwrap();
    }
    panic!("wall follower did not reach the goal");
}

/// Play a full level, persist the journal as JSON, load it back and replay.
#[test]
fn test_json_journal_replay_equivalence() {
    let mut session = Session::new(12_345, "Ada");
    session.open_level_select(Duration::ZERO).unwrap();
    session.select_level(Difficulty::Easy, Duration::from_millis(500)).unwrap();
    let finished_at = play_to_win(&mut session, Duration::from_millis(500));

    let Screen::Won { elapsed } = session.screen() else {
        panic!("session should be on the win screen");
    };
    assert_eq!(session.elapsed(finished_at), Some(elapsed));
    assert_eq!(session.scores().len(), 1);

    let json = serde_json::to_string_pretty(session.journal()).unwrap();
    let loaded: InputJournal = serde_json::from_str(&json).unwrap();
    let result = replay_to_end(&loaded).unwrap();

    assert_eq!(result.final_snapshot_hash, session.snapshot_hash());
    assert_eq!(result.scores, session.scores());
    assert_eq!(result.final_screen, Screen::Won { elapsed });
}

#[test]
fn test_restart_after_win_starts_a_new_level() {
    let mut session = Session::new(99, "Ada");
    session.open_level_select(Duration::ZERO).unwrap();
    session.select_level(Difficulty::Medium, Duration::ZERO).unwrap();
    let won_at = play_to_win(&mut session, Duration::ZERO);
    let won_grid = session.grid().cloned();

    session.restart(won_at + Duration::from_secs(2)).unwrap();
    assert_eq!(session.screen(), Screen::Playing);
    assert_ne!(session.grid().cloned(), won_grid);

    play_to_win(&mut session, won_at + Duration::from_secs(2));
    assert_eq!(session.scores().len(), 2);
    assert!(session.scores().iter().all(|score| score.difficulty == Difficulty::Medium));

    let result = replay_to_end(session.journal()).unwrap();
    assert_eq!(result.scores, session.scores());
}

#[test]
fn test_tampered_journal_is_rejected_at_the_bad_record() {
    let mut journal = InputJournal::new(5, "Ada");
    journal.append(0, InputPayload::OpenLevelSelect);
    journal.append(5, InputPayload::SelectLevel { difficulty: Difficulty::Hard });
    journal.append(9, InputPayload::Home);
    journal.append(12, InputPayload::Move { direction: Direction::East });

    match replay_to_end(&journal) {
        Err(ReplayError::Rejected { seq, source: SessionError::InvalidScreen { .. } }) => {
            assert_eq!(seq, 3);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}
