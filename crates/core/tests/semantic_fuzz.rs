use std::time::Duration;

use maze_core::{
    Difficulty, Direction, MazeReport, Screen, Session, replay::replay_to_end,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn run_fuzz_session(session_seed: u64, input_seed: u64, max_inputs: u32) -> Result<(), String> {
    let mut session = Session::new(session_seed, "Fuzz");
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    let mut now = Duration::ZERO;

    for _ in 0..max_inputs {
        now += Duration::from_millis(rng.next_u64() % 250);
        let applied = match session.screen() {
            Screen::MainMenu => session.open_level_select(now),
            Screen::LevelSelect => session.select_level(choose(&mut rng, &Difficulty::ALL), now),
            Screen::Playing => match rng.next_u64() % 50 {
                0 => session.restart(now),
                1 => session.go_home(now),
                _ => session.step(choose(&mut rng, &Direction::ALL), now).map(|_| ()),
            },
            Screen::Won { .. } => session.restart(now),
        };
        applied.map_err(|err| format!("Invariant failed: legal input rejected: {err}"))?;

        if let Some(grid) = session.grid() {
            if !grid.is_open_at(session.player_pos()) {
                return Err(format!(
                    "Invariant failed: player inside wall on session_seed {session_seed}"
                ));
            }
            let report = MazeReport::from_grid(grid);
            if !report.goal_reachable || !report.is_tree {
                return Err(format!("Invariant failed: unsolvable maze on {session_seed}"));
            }
        }
    }

    let replayed = replay_to_end(session.journal())
        .map_err(|err| format!("Invariant failed: journal did not replay: {err}"))?;
    if replayed.final_snapshot_hash != session.snapshot_hash() {
        return Err(format!("Invariant failed: replay diverged on session_seed {session_seed}"));
    }
    Ok(())
}

#[test]
fn test_fuzz_session_inputs() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(20));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(session_seed, input_seed)| {
            run_fuzz_session(session_seed, input_seed, 300).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz should preserve session invariants");
}
