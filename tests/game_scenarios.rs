#![allow(missing_docs)]
//! Host-level tests that play whole rounds against a scripted board.

use embassy_futures::block_on;
use memory_matrix::config::{AXIS_CENTER, AXIS_MAX, SEQUENCE_MAX_LEN, SEQUENCE_START_LEN};
use memory_matrix::game::{Game, RoundOutcome};
use memory_matrix::hardware::{ButtonId, Indicator};
use memory_matrix::host_board::{HostBoard, ScriptedPress};
use memory_matrix::level::GameState;
use memory_matrix::matrix::{Frame, Position};
use memory_matrix::sequence::Sequence;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SEED: u64 = 0x5EED;

fn new_game() -> Game<SmallRng> {
    Game::new(SmallRng::seed_from_u64(SEED))
}

fn sequence(positions: &[(usize, usize)]) -> Sequence {
    let positions: Vec<_> = positions
        .iter()
        .map(|&(col, row)| Position::new(col, row))
        .collect();
    Sequence::from_positions(&positions).expect("test sequences fit")
}

// Readings that move the cursor one cell toward `delta` (horizontal is inverted).
fn stick_for(delta_col: isize, delta_row: isize) -> (u16, u16) {
    let horizontal = match delta_col.signum() {
        1 => 0,
        -1 => AXIS_MAX,
        _ => AXIS_CENTER,
    };
    let vertical = match delta_row.signum() {
        1 => AXIS_MAX,
        -1 => 0,
        _ => AXIS_CENTER,
    };
    (horizontal, vertical)
}

/// Script a player who walks the cursor to each target and confirms it.
///
/// The cursor starts the round at the center. A target under the cursor costs one
/// still tick. Returns the tick count once the last press is scripted.
fn script_player(board: &mut HostBoard, targets: &[Position]) -> usize {
    let mut tick = board.ticks() + board.stick_remaining();
    let mut cursor = Position::center();
    for target in targets {
        if cursor == *target {
            board.push_idle(1);
            tick += 1;
        }
        while cursor != *target {
            let delta_col = target.col() as isize - cursor.col() as isize;
            let delta_row = target.row() as isize - cursor.row() as isize;
            let (horizontal, vertical) = stick_for(delta_col, delta_row);
            board.push_stick(horizontal, vertical);
            tick += 1;
            cursor = Position::clamped(
                cursor.col() as isize + delta_col.signum(),
                cursor.row() as isize + delta_row.signum(),
            );
        }
        board.push_press(ButtonId::Confirm, ScriptedPress::at_tick(tick));
    }
    tick
}

#[test]
fn correct_round_advances_to_level_two() {
    let mut board = HostBoard::new();
    let mut game = new_game();
    let target = sequence(&[(1, 1), (3, 2)]);
    script_player(&mut board, &target);

    let outcome = block_on(game.play_sequence(&mut board, &target)).expect("round runs");

    assert_eq!(outcome, RoundOutcome::Correct);
    assert_eq!(game.state().level(), 2);
    assert_eq!(game.state().sequence_len(), 3);
    assert_eq!(board.stick_remaining(), 0);
    assert_eq!(board.presses_remaining(ButtonId::Confirm), 0);
    assert_eq!(
        board.indicator_changes(),
        [(Indicator::Success, true), (Indicator::Success, false)]
    );
}

#[test]
fn wrong_position_resets_to_level_one() {
    let mut board = HostBoard::new();
    let mut game = new_game();
    let target = sequence(&[(1, 1), (3, 2)]);
    script_player(&mut board, &[Position::new(1, 1), Position::new(0, 0)]);

    let outcome = block_on(game.play_sequence(&mut board, &target)).expect("round runs");

    assert_eq!(outcome, RoundOutcome::Incorrect);
    assert_eq!(game.state(), GameState::new());
    assert_eq!(
        board.indicator_changes(),
        [(Indicator::Failure, true), (Indicator::Failure, false)]
    );
    let pitches: Vec<_> = board.tones().iter().map(|tone| tone.frequency_hz).collect();
    assert_eq!(pitches, [300, 200]);
}

#[test]
fn wrong_order_is_incorrect() {
    let mut board = HostBoard::new();
    let mut game = new_game();
    let target = sequence(&[(1, 1), (3, 2)]);
    script_player(&mut board, &[Position::new(3, 2), Position::new(1, 1)]);

    let outcome = block_on(game.play_sequence(&mut board, &target)).expect("round runs");

    assert_eq!(outcome, RoundOutcome::Incorrect);
}

#[test]
fn cancel_mid_round_resets_silently() {
    let mut board = HostBoard::new();
    let mut game = new_game();

    let first = sequence(&[(1, 1), (3, 2)]);
    let ticks = script_player(&mut board, &first);
    block_on(game.play_sequence(&mut board, &first)).expect("round runs");
    assert_eq!(game.state().level(), 2);
    board.clear_events();

    // Level 2: confirm one cell, then cancel.
    let second = sequence(&[(0, 0), (4, 4), (2, 2)]);
    let after_first = script_player(&mut board, &second[..1]);
    assert!(after_first > ticks);
    board.push_cancel_gesture(after_first + 1);

    let outcome = block_on(game.play_sequence(&mut board, &second)).expect("round runs");

    assert_eq!(outcome, RoundOutcome::Cancelled);
    assert_eq!(game.state(), GameState::new());
    assert!(board.tones().is_empty());
    assert!(board.indicator_changes().is_empty());
    let texts = board.texts();
    assert_eq!(
        texts.first().cloned(),
        Some(("Game over".to_string(), "Press B again".to_string()))
    );
    assert_eq!(
        texts.last().cloned(),
        Some(("Level 1".to_string(), "Good luck!".to_string()))
    );
}

#[test]
fn playback_precedes_input_and_ends_dark() {
    let mut board = HostBoard::new();
    let mut game = new_game();
    let target = sequence(&[(1, 1), (3, 2)]);
    script_player(&mut board, &target);

    block_on(game.play_sequence(&mut board, &target)).expect("round runs");

    let frames = board.frames();
    // Two blinks, then the clearing frame, then the cursor frames.
    assert_eq!(frames[0].lit().collect::<Vec<_>>(), [Position::new(1, 1)]);
    assert_eq!(frames[1], Frame::new());
    assert_eq!(frames[2].lit().collect::<Vec<_>>(), [Position::new(3, 2)]);
    assert_eq!(frames[3], Frame::new());
    assert_eq!(frames[4], Frame::new());
    assert_eq!(frames[5].lit().collect::<Vec<_>>(), [Position::new(1, 1)]);
}

#[test]
fn repeated_cell_needs_a_second_press() {
    let mut board = HostBoard::new();
    let mut game = new_game();
    let target = sequence(&[(2, 2), (2, 2)]);
    script_player(&mut board, &target);

    let outcome = block_on(game.play_sequence(&mut board, &target)).expect("round runs");

    assert_eq!(outcome, RoundOutcome::Correct);
    assert_eq!(board.ticks(), 2);
}

#[test]
fn clearing_every_level_starts_over() {
    let mut board = HostBoard::new();
    let mut game = new_game();
    let mut predictor = SmallRng::seed_from_u64(SEED);

    for len in SEQUENCE_START_LEN..SEQUENCE_MAX_LEN {
        let expected = Sequence::generate(&mut predictor, len).expect("within capacity");
        script_player(&mut board, &expected);

        let outcome = block_on(game.play_round(&mut board)).expect("round runs");

        assert_eq!(outcome, RoundOutcome::Correct, "round of length {len}");
        assert_eq!(game.state().sequence_len(), len + 1);
    }

    board.clear_events();
    let last = Sequence::generate(&mut predictor, SEQUENCE_MAX_LEN).expect("within capacity");
    script_player(&mut board, &last);
    let outcome = block_on(game.play_round(&mut board)).expect("round runs");

    assert_eq!(outcome, RoundOutcome::AllCleared);
    assert_eq!(game.state(), GameState::new());
    let texts = board.texts();
    assert_eq!(
        texts.first().cloned(),
        Some(("You win!".to_string(), "Starting over".to_string()))
    );
    assert!(
        !texts.iter().any(|(line1, _)| line1 == "Level 10"),
        "announced a level past the last one: {texts:?}"
    );

    // The next round starts again from the shortest sequence.
    board.clear_events();
    let again = Sequence::generate(&mut predictor, SEQUENCE_START_LEN).expect("within capacity");
    script_player(&mut board, &again);
    let outcome = block_on(game.play_round(&mut board)).expect("round runs");
    assert_eq!(outcome, RoundOutcome::Correct);
    assert_eq!(game.state().level(), 2);
}
