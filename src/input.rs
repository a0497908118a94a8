//! Player input: joystick cursor, confirm button, and the cancel gesture.
//!
//! See [`InputController`] for the per-tick behavior.

use embedded_hal_async::delay::DelayNs;

use crate::color::Intensity;
use crate::config::{
    AXIS_CENTER, BUTTON_DEBOUNCE, BUTTON_POLL, CURSOR_COLOR, CURSOR_STEP, DEAD_ZONE,
    SEQUENCE_MAX_LEN, TICK,
};
use crate::hardware::{Axis, ButtonId, Buttons, Joystick, LedMatrix, StatusDisplay, hold};
use crate::matrix::{Frame, Position};
use crate::sequence::Trace;

/// What one input tick produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Nothing recorded; the cursor may have moved.
    Idle,
    /// The cursor position was appended to the trace.
    Recorded(Position),
    /// The player completed the cancel gesture.
    Cancelled,
}

/// How a round's input phase ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundInput {
    /// The trace reached the sequence length.
    Complete(Trace),
    /// The player cancelled; the trace is discarded.
    Cancelled,
}

/// Moves the cursor from joystick readings and records positions on confirm.
///
/// Each [`tick`](Self::tick):
/// 1. If cancel is down, clears the matrix, shows a game-over message, and waits for
///    the full press-release-press-release gesture before returning
///    [`InputEvent::Cancelled`].
/// 2. Reads both axes. An axis moves the cursor one cell only when its reading is more
///    than [`DEAD_ZONE`] away from [`AXIS_CENTER`]. Horizontal readings are inverted.
/// 3. Clamps the cursor to the matrix.
/// 4. Shows the cursor in undimmed white on an otherwise dark matrix.
/// 5. If confirm went down since it was last seen up, records the cursor and waits for
///    release.
/// 6. Sleeps for [`TICK`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InputController {
    cursor: Position,
    confirm_armed: bool,
}

impl InputController {
    /// A controller with the cursor at the matrix center.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: Position::center(),
            confirm_armed: false,
        }
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Put the cursor back at the center and require a fresh confirm press.
    pub const fn reset(&mut self) {
        self.cursor = Position::center();
        self.confirm_armed = false;
    }

    /// Apply one pair of raw joystick readings to the cursor.
    pub const fn steer(&mut self, horizontal: u16, vertical: u16) {
        let delta_col = axis_direction(horizontal)
            .saturating_mul(CURSOR_STEP)
            .saturating_neg();
        let delta_row = axis_direction(vertical).saturating_mul(CURSOR_STEP);
        self.cursor = self.cursor.stepped(delta_col, delta_row);
    }

    /// Run ticks until the trace holds `target_len` positions or the player cancels.
    ///
    /// `target_len` is capped at [`SEQUENCE_MAX_LEN`], the most a trace can hold. The
    /// cursor starts at the center. A confirm button already held when collection starts
    /// must be released before it counts.
    pub async fn collect<B>(&mut self, board: &mut B, target_len: usize) -> RoundInput
    where
        B: LedMatrix + Joystick + Buttons + StatusDisplay + DelayNs,
    {
        let target_len = target_len.min(SEQUENCE_MAX_LEN);
        self.reset();
        self.confirm_armed = !board.is_pressed(ButtonId::Confirm);

        let mut trace = Trace::new();
        while trace.len() < target_len {
            if self.tick(board, &mut trace).await == InputEvent::Cancelled {
                return RoundInput::Cancelled;
            }
        }
        RoundInput::Complete(trace)
    }

    /// One polling step. See [`InputController`] for the order of operations.
    pub async fn tick<B>(&mut self, board: &mut B, trace: &mut Trace) -> InputEvent
    where
        B: LedMatrix + Joystick + Buttons + StatusDisplay + DelayNs,
    {
        if board.is_pressed(ButtonId::Cancel) {
            #[cfg(feature = "defmt")]
            defmt::info!("input: cancel pressed, waiting for confirmation gesture");
            board.write_frame(&Frame::new()).await;
            board.show_text("Game over", "Press B again").await;
            wait_for_cancel_gesture(board).await;
            return InputEvent::Cancelled;
        }

        let horizontal = board.read_axis(Axis::Horizontal).await;
        let vertical = board.read_axis(Axis::Vertical).await;
        self.steer(horizontal, vertical);

        board
            .write_frame(&Frame::single(self.cursor, CURSOR_COLOR, Intensity::FULL))
            .await;

        let mut event = InputEvent::Idle;
        let confirm_down = board.is_pressed(ButtonId::Confirm);
        if confirm_down && self.confirm_armed {
            if trace.record(self.cursor) {
                #[cfg(feature = "defmt")]
                defmt::info!("input: recorded {}", self.cursor);
                event = InputEvent::Recorded(self.cursor);
            }
            wait_for_stable_up(board, ButtonId::Confirm).await;
        } else {
            self.confirm_armed = !confirm_down;
        }

        hold(board, TICK).await;
        event
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

/// `-1`, `0`, or `1` depending on which side of the dead zone `reading` falls.
#[must_use]
pub const fn axis_direction(reading: u16) -> isize {
    if reading < AXIS_CENTER.saturating_sub(DEAD_ZONE) {
        -1
    } else if reading > AXIS_CENTER.saturating_add(DEAD_ZONE) {
        1
    } else {
        0
    }
}

// The gesture is release, press, release: the press that started it was already seen.
async fn wait_for_cancel_gesture<B>(board: &mut B)
where
    B: Buttons + DelayNs,
{
    wait_for_stable_up(board, ButtonId::Cancel).await;
    wait_for_stable_down(board, ButtonId::Cancel).await;
    wait_for_stable_up(board, ButtonId::Cancel).await;
}

async fn wait_for_button_up<B: Buttons + DelayNs>(board: &mut B, button: ButtonId) {
    while board.is_pressed(button) {
        hold(board, BUTTON_POLL).await;
    }
}

async fn wait_for_button_down<B: Buttons + DelayNs>(board: &mut B, button: ButtonId) {
    while !board.is_pressed(button) {
        hold(board, BUTTON_POLL).await;
    }
}

async fn wait_for_stable_down<B: Buttons + DelayNs>(board: &mut B, button: ButtonId) {
    loop {
        wait_for_button_down(board, button).await;
        hold(board, BUTTON_DEBOUNCE).await;
        if board.is_pressed(button) {
            break;
        }
        // otherwise it was bounce; keep waiting
    }
}

async fn wait_for_stable_up<B: Buttons + DelayNs>(board: &mut B, button: ButtonId) {
    loop {
        wait_for_button_up(board, button).await;
        hold(board, BUTTON_DEBOUNCE).await;
        if !board.is_pressed(button) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AXIS_MAX, HEIGHT, WIDTH};
    use crate::host_board::{HostBoard, ScriptedPress};
    use embassy_futures::block_on;
    use embassy_time::Duration;
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

    const LOW: u16 = 0;
    const HIGH: u16 = AXIS_MAX;

    #[test]
    fn dead_zone_ignores_everything_but_the_extremes() {
        assert_eq!(axis_direction(AXIS_CENTER), 0);
        assert_eq!(axis_direction(AXIS_CENTER - DEAD_ZONE), 0);
        assert_eq!(axis_direction(AXIS_CENTER + DEAD_ZONE), 0);
        assert_eq!(axis_direction(AXIS_CENTER - DEAD_ZONE - 1), -1);
        assert_eq!(axis_direction(AXIS_CENTER + DEAD_ZONE + 1), 1);
        assert_eq!(axis_direction(LOW), -1);
        assert_eq!(axis_direction(HIGH), 1);
    }

    #[test]
    fn horizontal_is_inverted_and_vertical_is_not() {
        let mut input = InputController::new();
        input.steer(LOW, AXIS_CENTER);
        assert_eq!(input.cursor(), Position::new(3, 2));

        input.reset();
        input.steer(HIGH, AXIS_CENTER);
        assert_eq!(input.cursor(), Position::new(1, 2));

        input.reset();
        input.steer(AXIS_CENTER, LOW);
        assert_eq!(input.cursor(), Position::new(2, 1));

        input.reset();
        input.steer(AXIS_CENTER, HIGH);
        assert_eq!(input.cursor(), Position::new(2, 3));
    }

    #[test]
    fn repeated_extreme_moves_stay_on_the_matrix() {
        let mut input = InputController::new();
        for (horizontal, vertical) in [(LOW, LOW), (HIGH, HIGH), (LOW, HIGH), (HIGH, LOW)] {
            for _ in 0..3 * WIDTH.max(HEIGHT) {
                input.steer(horizontal, vertical);
                assert!(input.cursor().col() < WIDTH);
                assert!(input.cursor().row() < HEIGHT);
            }
        }
        // Last corner reached: left (inverted HIGH) and up (LOW).
        assert_eq!(input.cursor(), Position::new(0, 0));
    }

    #[test]
    fn tick_renders_the_cursor_in_full_white() {
        let mut board = HostBoard::new();
        board.push_stick(LOW, LOW);
        let mut input = InputController::new();
        let mut trace = Trace::new();

        let event = block_on(input.tick(&mut board, &mut trace));

        assert_eq!(event, InputEvent::Idle);
        let frames = board.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].lit().collect::<Vec<_>>(), [Position::new(3, 1)]);
        assert_eq!(
            frames[0].get(Position::new(3, 1)),
            crate::color::encode(Rgb888::WHITE, Intensity::FULL)
        );
        assert_eq!(board.elapsed_ms(), 50);
    }

    #[test]
    fn held_confirm_records_once() {
        let mut board = HostBoard::new();
        board.push_stick(LOW, AXIS_CENTER);
        board.push_idle(1);
        board.push_stick(LOW, AXIS_CENTER);
        board.push_press(
            ButtonId::Confirm,
            ScriptedPress::at_tick(1).held_for(Duration::from_millis(400)),
        );
        board.push_press(ButtonId::Confirm, ScriptedPress::at_tick(3));
        let mut input = InputController::new();

        let collected = block_on(input.collect(&mut board, 2));

        let RoundInput::Complete(trace) = collected else {
            panic!("expected a complete trace");
        };
        assert_eq!(&*trace, [Position::new(3, 2), Position::new(4, 2)]);
        assert_eq!(board.ticks(), 3);
    }

    #[test]
    fn confirm_held_from_before_the_round_is_ignored_until_released() {
        let mut board = HostBoard::new();
        board.push_press(
            ButtonId::Confirm,
            ScriptedPress::at_tick(0).held_for(Duration::from_millis(100)),
        );
        board.push_press(ButtonId::Confirm, ScriptedPress::at_tick(4));
        let mut input = InputController::new();

        let collected = block_on(input.collect(&mut board, 1));

        assert_eq!(
            collected,
            RoundInput::Complete({
                let mut trace = Trace::new();
                trace.record(Position::center());
                trace
            })
        );
        assert_eq!(board.ticks(), 4);
    }

    #[test]
    fn oversized_target_stops_at_a_full_trace() {
        let mut board = HostBoard::new();
        for tick in 1..=SEQUENCE_MAX_LEN + 5 {
            board.push_press(ButtonId::Confirm, ScriptedPress::at_tick(tick));
        }
        let mut input = InputController::new();

        let collected = block_on(input.collect(&mut board, SEQUENCE_MAX_LEN + 1));

        let RoundInput::Complete(trace) = collected else {
            panic!("expected a complete trace");
        };
        assert_eq!(trace.len(), SEQUENCE_MAX_LEN);
        assert!(trace.iter().all(|&position| position == Position::center()));
        assert_eq!(board.ticks(), SEQUENCE_MAX_LEN);
    }

    #[test]
    fn cancel_gesture_ends_the_round() {
        let mut board = HostBoard::new();
        board.push_cancel_gesture(2);
        let mut input = InputController::new();

        let collected = block_on(input.collect(&mut board, 3));

        assert_eq!(collected, RoundInput::Cancelled);
        assert_eq!(board.ticks(), 2);
        assert_eq!(board.presses_remaining(ButtonId::Cancel), 0);
        assert_eq!(
            board.texts().last().cloned(),
            Some(("Game over".to_string(), "Press B again".to_string()))
        );
        assert_eq!(board.frames().last().copied(), Some(Frame::new()));
        // 200 ms before the second press plus its 30 ms hold and the final debounce.
        assert!(board.elapsed_ms() >= 2 * 50 + 230);
    }
}
