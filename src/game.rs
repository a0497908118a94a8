//! The round loop: generate, play, collect, judge, give feedback, repeat.

use core::convert::Infallible;

use rand::Rng;

use crate::hardware::Board;
use crate::input::{InputController, RoundInput};
use crate::level::{GameState, LevelController, Progress};
use crate::matrix::Frame;
use crate::sequence::{Sequence, Verdict, judge};
use crate::{Result, playback};

/// How a round ended.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoundOutcome {
    /// The player repeated the sequence; the level went up.
    Correct,
    /// The player got a position wrong; the game went back to level 1.
    Incorrect,
    /// The player cancelled; the game went back to level 1 without feedback.
    Cancelled,
    /// The player repeated the longest sequence there is; the game congratulated them
    /// and went back to level 1.
    AllCleared,
}

/// The whole game: session state, the random source, and the input controller.
///
/// # Example
///
/// ```rust
/// use embassy_futures::block_on;
/// use memory_matrix::game::{Game, RoundOutcome};
/// use memory_matrix::host_board::HostBoard;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut board = HostBoard::new();
/// board.push_cancel_gesture(1);
///
/// let mut game = Game::new(SmallRng::seed_from_u64(9));
/// let outcome = block_on(game.play_round(&mut board)).expect("round runs");
/// assert_eq!(outcome, RoundOutcome::Cancelled);
/// assert_eq!(game.state().level(), 1);
/// ```
#[derive(Debug)]
pub struct Game<R> {
    rng: R,
    levels: LevelController,
    input: InputController,
}

impl<R: Rng> Game<R> {
    /// A game at level 1 drawing sequences from `rng`.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            levels: LevelController::new(),
            input: InputController::new(),
        }
    }

    /// Current level and sequence length.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.levels.state()
    }

    /// Show the level banner, then play rounds forever.
    ///
    /// # Errors
    ///
    /// Returns only if a round fails; see [`play_round`](Self::play_round).
    pub async fn run<B: Board>(&mut self, board: &mut B) -> Result<Infallible> {
        self.levels.show_level(board).await?;
        loop {
            let _outcome = self.play_round(board).await?;
            #[cfg(feature = "defmt")]
            defmt::info!("game: round ended {}", _outcome);
        }
    }

    /// Play one round and apply its result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatusTextTooLong`](crate::Error::StatusTextTooLong) if a status
    /// line cannot be formatted.
    pub async fn play_round<B: Board>(&mut self, board: &mut B) -> Result<RoundOutcome> {
        let len = self.state().sequence_len();
        let sequence = Sequence::generate(&mut self.rng, len)?;
        self.play_sequence(board, &sequence).await
    }

    /// Play one round against a known sequence instead of a random one.
    ///
    /// # Errors
    ///
    /// See [`play_round`](Self::play_round).
    pub async fn play_sequence<B: Board>(
        &mut self,
        board: &mut B,
        sequence: &Sequence,
    ) -> Result<RoundOutcome> {
        let state = self.levels.state();
        #[cfg(feature = "defmt")]
        defmt::info!(
            "game: level {} with {} positions",
            state.level(),
            sequence.len()
        );

        playback::play(board, sequence, state.color()).await;
        board.write_frame(&Frame::new()).await;

        let trace = match self.input.collect(board, sequence.len()).await {
            RoundInput::Complete(trace) => trace,
            RoundInput::Cancelled => {
                self.levels.on_cancel(board).await?;
                return Ok(RoundOutcome::Cancelled);
            }
        };

        match judge(sequence, &trace) {
            Verdict::Correct => match self.levels.on_correct(board).await? {
                Progress::NextLevel => Ok(RoundOutcome::Correct),
                Progress::AllCleared => Ok(RoundOutcome::AllCleared),
            },
            Verdict::Incorrect => {
                self.levels.on_incorrect(board).await?;
                Ok(RoundOutcome::Incorrect)
            }
        }
    }
}
