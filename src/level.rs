//! Level progression and round feedback.
//!
//! [`LevelController`] owns the [`GameState`]; its `on_*` methods are the only way the
//! level or sequence length changes.

use core::fmt::Write as _;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::Result;
use crate::config::{
    FAILURE_CHIME, FEEDBACK_HOLD, FIRST_LEVEL, NOTE_GAP, PALETTE, SEQUENCE_MAX_LEN,
    SEQUENCE_START_LEN, SUCCESS_CHIME,
};
use crate::hardware::{Buzzer, Indicator, Indicators, StatusDisplay, Tone, hold};

/// Characters that fit on one line of the status display.
pub const STATUS_LINE_LEN: usize = 16;

/// Level and sequence length for the session. Reset on failure or cancel.
///
/// The sequence length never leaves `SEQUENCE_START_LEN..=SEQUENCE_MAX_LEN`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameState {
    level: u16,
    sequence_len: usize,
}

impl GameState {
    /// Level 1 with the starting sequence length.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: FIRST_LEVEL,
            sequence_len: SEQUENCE_START_LEN,
        }
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u16 {
        self.level
    }

    /// Positions in this level's sequence.
    #[must_use]
    pub const fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    /// Playback color for this level, cycling through [`PALETTE`].
    #[must_use]
    pub fn color(&self) -> Rgb888 {
        PALETTE
            .iter()
            .cycle()
            .nth(usize::from(self.level.saturating_sub(1)))
            .copied()
            .unwrap_or(Rgb888::BLACK)
    }

    /// Whether this level already plays the longest sequence a round can hold.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.sequence_len >= SEQUENCE_MAX_LEN
    }

    const fn advance(&mut self) {
        self.level = self.level.saturating_add(1);
        self.sequence_len = self.sequence_len.saturating_add(1);
    }

    const fn restart(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a correct round took the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Progress {
    /// Up one level, with one more position to remember.
    NextLevel,
    /// The final level fell; the game is back at level 1.
    AllCleared,
}

/// Applies round results to the [`GameState`] and drives the feedback hardware.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LevelController {
    state: GameState,
}

impl LevelController {
    /// Start at level 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// The current level and sequence length.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Show the current level on the status display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatusTextTooLong`](crate::Error::StatusTextTooLong) if the banner
    /// does not fit on one display line.
    pub async fn show_level(&self, board: &mut impl StatusDisplay) -> Result<()> {
        let mut line1: String<STATUS_LINE_LEN> = String::new();
        write!(line1, "Level {}", self.state.level)?;
        board.show_text(&line1, "Good luck!").await;
        Ok(())
    }

    /// Celebrate a correct round, then move up one level with one more position.
    ///
    /// The green indicator stays on through the rising chime and a hold. A correct round
    /// on the final level goes to [`on_all_cleared`](Self::on_all_cleared) instead.
    ///
    /// # Errors
    ///
    /// See [`show_level`](Self::show_level).
    pub async fn on_correct<B>(&mut self, board: &mut B) -> Result<Progress>
    where
        B: Indicators + Buzzer + StatusDisplay + DelayNs,
    {
        if self.state.is_final() {
            self.on_all_cleared(board).await?;
            return Ok(Progress::AllCleared);
        }

        board.set_indicator(Indicator::Success, true);
        board.show_text("Correct!", "Next level").await;
        play_chime(board, &SUCCESS_CHIME).await;
        hold(board, FEEDBACK_HOLD).await;
        board.set_indicator(Indicator::Success, false);

        self.state.advance();
        #[cfg(feature = "defmt")]
        defmt::info!("level: up to {}", self.state);
        self.show_level(board).await?;
        Ok(Progress::NextLevel)
    }

    /// Signal a wrong round, then go back to level 1.
    ///
    /// The red indicator stays on through the falling chime and a hold.
    ///
    /// # Errors
    ///
    /// See [`show_level`](Self::show_level).
    pub async fn on_incorrect<B>(&mut self, board: &mut B) -> Result<()>
    where
        B: Indicators + Buzzer + StatusDisplay + DelayNs,
    {
        board.set_indicator(Indicator::Failure, true);
        board.show_text("Wrong!", "Back to level 1").await;
        play_chime(board, &FAILURE_CHIME).await;
        hold(board, FEEDBACK_HOLD).await;
        board.set_indicator(Indicator::Failure, false);

        self.state.restart();
        #[cfg(feature = "defmt")]
        defmt::info!("level: reset after a wrong round");
        self.show_level(board).await
    }

    /// Go back to level 1 silently after the player cancels.
    ///
    /// # Errors
    ///
    /// See [`show_level`](Self::show_level).
    pub async fn on_cancel(&mut self, board: &mut impl StatusDisplay) -> Result<()> {
        self.state.restart();
        #[cfg(feature = "defmt")]
        defmt::info!("level: reset by cancel");
        self.show_level(board).await
    }

    /// The player has beaten the longest sequence: celebrate and start over.
    ///
    /// # Errors
    ///
    /// See [`show_level`](Self::show_level).
    pub async fn on_all_cleared<B>(&mut self, board: &mut B) -> Result<()>
    where
        B: Indicators + Buzzer + StatusDisplay + DelayNs,
    {
        board.set_indicator(Indicator::Success, true);
        board.show_text("You win!", "Starting over").await;
        play_chime(board, &SUCCESS_CHIME).await;
        hold(board, NOTE_GAP).await;
        play_chime(board, &SUCCESS_CHIME).await;
        hold(board, FEEDBACK_HOLD).await;
        board.set_indicator(Indicator::Success, false);

        self.state.restart();
        #[cfg(feature = "defmt")]
        defmt::info!("level: every level cleared, starting over");
        self.show_level(board).await
    }
}

async fn play_chime<B: Buzzer + DelayNs>(board: &mut B, notes: &[Tone]) {
    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            hold(board, NOTE_GAP).await;
        }
        board.play_tone(*note).await;
    }
}
