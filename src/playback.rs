//! Plays a sequence on the matrix, one blink per position.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_hal_async::delay::DelayNs;

use crate::config::{INTENSITY, STEP_OFF, STEP_ON};
use crate::hardware::{LedMatrix, hold};
use crate::matrix::{Frame, Position};

/// Blink each position of `sequence` in `color`, in order.
///
/// Every step lights exactly one cell for [`STEP_ON`], then shows a dark frame for
/// [`STEP_OFF`], so repeated positions still read as separate blinks. All steps always
/// play; the matrix receives `2 * sequence.len()` frames and ends dark.
pub async fn play<M>(board: &mut M, sequence: &[Position], color: Rgb888)
where
    M: LedMatrix + DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::debug!("playback: {} steps", sequence.len());

    let dark = Frame::new();
    for &position in sequence {
        board
            .write_frame(&Frame::single(position, color, INTENSITY))
            .await;
        hold(board, STEP_ON).await;

        board.write_frame(&dark).await;
        hold(board, STEP_OFF).await;
    }
}
