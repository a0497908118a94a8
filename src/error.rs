//! Crate-wide error type.

use derive_more::{Debug, Display, Error, From};

/// Errors produced by the game core and the device adapters.
///
/// The game itself has no recoverable hardware errors: collaborators are infallible at
/// the [`hardware`](crate::hardware) seam. A wrong answer is a normal state transition,
/// not an error.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A sequence was requested with more positions than the fixed capacity allows.
    #[display("sequence of {requested} positions exceeds the maximum of {max}")]
    #[from(skip)]
    SequenceTooLong {
        /// Positions requested.
        requested: usize,
        /// Capacity of a [`Sequence`](crate::sequence::Sequence).
        max: usize,
    },

    /// A status line did not fit in its fixed-capacity buffer.
    #[display("status text does not fit on the display line")]
    StatusTextTooLong(#[error(not(source))] core::fmt::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
