//! Sequence generation and judging.
//!
//! A [`Sequence`] is the pattern the device plays; a [`Trace`] is what the player
//! entered. Both hold at most [`SEQUENCE_MAX_LEN`] positions.

use core::ops::Deref;

use heapless::Vec;
use rand::Rng;

use crate::config::{HEIGHT, SEQUENCE_MAX_LEN, WIDTH};
use crate::matrix::Position;
use crate::{Error, Result};

/// The target pattern for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence(Vec<Position, SEQUENCE_MAX_LEN>);

impl Sequence {
    /// Draw `len` positions, each column and row uniform and independent of the rest.
    ///
    /// Repeats, including back-to-back repeats, are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceTooLong`] if `len` exceeds [`SEQUENCE_MAX_LEN`].
    pub fn generate(rng: &mut impl Rng, len: usize) -> Result<Self> {
        if len > SEQUENCE_MAX_LEN {
            return Err(Error::SequenceTooLong {
                requested: len,
                max: SEQUENCE_MAX_LEN,
            });
        }
        let mut positions = Vec::new();
        for _ in 0..len {
            let col = rng.gen_range(0..WIDTH);
            let row = rng.gen_range(0..HEIGHT);
            // Capacity was checked above.
            let _ = positions.push(Position::new(col, row));
        }
        Ok(Self(positions))
    }

    /// Build a sequence from known positions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceTooLong`] if there are more than [`SEQUENCE_MAX_LEN`].
    pub fn from_positions(positions: &[Position]) -> Result<Self> {
        Vec::from_slice(positions)
            .map(Self)
            .map_err(|()| Error::SequenceTooLong {
                requested: positions.len(),
                max: SEQUENCE_MAX_LEN,
            })
    }
}

impl Deref for Sequence {
    type Target = [Position];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The positions the player has confirmed so far this round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace(Vec<Position, SEQUENCE_MAX_LEN>);

impl Trace {
    /// An empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record one more position. Returns `false` if the trace is already full.
    pub fn record(&mut self, position: Position) -> bool {
        self.0.push(position).is_ok()
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Deref for Trace {
    type Target = [Position];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Outcome of comparing a trace to its sequence.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Every position matched, in order.
    Correct,
    /// Some position differed, or the lengths differ.
    Incorrect,
}

/// Compare `actual` against `expected` element by element. There is no partial credit.
#[must_use]
pub fn judge(expected: &[Position], actual: &[Position]) -> Verdict {
    if expected == actual {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}
