//! The game's LED matrix: cell positions, the matrix wiring, and the frame buffer.

use core::ops::Deref;

use embedded_graphics::pixelcolor::Rgb888;

use crate::color::{Intensity, Rgb, encode};
use crate::config::{HEIGHT, LED_COUNT, WIDTH};
use crate::layout::LedLayout;

/// Wiring of the game matrix: a serpentine strip snaking across rows.
pub const MATRIX_LAYOUT: LedLayout<LED_COUNT, WIDTH, HEIGHT> = LedLayout::serpentine_row_major();

/// A cell of the matrix, `col` in `0..WIDTH` and `row` in `0..HEIGHT`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    col: usize,
    row: usize,
}

impl Position {
    /// Creates a position.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the matrix.
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        assert!(col < WIDTH && row < HEIGHT, "position outside the matrix");
        Self { col, row }
    }

    /// Creates a position, clamping each coordinate to the matrix bounds.
    #[must_use]
    pub const fn clamped(col: isize, row: isize) -> Self {
        Self::new(clamp_axis(col, WIDTH), clamp_axis(row, HEIGHT))
    }

    /// This position moved by `(delta_col, delta_row)`, stopping at the matrix edges.
    #[must_use]
    pub const fn stepped(self, delta_col: isize, delta_row: isize) -> Self {
        Self::new(
            clamp_index(self.col.saturating_add_signed(delta_col), WIDTH),
            clamp_index(self.row.saturating_add_signed(delta_row), HEIGHT),
        )
    }

    /// The matrix center, where the cursor starts every round.
    #[must_use]
    pub const fn center() -> Self {
        Self::new(WIDTH / 2, HEIGHT / 2)
    }

    /// Column, counted from the left.
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Row, counted from the top.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Index of this cell's LED on the strip.
    #[must_use]
    pub const fn led_index(self) -> usize {
        MATRIX_LAYOUT.index_of(self.col(), self.row())
    }
}

const fn clamp_axis(value: isize, len: usize) -> usize {
    if value < 0 {
        0
    } else {
        clamp_index(value.unsigned_abs(), len)
    }
}

const fn clamp_index(value: usize, len: usize) -> usize {
    if value < len {
        value
    } else {
        len.saturating_sub(1)
    }
}

/// One full image for the matrix, in strip order.
///
/// The strip protocol has no partial updates, so every flush sends a whole `Frame`.
/// Frames deref to `[Rgb; LED_COUNT]` for reading pixels in strip order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame(pub [Rgb; LED_COUNT]);

impl Frame {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([Rgb::new(0, 0, 0); LED_COUNT])
    }

    /// Turn every LED off.
    pub fn clear(&mut self) {
        self.0 = [Rgb::new(0, 0, 0); LED_COUNT];
    }

    /// Set the LED at `position` to `color` scaled by `intensity`.
    pub fn set(&mut self, position: Position, color: Rgb888, intensity: Intensity) {
        if let Some(pixel) = self.0.get_mut(position.led_index()) {
            *pixel = encode(color, intensity);
        }
    }

    /// Color of the LED at `position`.
    #[must_use]
    pub fn get(&self, position: Position) -> Rgb {
        self.0
            .get(position.led_index())
            .copied()
            .unwrap_or_default()
    }

    /// Create a frame with a single lit cell.
    #[must_use]
    pub fn single(position: Position, color: Rgb888, intensity: Intensity) -> Self {
        let mut frame = Self::new();
        frame.set(position, color, intensity);
        frame
    }

    /// Positions of every LED that is not black.
    pub fn lit(&self) -> impl Iterator<Item = Position> + '_ {
        (0..HEIGHT)
            .flat_map(|row| (0..WIDTH).map(move |col| Position::new(col, row)))
            .filter(|position| self.get(*position) != Rgb::new(0, 0, 0))
    }
}

impl Deref for Frame {
    type Target = [Rgb; LED_COUNT];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
