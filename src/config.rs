//! Fixed game configuration: matrix geometry, palette, timing and input thresholds.
//!
//! These values are compile-time constants. Nothing here is tuned at runtime.

use embassy_time::Duration;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::color::Intensity;
use crate::hardware::Tone;

// ============================================================================
// Matrix
// ============================================================================

/// Number of matrix columns.
pub const WIDTH: usize = 5;

/// Number of matrix rows.
pub const HEIGHT: usize = 5;

/// Number of LEDs on the serpentine-wired strip behind the matrix.
pub const LED_COUNT: usize = WIDTH * HEIGHT;

// ============================================================================
// Levels and sequences
// ============================================================================

/// Level shown when a game starts or restarts.
pub const FIRST_LEVEL: u16 = 1;

/// Sequence length at [`FIRST_LEVEL`].
pub const SEQUENCE_START_LEN: usize = 2;

/// Capacity of a [`Sequence`](crate::sequence::Sequence).
pub const SEQUENCE_MAX_LEN: usize = 10;

/// Level colors, cycled with `(level - 1) % PALETTE.len()`.
pub const PALETTE: [Rgb888; 6] = [
    Rgb888::BLUE,
    Rgb888::YELLOW,
    Rgb888::MAGENTA,
    Rgb888::CYAN,
    Rgb888::GREEN,
    Rgb888::RED,
];

/// Global scale applied to sequence colors to keep current draw low.
pub const INTENSITY: Intensity = Intensity::from_percent(10);

/// Cursor highlight, drawn undimmed.
pub const CURSOR_COLOR: Rgb888 = Rgb888::WHITE;

// ============================================================================
// Playback timing
// ============================================================================

/// How long each sequence cell stays lit.
pub const STEP_ON: Duration = Duration::from_millis(500);

/// Dark gap after each lit cell (half of [`STEP_ON`]).
pub const STEP_OFF: Duration = Duration::from_millis(250);

// ============================================================================
// Input
// ============================================================================

/// Largest raw reading of the 12-bit joystick ADC.
pub const AXIS_MAX: u16 = 4095;

/// Raw reading of a joystick axis at rest.
pub const AXIS_CENTER: u16 = 2048;

/// Deviation from [`AXIS_CENTER`] that must be exceeded before the cursor moves.
pub const DEAD_ZONE: u16 = 2000;

/// Cells moved per tick when an axis is outside the dead zone.
pub const CURSOR_STEP: isize = 1;

/// Pause at the end of every input tick.
pub const TICK: Duration = Duration::from_millis(50);

/// Polling interval while waiting on a button level.
pub const BUTTON_POLL: Duration = Duration::from_millis(1);

/// A button level must hold this long to count as stable.
pub const BUTTON_DEBOUNCE: Duration = Duration::from_millis(10);

// ============================================================================
// Feedback
// ============================================================================

/// Indicator hold after the chime finishes.
pub const FEEDBACK_HOLD: Duration = Duration::from_millis(1000);

/// Silence between chime notes.
pub const NOTE_GAP: Duration = Duration::from_millis(50);

/// Ascending C-E-G chime played after a correct round.
pub const SUCCESS_CHIME: [Tone; 3] = [
    Tone::new(262, Duration::from_millis(300)),
    Tone::new(330, Duration::from_millis(300)),
    Tone::new(392, Duration::from_millis(400)),
];

/// Descending two-note chime played after a wrong round.
pub const FAILURE_CHIME: [Tone; 2] = [
    Tone::new(300, Duration::from_millis(200)),
    Tone::new(200, Duration::from_millis(300)),
];
