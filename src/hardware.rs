//! Collaborator traits the game core is written against.
//!
//! Each trait covers one external driver. The device implements all of them in
//! [`PicoBoard`](crate::board::PicoBoard); host tests use
//! [`HostBoard`](crate::host_board::HostBoard). Drivers are treated as always
//! succeeding, so none of these methods return errors.
//!
//! Timing goes through [`DelayNs`] (`embassy_time::Delay` on the device).

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::matrix::Frame;

/// A joystick axis.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Left/right. Raw readings are inverted relative to cursor columns.
    Horizontal,
    /// Up/down.
    Vertical,
}

/// The two push buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Records the cursor position (button A).
    Confirm,
    /// Abandons the round and restarts at level 1 (button B).
    Cancel,
}

/// The two status LEDs.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// Green LED, lit after a correct round.
    Success,
    /// Red LED, lit after a wrong round.
    Failure,
}

/// A note for the buzzer. A frequency of 0 is silence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tone {
    /// Pitch in hertz.
    pub frequency_hz: u32,
    /// How long the note sounds.
    pub duration: Duration,
}

impl Tone {
    /// Creates a tone.
    #[must_use]
    pub const fn new(frequency_hz: u32, duration: Duration) -> Self {
        Self {
            frequency_hz,
            duration,
        }
    }
}

/// Pushes whole frames to the LED matrix.
pub trait LedMatrix {
    /// Send every LED of `frame` to the strip.
    async fn write_frame(&mut self, frame: &Frame);
}

/// Reads the analog joystick.
pub trait Joystick {
    /// Raw reading for `axis`, `0..=AXIS_MAX`, centered near `AXIS_CENTER`.
    async fn read_axis(&mut self, axis: Axis) -> u16;
}

/// Reads the push buttons.
pub trait Buttons {
    /// Whether `button` is held down right now. Wiring polarity is the driver's concern.
    fn is_pressed(&mut self, button: ButtonId) -> bool;
}

/// Drives the status LEDs.
pub trait Indicators {
    /// Turn `indicator` on or off.
    fn set_indicator(&mut self, indicator: Indicator, on: bool);
}

/// Drives the buzzer.
pub trait Buzzer {
    /// Sound `tone` and return when it has finished.
    async fn play_tone(&mut self, tone: Tone);
}

/// Two-line status text output.
pub trait StatusDisplay {
    /// Replace whatever is shown with `line1` over `line2`.
    async fn show_text(&mut self, line1: &str, line2: &str);
}

/// Everything the game loop needs from the device.
pub trait Board:
    LedMatrix + Joystick + Buttons + Indicators + Buzzer + StatusDisplay + DelayNs
{
}

impl<T> Board for T where
    T: LedMatrix + Joystick + Buttons + Indicators + Buzzer + StatusDisplay + DelayNs
{
}

/// Wait for `duration` on `delay`.
pub async fn hold(delay: &mut impl DelayNs, duration: Duration) {
    let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
    delay.delay_us(micros).await;
}
