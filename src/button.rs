//! A device abstraction for push buttons wired between a GPIO pin and ground.
//!
//! Debouncing happens in the game's input loop, which only needs the raw level.
//! See [`Button`] for usage.

use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pin, Pull};

/// A push button that pulls its pin to ground when pressed.
///
/// The pin's internal pull-up holds it high while the button is up.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use memory_matrix::button::Button;
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// fn example(p: embassy_rp::Peripherals) {
///     let confirm = Button::new(p.PIN_5);
///     if confirm.is_pressed() {
///         // ...
///     }
/// }
/// ```
pub struct Button<'a> {
    input: Input<'a>,
}

impl<'a> Button<'a> {
    /// Configure `pin` as a pulled-up input.
    #[must_use]
    pub fn new<P: Pin>(pin: Peri<'a, P>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }

    /// Returns whether the button is currently pressed.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.input.is_low()
    }
}
