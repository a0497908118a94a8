//! Color and intensity encoding for the LED matrix.
//!
//! Logical colors are 24-bit [`Rgb888`] values from `embedded_graphics`. The strip
//! driver takes [`RGB8`] pixels from `smart_leds`. [`encode`] converts one to the
//! other while applying a global [`Intensity`] scale, which keeps visible brightness
//! and power draw bounded no matter how bright the nominal color is.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use smart_leds::RGB8;

/// RGB color type written to the strip.
pub type Rgb = RGB8;

/// Fraction of the nominal channel value that reaches the LED, in whole percent.
///
/// Integer arithmetic keeps encoding exact: each channel becomes
/// `channel * percent / 100`, truncated.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Intensity(u8);

impl Intensity {
    /// No light at all.
    pub const OFF: Self = Self(0);

    /// Nominal color, unscaled.
    pub const FULL: Self = Self(100);

    /// Creates an intensity from a percentage, saturating at 100.
    #[must_use]
    pub const fn from_percent(percent: u8) -> Self {
        if percent > 100 { Self(100) } else { Self(percent) }
    }

    /// The percentage this intensity represents.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    fn scale_channel(self, channel: u8) -> u8 {
        // The percent is at most 100, so the result always fits in u8.
        let scaled = u16::from(channel).saturating_mul(u16::from(self.0)) / 100;
        u8::try_from(scaled).unwrap_or(u8::MAX)
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::FULL
    }
}

/// Scale `color` by `intensity` and convert it to a strip pixel.
///
/// ```rust
/// use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
/// use memory_matrix::color::{Intensity, encode};
///
/// let dimmed = encode(Rgb888::WHITE, Intensity::from_percent(10));
/// assert_eq!((dimmed.r, dimmed.g, dimmed.b), (25, 25, 25));
/// ```
#[must_use]
pub fn encode(color: Rgb888, intensity: Intensity) -> Rgb {
    Rgb::new(
        intensity.scale_channel(color.r()),
        intensity.scale_channel(color.g()),
        intensity.scale_channel(color.b()),
    )
}

/// Build an [`Rgb888`] from a packed `0xRRGGBB` value. Bits above 24 are ignored.
#[must_use]
pub const fn rgb888_from_u24(packed: u32) -> Rgb888 {
    let [_, red, green, blue] = packed.to_be_bytes();
    Rgb888::new(red, green, blue)
}

/// Pack a strip pixel back into `0xRRGGBB`.
#[must_use]
pub const fn rgb_to_u24(color: Rgb) -> u32 {
    u32::from_be_bytes([0, color.r, color.g, color.b])
}
