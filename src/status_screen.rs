//! Where the two status lines go on the 128×64 monochrome OLED.
//!
//! Drawing works on any [`DrawTarget`] with [`BinaryColor`] pixels, so the same layout
//! runs against the SSD1306 frame buffer and against an in-memory canvas in tests.

use embedded_graphics::Drawable;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Point;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Baseline, Text};

/// Top-left corner of the first line.
pub const LINE1_ORIGIN: Point = Point::new(10, 10);

/// Top-left corner of the second line.
pub const LINE2_ORIGIN: Point = Point::new(10, 30);

/// Blank `target`, then draw `line1` and `line2` in a 6×10 font.
///
/// Nothing reaches the panel until the caller flushes the buffer.
///
/// # Errors
///
/// Returns the target's error if a draw fails.
pub fn draw_status<D>(target: &mut D, line1: &str, line2: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    target.clear(BinaryColor::Off)?;
    Text::with_baseline(line1, LINE1_ORIGIN, style, Baseline::Top).draw(target)?;
    Text::with_baseline(line2, LINE2_ORIGIN, style, Baseline::Top).draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::STATUS_LINE_LEN;
    use core::convert::Infallible;
    use embedded_graphics::Pixel;
    use embedded_graphics::geometry::{OriginDimensions, Size};

    const COLS: usize = 128;
    const ROWS: usize = 64;

    struct Canvas {
        lit: [[bool; COLS]; ROWS],
        clipped: usize,
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                lit: [[false; COLS]; ROWS],
                clipped: 0,
            }
        }

        fn lit_rows(&self) -> Vec<usize> {
            (0..ROWS)
                .filter(|&row| self.lit[row].iter().any(|&on| on))
                .collect()
        }

        fn leftmost_lit_col(&self) -> Option<usize> {
            (0..COLS).find(|&col| self.lit.iter().any(|row| row[col]))
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(128, 64)
        }
    }

    impl DrawTarget for Canvas {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                let cell = usize::try_from(point.x)
                    .ok()
                    .zip(usize::try_from(point.y).ok())
                    .and_then(|(col, row)| self.lit.get_mut(row)?.get_mut(col));
                match cell {
                    Some(cell) => *cell = color.is_on(),
                    None => self.clipped += 1,
                }
            }
            Ok(())
        }
    }

    #[test]
    fn lines_land_in_their_own_bands() {
        let mut canvas = Canvas::new();

        draw_status(&mut canvas, "Level 3", "Good luck!").expect("canvas never fails");

        let rows = canvas.lit_rows();
        assert!(rows.iter().any(|row| (10..20).contains(row)));
        assert!(rows.iter().any(|row| (30..40).contains(row)));
        assert!(
            rows.iter()
                .all(|row| (10..20).contains(row) || (30..40).contains(row)),
            "{rows:?}"
        );
        assert!(canvas.leftmost_lit_col() >= Some(10));
    }

    #[test]
    fn redraw_replaces_the_previous_text() {
        let mut canvas = Canvas::new();
        draw_status(&mut canvas, "Correct!", "Next level").expect("canvas never fails");

        draw_status(&mut canvas, "", "").expect("canvas never fails");

        assert!(canvas.lit_rows().is_empty());
    }

    #[test]
    fn a_full_status_line_fits_the_panel() {
        let mut canvas = Canvas::new();
        let widest = "W".repeat(STATUS_LINE_LEN);

        draw_status(&mut canvas, &widest, &widest).expect("canvas never fails");

        assert_eq!(canvas.clipped, 0);
    }
}
