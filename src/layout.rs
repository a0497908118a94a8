//! Compile-time description of matrix wiring: which strip LED sits at each `(col, row)`.

/// Maps the `(col, row)` cells of a `W`×`H` panel to the `N` LEDs of its strip.
///
/// `(0, 0)` is the top-left cell. The table is built in a `const` context, so a layout
/// whose dimensions disagree with `N` fails to compile.
///
/// ```rust
/// use memory_matrix::layout::LedLayout;
///
/// // LED0  LED1  LED2
/// // LED5  LED4  LED3
/// const MAP: LedLayout<6, 3, 2> = LedLayout::serpentine_row_major();
/// const _: () = assert!(MAP.index_of(0, 1) == 5);
///
/// assert_eq!(MAP.index_to_xy()[3], (2, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u16, u16); N],
    index: [u16; N],
}

impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// `(col, row)` of each LED, in strip order.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u16, u16); N] {
        &self.map
    }

    /// Strip index of the LED at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `col >= W` or `row >= H`.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "cell bounds asserted; W * H == N checked at construction"
    )]
    pub const fn index_of(&self, col: usize, row: usize) -> usize {
        assert!(col < W && row < H, "(col, row) outside the layout");
        self.index[row * W + col] as usize
    }

    /// A strip that snakes across rows: even rows run left to right, odd rows right to
    /// left, starting at the top-left cell.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        reason = "const table construction; N fits u16 and every cell is below W * H"
    )]
    pub const fn serpentine_row_major() -> Self {
        assert!(W > 0 && H > 0, "layout needs at least one cell");
        assert!(W * H == N, "W * H must equal N");
        assert!(N <= u16::MAX as usize, "strip index must fit in u16");

        let mut map = [(0_u16, 0_u16); N];
        let mut index = [0_u16; N];
        let mut row = 0;
        while row < H {
            let mut col = 0;
            while col < W {
                let along_row = if row % 2 == 0 { col } else { W - 1 - col };
                let led = row * W + along_row;
                map[led] = (col as u16, row as u16);
                index[row * W + col] = led as u16;
                col += 1;
            }
            row += 1;
        }
        Self { map, index }
    }
}
