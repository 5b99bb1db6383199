#![forbid(unsafe_code)]

//! Span flood fill ("pour").
//!
//! Starting from a seed, the fill finds the horizontal span of matching
//! pixels on the seed's row, flips the whole span at once, then scans the
//! rows directly above and below that span for further matching runs. Each
//! run found becomes a new seed on an explicit work stack, so stack depth
//! tracks the number of horizontal bands in the region rather than its
//! pixel count. Connectivity is 4-way.

use crate::packed::{BlitOp, PackedBuffer, PixelOp};
use mgfx_core::geometry::{Point, Region};
use smallvec::SmallVec;

type SeedStack = SmallVec<[(u16, u16); 32]>;

impl<S: AsRef<[u8]> + AsMut<[u8]>> PackedBuffer<S> {
    /// Flood-fill the region connected to `seed` and return the number of
    /// pixels changed.
    ///
    /// The operator selects which pixels are filled: [`PixelOp::Set`] fills
    /// clear pixels, [`PixelOp::Clear`] empties set pixels, and
    /// [`PixelOp::Invert`] flips the region sharing the seed's value. A
    /// seed outside the window, or one that already has the result value,
    /// fills nothing.
    pub fn pour(&mut self, seed: Point, op: PixelOp) -> u32 {
        let Some((sx, sy)) = self.locate(seed) else {
            return 0;
        };
        let target = match op {
            PixelOp::Set => false,
            PixelOp::Clear => true,
            PixelOp::Invert => self.test_pixel_unchecked(sx, sy),
        };
        if self.test_pixel_unchecked(sx, sy) != target {
            return 0;
        }

        let span = mgfx_core::debug_span!("pour", x = sx, y = sy);
        let _guard = span.enter();

        let flip = if target { BlitOp::Clear } else { BlitOp::Set };
        let window = self.window();
        let top = window.y as u16;
        let bottom = window.bottom() as u16;

        let mut stack = SeedStack::new();
        stack.push((sx, sy));
        let mut filled = 0u32;

        while let Some((x, y)) = stack.pop() {
            if self.test_pixel_unchecked(x, y) != target {
                continue;
            }
            let (left, right) = self.hedge(x, y, target);
            let len = right - left + 1;
            self.area_op(Region::new(left as i16, y as i16, len, 1), flip, 0xFF);
            filled += len as u32;

            if y > top {
                self.scan_runs(left, right, y - 1, target, &mut stack);
            }
            if y + 1 < bottom {
                self.scan_runs(left, right, y + 1, target, &mut stack);
            }
        }

        mgfx_core::trace!(filled, "pour finished");
        filled
    }

    /// Widen `(x, y)` to the maximal run of `target` pixels on its row,
    /// bounded by the window. Returns inclusive ends.
    fn hedge(&self, x: u16, y: u16, target: bool) -> (u16, u16) {
        let window = self.window();
        let min_x = window.x as u16;
        let max_x = (window.right() - 1) as u16;

        let mut left = x;
        while left > min_x && self.test_pixel_unchecked(left - 1, y) == target {
            left -= 1;
        }
        let mut right = x;
        while right < max_x && self.test_pixel_unchecked(right + 1, y) == target {
            right += 1;
        }
        (left, right)
    }

    /// Push one seed per run of `target` pixels on row `y` within
    /// `left..=right`.
    fn scan_runs(&self, left: u16, right: u16, y: u16, target: bool, stack: &mut SeedStack) {
        let mut in_run = false;
        for x in left..=right {
            let hit = self.test_pixel_unchecked(x, y) == target;
            if hit && !in_run {
                stack.push((x, y));
            }
            in_run = hit;
        }
    }
}
