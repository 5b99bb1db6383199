#![forbid(unsafe_code)]

//! In-place row and column shifts.
//!
//! Shifting moves the pixels of a region `n` pixels in one direction.
//! Pixels pushed past the region edge are discarded and the vacated strip
//! is cleared; pixels outside the region are never touched. Transitions
//! use this to scroll the visible frame before compositing the revealed
//! strip.

use crate::packed::{BlitOp, PackedBuffer};
use crate::row::compose_row;
use mgfx_core::geometry::Region;
use smallvec::SmallVec;

/// Scratch copy of one scanline; 64 bytes covers 512 px without allocating.
type RowCopy = SmallVec<[u8; 64]>;

/// Direction of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Whether motion runs along the x axis.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> PackedBuffer<S> {
    /// Move the contents of `region` by `n` pixels towards `dir`.
    ///
    /// The region is clipped to the window first. A shift at least as long
    /// as the region clears it.
    pub fn shift(&mut self, region: Region, dir: Direction, n: u16) {
        if n == 0 {
            return;
        }
        let Some(clip) = region.intersection(&self.window()) else {
            return;
        };
        let extent = if dir.is_horizontal() {
            clip.width
        } else {
            clip.height
        };
        if n >= extent {
            self.clear_area(clip);
            return;
        }

        let x = clip.x as usize;
        let (top, w, h) = (clip.y as u16, clip.width, clip.height);
        let kept = (extent - n) as usize;
        match dir {
            Direction::Left => {
                for y in top..top + h {
                    self.copy_row(y, x + n as usize, y, x, kept);
                }
                self.clear_area(Region::new(clip.x + (w - n) as i16, clip.y, n, h));
            }
            Direction::Right => {
                for y in top..top + h {
                    self.copy_row(y, x, y, x + n as usize, kept);
                }
                self.clear_area(Region::new(clip.x, clip.y, n, h));
            }
            Direction::Up => {
                for r in 0..h - n {
                    self.copy_row(top + r + n, x, top + r, x, w as usize);
                }
                self.clear_area(Region::new(clip.x, clip.y + (h - n) as i16, w, n));
            }
            Direction::Down => {
                for r in (0..h - n).rev() {
                    self.copy_row(top + r, x, top + r + n, x, w as usize);
                }
                self.clear_area(Region::new(clip.x, clip.y, w, n));
            }
        }
    }

    /// Shift `region` left by `n` pixels.
    pub fn shift_left(&mut self, region: Region, n: u16) {
        self.shift(region, Direction::Left, n);
    }

    /// Shift `region` right by `n` pixels.
    pub fn shift_right(&mut self, region: Region, n: u16) {
        self.shift(region, Direction::Right, n);
    }

    /// Shift `region` up by `n` pixels.
    pub fn shift_up(&mut self, region: Region, n: u16) {
        self.shift(region, Direction::Up, n);
    }

    /// Shift `region` down by `n` pixels.
    pub fn shift_down(&mut self, region: Region, n: u16) {
        self.shift(region, Direction::Down, n);
    }

    /// Copy `width` pixels from `(src_x, src_y)` to `(dst_x, dst_y)`.
    ///
    /// The source scanline is snapshotted first, so overlapping ranges on
    /// the same row are safe.
    fn copy_row(&mut self, src_y: u16, src_x: usize, dst_y: u16, dst_x: usize, width: usize) {
        let Some(src) = self.row(src_y).map(RowCopy::from_slice) else {
            return;
        };
        if let Some(dst) = self.row_mut(dst_y) {
            compose_row(dst, dst_x, &src, src_x, width, BlitOp::Assign);
        }
    }
}
