#![forbid(unsafe_code)]

//! Bitmap-to-bitmap compositing.
//!
//! A source region is composited onto a destination at any pixel position,
//! including positions that are not byte aligned. Both sides are clipped:
//! the source area to the source window and the placed rectangle to the
//! destination window. Rows stop as soon as either buffer runs out.
//!
//! ```
//! use mgfx_core::geometry::Point;
//! use mgfx_render::{BlitOp, PackedBuffer};
//!
//! let glyph = PackedBuffer::new([0xFFu8; 8], 8, 8).unwrap();
//! let mut screen = PackedBuffer::new([0u8; 16], 16, 8).unwrap();
//! screen.blit(Point::new(3, 0), &glyph, BlitOp::Set);
//! assert_eq!(&screen.as_bytes()[..2], &[0x1F, 0xE0]);
//! ```

use crate::packed::{BlitOp, PackedBuffer};
use crate::row::compose_row;
use mgfx_core::geometry::{Point, Region};

impl<S: AsRef<[u8]> + AsMut<[u8]>> PackedBuffer<S> {
    /// Composite `area` of `src` so that its top-left lands on `at`.
    pub fn blit_area<T: AsRef<[u8]>>(
        &mut self,
        at: Point,
        src: &PackedBuffer<T>,
        area: Region,
        op: BlitOp,
    ) {
        let Some(source) = area.intersection(&src.window()) else {
            return;
        };
        // Keep the placement consistent when the source area was clipped.
        let dx = at.x as i32 + (source.x as i32 - area.x as i32);
        let dy = at.y as i32 + (source.y as i32 - area.y as i32);
        let Some(placed) = place(dx, dy, source.width, source.height) else {
            return;
        };
        let Some(target) = placed.intersection(&self.window()) else {
            return;
        };

        let sx = (source.x as i32 + (target.x as i32 - dx)) as usize;
        let sy = (source.y as i32 + (target.y as i32 - dy)) as u16;
        let width = target.width as usize;
        let tx = target.x as usize;

        for row in 0..target.height {
            let (Some(src_row), Some(dst_row)) =
                (src.row(sy + row), self.row_mut(target.y as u16 + row))
            else {
                break;
            };
            compose_row(dst_row, tx, src_row, sx, width, op);
        }
    }

    /// Composite the whole window of `src` at `at`.
    pub fn blit<T: AsRef<[u8]>>(&mut self, at: Point, src: &PackedBuffer<T>, op: BlitOp) {
        self.blit_area(at, src, src.window(), op);
    }

    /// OR `src` into this buffer.
    pub fn set_bitmap<T: AsRef<[u8]>>(&mut self, at: Point, src: &PackedBuffer<T>) {
        self.blit(at, src, BlitOp::Set);
    }

    /// Clear every pixel that is set in `src`.
    pub fn clear_bitmap<T: AsRef<[u8]>>(&mut self, at: Point, src: &PackedBuffer<T>) {
        self.blit(at, src, BlitOp::Clear);
    }

    /// XOR `src` into this buffer.
    pub fn invert_bitmap<T: AsRef<[u8]>>(&mut self, at: Point, src: &PackedBuffer<T>) {
        self.blit(at, src, BlitOp::Invert);
    }

    /// Overwrite the covered rectangle with `src`.
    pub fn assign_bitmap<T: AsRef<[u8]>>(&mut self, at: Point, src: &PackedBuffer<T>) {
        self.blit(at, src, BlitOp::Assign);
    }

    /// OR `area` of `src` into this buffer.
    pub fn set_bitmap_area<T: AsRef<[u8]>>(&mut self, at: Point, src: &PackedBuffer<T>, area: Region) {
        self.blit_area(at, src, area, BlitOp::Set);
    }

    /// Clear every pixel that is set in `area` of `src`.
    pub fn clear_bitmap_area<T: AsRef<[u8]>>(
        &mut self,
        at: Point,
        src: &PackedBuffer<T>,
        area: Region,
    ) {
        self.blit_area(at, src, area, BlitOp::Clear);
    }

    /// XOR `area` of `src` into this buffer.
    pub fn invert_bitmap_area<T: AsRef<[u8]>>(
        &mut self,
        at: Point,
        src: &PackedBuffer<T>,
        area: Region,
    ) {
        self.blit_area(at, src, area, BlitOp::Invert);
    }

    /// Overwrite the covered rectangle with `area` of `src`.
    pub fn assign_bitmap_area<T: AsRef<[u8]>>(
        &mut self,
        at: Point,
        src: &PackedBuffer<T>,
        area: Region,
    ) {
        self.blit_area(at, src, area, BlitOp::Assign);
    }
}

/// The rectangle a blit covers, trimmed to the `i16` coordinate range.
fn place(x: i32, y: i32, width: u16, height: u16) -> Option<Region> {
    let lo = i16::MIN as i32;
    let x0 = x.max(lo);
    let y0 = y.max(lo);
    let x1 = (x + width as i32).min(i16::MAX as i32);
    let y1 = (y + height as i32).min(i16::MAX as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Region::new(
        x0 as i16,
        y0 as i16,
        (x1 - x0) as u16,
        (y1 - y0) as u16,
    ))
}
