#![forbid(unsafe_code)]

//! Packed 1-bpp framebuffer storage.
//!
//! A [`PackedBuffer`] wraps caller-owned bytes and interprets them as a
//! monochrome bitmap, one bit per pixel, most significant bit first.
//!
//! # Layout
//!
//! Scanlines are `columns = ceil(width / 8)` bytes long and stored top to
//! bottom. Pixel `(x, y)` lives at byte `(x >> 3) + y * columns` under mask
//! `0x80 >> (x & 7)`. Padding bits at the end of a scanline are never
//! touched by bounded operations.
//!
//! # Invariants
//!
//! 1. `columns` is recomputed from `width` whenever the shape changes
//! 2. `storage.len() >= columns * height`
//! 3. The drawable window (the buffer minus its margins) is never empty

use crate::error::RenderError;
use mgfx_core::geometry::{Dim, Point, Region};

/// Bit mask selecting pixel column `x` within its byte.
#[inline]
pub const fn bitmask(x: u16) -> u8 {
    0x80 >> (x & 7)
}

/// Bytes per scanline for a given pixel width.
#[inline]
pub const fn columns_for(width: u16) -> usize {
    (width as usize).div_ceil(8)
}

/// Row-dependent fill pattern.
///
/// The complementary pairs `0xAA/0x55`, `0xCC/0x33` and `0xF0/0x0F` flip on
/// alternate rows, alternate row pairs and alternate row quads, producing
/// 1×1, 2×2 and 4×4 checkerboards. Any other pattern repeats unchanged on
/// every row.
#[inline]
pub const fn calc_row_mask(pattern: u8, y: u16) -> u8 {
    let flip = match pattern {
        0xAA | 0x55 => y & 1 != 0,
        0xCC | 0x33 => y & 2 != 0,
        0xF0 | 0x0F => y & 4 != 0,
        _ => false,
    };
    if flip { !pattern } else { pattern }
}

/// Single-pixel operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelOp {
    /// Turn the pixel on.
    #[default]
    Set,
    /// Turn the pixel off.
    Clear,
    /// Flip the pixel.
    Invert,
}

/// Byte compositing operator used by area fills and blits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlitOp {
    /// `dst | src`
    #[default]
    Set,
    /// `dst & !src`
    Clear,
    /// `dst ^ src`
    Invert,
    /// `src` replaces `dst`
    Assign,
}

impl BlitOp {
    /// Combine `bits` into `dst`, touching only the bits selected by `mask`.
    #[inline]
    pub const fn apply(self, dst: u8, bits: u8, mask: u8) -> u8 {
        match self {
            Self::Set => dst | (bits & mask),
            Self::Clear => dst & !(bits & mask),
            Self::Invert => dst ^ (bits & mask),
            Self::Assign => (dst & !mask) | (bits & mask),
        }
    }
}

impl From<PixelOp> for BlitOp {
    fn from(op: PixelOp) -> Self {
        match op {
            PixelOp::Set => Self::Set,
            PixelOp::Clear => Self::Clear,
            PixelOp::Invert => Self::Invert,
        }
    }
}

/// Insets between the physical buffer edge and the drawable window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Margins {
    /// Left (`width`) and top (`height`) insets.
    pub top_left: Dim,
    /// Right (`width`) and bottom (`height`) insets.
    pub bottom_right: Dim,
}

impl Margins {
    /// No insets: the window is the whole buffer.
    pub const NONE: Self = Self::new(Dim::new(0, 0), Dim::new(0, 0));

    /// Create margins from the two inset corners.
    #[inline]
    pub const fn new(top_left: Dim, bottom_right: Dim) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// The same inset on all four sides.
    #[inline]
    pub const fn uniform(inset: u16) -> Self {
        Self::new(Dim::new(inset, inset), Dim::new(inset, inset))
    }
}

/// A monochrome framebuffer over caller-owned bytes.
///
/// # Example
///
/// ```
/// use mgfx_core::geometry::Point;
/// use mgfx_render::PackedBuffer;
///
/// let mut bytes = [0u8; 2 * 16];
/// let mut buf = PackedBuffer::new(&mut bytes[..], 16, 16).unwrap();
/// buf.set_pixel(Point::new(9, 1));
/// assert!(buf.test_pixel(Point::new(9, 1)));
/// assert_eq!(buf.as_bytes()[3], 0x40);
/// ```
#[derive(Debug, Clone)]
pub struct PackedBuffer<S> {
    storage: S,
    width: u16,
    height: u16,
    columns: usize,
    margins: Margins,
}

impl<S: AsRef<[u8]>> PackedBuffer<S> {
    /// Wrap `storage` as a `width × height` bitmap without margins.
    pub fn new(storage: S, width: u16, height: u16) -> Result<Self, RenderError> {
        Self::with_margins(storage, width, height, Margins::NONE)
    }

    /// Wrap `storage` as a `width × height` bitmap whose drawable window is
    /// inset by `margins`.
    pub fn with_margins(
        storage: S,
        width: u16,
        height: u16,
        margins: Margins,
    ) -> Result<Self, RenderError> {
        let mut buf = Self {
            storage,
            width: 0,
            height: 0,
            columns: 0,
            margins: Margins::NONE,
        };
        buf.reshape(width, height, margins)?;
        Ok(buf)
    }

    /// Bytes of storage needed for a `width × height` bitmap.
    #[inline]
    pub const fn required_len(width: u16, height: u16) -> usize {
        columns_for(width) * height as usize
    }

    /// Reinterpret the storage with a new shape. `columns` is recomputed.
    ///
    /// On error the buffer keeps its previous shape.
    pub fn reshape(&mut self, width: u16, height: u16, margins: Margins) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroSize);
        }
        let needed = Self::required_len(width, height);
        let actual = self.storage.as_ref().len();
        if actual < needed {
            return Err(RenderError::StorageTooSmall { needed, actual });
        }
        let horizontal = margins.top_left.width as u32 + margins.bottom_right.width as u32;
        let vertical = margins.top_left.height as u32 + margins.bottom_right.height as u32;
        if horizontal >= width as u32 || vertical >= height as u32 {
            return Err(RenderError::MarginsExceedSize);
        }

        self.width = width;
        self.height = height;
        self.columns = columns_for(width);
        self.margins = margins;
        Ok(())
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per scanline.
    #[inline]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Current margins.
    #[inline]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    /// Width and height.
    #[inline]
    pub const fn dim(&self) -> Dim {
        Dim::new(self.width, self.height)
    }

    /// The whole physical buffer.
    #[inline]
    pub const fn bounds(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// The drawable window: the buffer minus its margins.
    pub const fn window(&self) -> Region {
        let m = self.margins;
        Region::new(
            m.top_left.width as i16,
            m.top_left.height as i16,
            self.width - m.top_left.width - m.bottom_right.width,
            self.height - m.top_left.height - m.bottom_right.height,
        )
    }

    /// The bitmap bytes (`columns * height` of them).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[..self.columns * self.height as usize]
    }

    /// Release the underlying storage.
    #[inline]
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub const fn offset(&self, x: u16, y: u16) -> usize {
        (x as usize >> 3) + y as usize * self.columns
    }

    /// Scanline `y`, or `None` past the bottom edge.
    pub fn row(&self, y: u16) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.columns;
        Some(&self.storage.as_ref()[start..start + self.columns])
    }

    /// Map a point into the window, or `None` if it falls outside.
    #[inline]
    pub(crate) fn locate(&self, p: Point) -> Option<(u16, u16)> {
        if self.window().contains(p) {
            Some((p.x as u16, p.y as u16))
        } else {
            None
        }
    }

    /// Test a pixel. Points outside the window read as clear.
    #[inline]
    pub fn test_pixel(&self, p: Point) -> bool {
        match self.locate(p) {
            Some((x, y)) => self.test_pixel_unchecked(x, y),
            None => false,
        }
    }

    /// Test a pixel without the window check.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `(x, y)` is outside the buffer. In release
    /// mode an out-of-range pixel either panics on the slice index or reads
    /// padding/neighbouring bits.
    #[inline]
    pub fn test_pixel_unchecked(&self, x: u16, y: u16) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.storage.as_ref()[self.offset(x, y)] & bitmask(x) != 0
    }

    /// Number of set pixels inside `region` (clipped to the window).
    pub fn count_ones(&self, region: Region) -> u32 {
        let Some(clip) = region.intersection(&self.window()) else {
            return 0;
        };
        let span = Span::of(&clip);
        let bytes = self.storage.as_ref();
        let mut total = 0;
        for y in clip.y as usize..clip.bottom() as usize {
            let row = &bytes[y * self.columns..][..self.columns];
            total += span.fold(|i, mask| (row[i] & mask).count_ones());
        }
        total
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> PackedBuffer<S> {
    /// The bitmap bytes, mutably.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.columns * self.height as usize;
        &mut self.storage.as_mut()[..len]
    }

    /// Scanline `y`, mutably.
    pub fn row_mut(&mut self, y: u16) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.columns;
        let columns = self.columns;
        Some(&mut self.storage.as_mut()[start..start + columns])
    }

    /// Zero the whole bitmap, margins included.
    pub fn clear(&mut self) {
        self.as_bytes_mut().fill(0);
    }

    /// Apply `op` to one pixel. Points outside the window are ignored.
    #[inline]
    pub fn apply_pixel(&mut self, p: Point, op: PixelOp) {
        if let Some((x, y)) = self.locate(p) {
            self.apply_pixel_unchecked(x, y, op);
        }
    }

    /// Apply `op` to one pixel without the window check.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `(x, y)` is outside the buffer.
    #[inline]
    pub fn apply_pixel_unchecked(&mut self, x: u16, y: u16, op: PixelOp) {
        debug_assert!(x < self.width && y < self.height);
        let i = self.offset(x, y);
        let byte = &mut self.storage.as_mut()[i];
        *byte = BlitOp::from(op).apply(*byte, 0xFF, bitmask(x));
    }

    /// Turn a pixel on.
    #[inline]
    pub fn set_pixel(&mut self, p: Point) {
        self.apply_pixel(p, PixelOp::Set);
    }

    /// Turn a pixel off.
    #[inline]
    pub fn clear_pixel(&mut self, p: Point) {
        self.apply_pixel(p, PixelOp::Clear);
    }

    /// Flip a pixel.
    #[inline]
    pub fn invert_pixel(&mut self, p: Point) {
        self.apply_pixel(p, PixelOp::Invert);
    }

    /// Turn a pixel on without the window check.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u16, y: u16) {
        self.apply_pixel_unchecked(x, y, PixelOp::Set);
    }

    /// Turn a pixel off without the window check.
    #[inline]
    pub fn clear_pixel_unchecked(&mut self, x: u16, y: u16) {
        self.apply_pixel_unchecked(x, y, PixelOp::Clear);
    }

    /// Flip a pixel without the window check.
    #[inline]
    pub fn invert_pixel_unchecked(&mut self, x: u16, y: u16) {
        self.apply_pixel_unchecked(x, y, PixelOp::Invert);
    }

    /// Turn on every pixel in `region`.
    pub fn set_area(&mut self, region: Region) {
        self.area_op(region, BlitOp::Set, 0xFF);
    }

    /// Turn off every pixel in `region`.
    pub fn clear_area(&mut self, region: Region) {
        self.area_op(region, BlitOp::Clear, 0xFF);
    }

    /// Flip every pixel in `region`.
    pub fn invert_area(&mut self, region: Region) {
        self.area_op(region, BlitOp::Invert, 0xFF);
    }

    /// Overwrite `region` with a dither pattern (see [`calc_row_mask`]).
    pub fn fill(&mut self, region: Region, pattern: u8) {
        self.area_op(region, BlitOp::Assign, pattern);
    }

    /// Combine a row-dependent `pattern` into `region` with `op`.
    ///
    /// The region is clipped to the window; an empty intersection is a no-op.
    /// Whole bytes between the two partial edge bytes are written directly.
    pub fn area_op(&mut self, region: Region, op: BlitOp, pattern: u8) {
        let Some(clip) = region.intersection(&self.window()) else {
            return;
        };
        let span = Span::of(&clip);
        let columns = self.columns;
        let bytes = self.storage.as_mut();
        for y in clip.y as u16..clip.bottom() as u16 {
            let bits = calc_row_mask(pattern, y);
            let row = &mut bytes[y as usize * columns..][..columns];
            span.for_each(|i, mask| row[i] = op.apply(row[i], bits, mask));
        }
    }
}

/// Byte span of a clipped horizontal pixel range, with its edge masks.
#[derive(Debug, Clone, Copy)]
struct Span {
    first: usize,
    last: usize,
    left: u8,
    right: u8,
}

impl Span {
    fn of(clip: &Region) -> Self {
        let x0 = clip.x as usize;
        let x1 = clip.right() as usize - 1;
        Self {
            first: x0 >> 3,
            last: x1 >> 3,
            left: 0xFF >> (x0 & 7),
            right: 0xFF << (7 - (x1 & 7)),
        }
    }

    #[inline]
    fn for_each(&self, mut f: impl FnMut(usize, u8)) {
        if self.first == self.last {
            f(self.first, self.left & self.right);
            return;
        }
        f(self.first, self.left);
        for i in self.first + 1..self.last {
            f(i, 0xFF);
        }
        f(self.last, self.right);
    }

    #[inline]
    fn fold(&self, mut f: impl FnMut(usize, u8) -> u32) -> u32 {
        let mut acc = 0;
        self.for_each(|i, mask| acc += f(i, mask));
        acc
    }
}
