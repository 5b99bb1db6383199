#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Pixel coordinates are signed (`i16`) so that transformed primitives may
//! land partly off-buffer; extents are unsigned (`u16`). The origin is the
//! top-left corner of the framebuffer.

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Component-wise saturating add.
    #[inline]
    pub const fn offset(self, dx: i16, dy: i16) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(i16, i16)> for Point {
    fn from((x, y): (i16, i16)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dim {
    pub width: u16,
    pub height: u16,
}

impl Dim {
    /// Create a new dimension.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if either side is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u16, u16)> for Dim {
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(width, height)
    }
}

/// A rectangular pixel area: a top-left point plus a dimension.
///
/// The right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// Left edge (inclusive).
    pub x: i16,
    /// Top edge (inclusive).
    pub y: i16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl Region {
    /// Create a new region.
    #[inline]
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a region from a point and a dimension.
    #[inline]
    pub const fn from_parts(origin: Point, dim: Dim) -> Self {
        Self::new(origin.x, origin.y, dim.width, dim.height)
    }

    /// Create a region anchored at the origin.
    #[inline]
    pub const fn from_dim(dim: Dim) -> Self {
        Self::new(0, 0, dim.width, dim.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn dim(&self) -> Dim {
        Dim::new(self.width, self.height)
    }

    /// Right edge (exclusive), widened so it never overflows.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x as i32 + self.width as i32
    }

    /// Bottom edge (exclusive), widened so it never overflows.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y as i32 + self.height as i32
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the region has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point lies inside the region.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        let (x, y) = (p.x as i32, p.y as i32);
        x >= self.x as i32 && x < self.right() && y >= self.y as i32 && y < self.bottom()
    }

    /// Intersection with another region, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let x0 = (self.x as i32).max(other.x as i32);
        let y0 = (self.y as i32).max(other.y as i32);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
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
}

/// Running top-left / bottom-right accumulator.
///
/// Starts empty; every [`include`](Bounds::include) grows the box to cover
/// the point. Both corners are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    extent: Option<(Point, Point)>,
}

impl Bounds {
    /// An empty accumulator.
    #[inline]
    pub const fn new() -> Self {
        Self { extent: None }
    }

    /// Grow the box to include `p`.
    pub fn include(&mut self, p: Point) {
        self.extent = Some(match self.extent {
            None => (p, p),
            Some((tl, br)) => (
                Point::new(tl.x.min(p.x), tl.y.min(p.y)),
                Point::new(br.x.max(p.x), br.y.max(p.y)),
            ),
        });
    }

    /// Merge another accumulator into this one.
    pub fn merge(&mut self, other: &Bounds) {
        if let Some((tl, br)) = other.extent {
            self.include(tl);
            self.include(br);
        }
    }

    /// Whether nothing has been included yet.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// Top-left corner, if any point was included.
    #[inline]
    pub fn top_left(&self) -> Option<Point> {
        self.extent.map(|(tl, _)| tl)
    }

    /// Bottom-right corner (inclusive), if any point was included.
    #[inline]
    pub fn bottom_right(&self) -> Option<Point> {
        self.extent.map(|(_, br)| br)
    }

    /// The covered area as a region (corners inclusive).
    pub fn region(&self) -> Option<Region> {
        self.extent.map(|(tl, br)| {
            let w = (br.x as i32 - tl.x as i32 + 1).min(u16::MAX as i32) as u16;
            let h = (br.y as i32 - tl.y as i32 + 1).min(u16::MAX as i32) as u16;
            Region::new(tl.x, tl.y, w, h)
        })
    }
}
