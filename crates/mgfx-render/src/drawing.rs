#![forbid(unsafe_code)]

//! Line drawing on packed buffers.
//!
//! Horizontal and vertical lines go straight to the area operations. Other
//! lines step one pixel at a time along their longer axis and place the
//! other coordinate by rounded linear interpolation, so a line and its
//! reverse cover exactly the same pixels.
//!
//! Lines whose endpoints both lie inside the window take the unchecked
//! pixel path; everything else is clipped pixel by pixel.

use crate::packed::{PackedBuffer, PixelOp};
use mgfx_core::geometry::{Point, Region};

/// Extension trait for drawing lines on a buffer.
pub trait Draw {
    /// Draw a horizontal run of `len` pixels starting at `(x, y)`.
    fn hline(&mut self, x: i16, y: i16, len: u16, op: PixelOp);

    /// Draw a vertical run of `len` pixels starting at `(x, y)`.
    fn vline(&mut self, x: i16, y: i16, len: u16, op: PixelOp);

    /// Draw a 1px line between two points, both ends inclusive.
    fn line(&mut self, from: Point, to: Point, op: PixelOp);

    /// Draw a line `thickness` pixels wide.
    ///
    /// Extra width is added as parallel 1px lines offset perpendicular to
    /// the line's major axis, centred on the nominal line. A thickness of 0
    /// draws like 1.
    fn thick_line(&mut self, from: Point, to: Point, thickness: u8, op: PixelOp);

    /// Draw the 1px outline of a region.
    fn rect_outline(&mut self, region: Region, op: PixelOp);
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Draw for PackedBuffer<S> {
    fn hline(&mut self, x: i16, y: i16, len: u16, op: PixelOp) {
        self.area_op(Region::new(x, y, len, 1), op.into(), 0xFF);
    }

    fn vline(&mut self, x: i16, y: i16, len: u16, op: PixelOp) {
        self.area_op(Region::new(x, y, 1, len), op.into(), 0xFF);
    }

    fn line(&mut self, from: Point, to: Point, op: PixelOp) {
        if from.y == to.y {
            let x = from.x.min(to.x);
            self.hline(x, from.y, from.x.abs_diff(to.x).saturating_add(1), op);
            return;
        }
        if from.x == to.x {
            let y = from.y.min(to.y);
            self.vline(from.x, y, from.y.abs_diff(to.y).saturating_add(1), op);
            return;
        }

        let inside = self.locate(from).is_some() && self.locate(to).is_some();
        for p in LinePoints::new(from, to) {
            if inside {
                self.apply_pixel_unchecked(p.x as u16, p.y as u16, op);
            } else {
                self.apply_pixel(p, op);
            }
        }
    }

    fn thick_line(&mut self, from: Point, to: Point, thickness: u8, op: PixelOp) {
        if thickness <= 1 {
            self.line(from, to, op);
            return;
        }
        let t = thickness as i16;
        let x_major = from.x.abs_diff(to.x) >= from.y.abs_diff(to.y);
        for k in -(t / 2)..t - t / 2 {
            if x_major {
                self.line(from.offset(0, k), to.offset(0, k), op);
            } else {
                self.line(from.offset(k, 0), to.offset(k, 0), op);
            }
        }
    }

    fn rect_outline(&mut self, region: Region, op: PixelOp) {
        if region.is_empty() {
            return;
        }
        let (w, h) = (region.width, region.height);
        self.hline(region.x, region.y, w, op);
        if h > 1 {
            let bottom = (region.bottom() - 1) as i16;
            self.hline(region.x, bottom, w, op);
        }
        if h > 2 {
            let y = region.y.saturating_add(1);
            self.vline(region.x, y, h - 2, op);
            if w > 1 {
                let right = (region.right() - 1) as i16;
                self.vline(right, y, h - 2, op);
            }
        }
    }
}

/// Pixels of a sloped line, walked along the major axis from the lower end.
#[derive(Debug, Clone)]
pub struct LinePoints {
    start: Point,
    run: i32,
    rise: i32,
    x_major: bool,
    i: i32,
}

impl LinePoints {
    /// Walk the pixels from `from` to `to`. The order of the endpoints does
    /// not change the set of pixels produced.
    pub fn new(from: Point, to: Point) -> Self {
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        let x_major = dx.abs() >= dy.abs();
        let major = if x_major { dx } else { dy };
        let (start, run, rise) = if major >= 0 {
            (from, major, if x_major { dy } else { dx })
        } else {
            (to, -major, if x_major { -dy } else { -dx })
        };
        Self {
            start,
            run,
            rise,
            x_major,
            i: 0,
        }
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.i > self.run {
            return None;
        }
        let i = self.i;
        self.i += 1;
        let minor = if self.run == 0 {
            0
        } else {
            div_round(i * self.rise, self.run)
        };
        let (dx, dy) = if self.x_major { (i, minor) } else { (minor, i) };
        Some(Point::new(
            (self.start.x as i32 + dx) as i16,
            (self.start.y as i32 + dy) as i16,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.run - self.i + 1).max(0) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for LinePoints {}

/// `num / den` rounded half away from zero; `den > 0`.
#[inline]
fn div_round(num: i32, den: i32) -> i32 {
    if num >= 0 {
        (num + den / 2) / den
    } else {
        -((-num + den / 2) / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u16, height: u16) -> PackedBuffer<Vec<u8>> {
        let len = PackedBuffer::<Vec<u8>>::required_len(width, height);
        PackedBuffer::new(vec![0; len], width, height).unwrap()
    }

    fn lit(buf: &PackedBuffer<Vec<u8>>) -> Vec<(i16, i16)> {
        let mut out = Vec::new();
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                if buf.test_pixel_unchecked(x, y) {
                    out.push((x as i16, y as i16));
                }
            }
        }
        out
    }

    #[test]
    fn diagonal_sets_sixteen_pixels() {
        let mut buf = buffer(16, 16);
        buf.line(Point::new(0, 0), Point::new(15, 15), PixelOp::Set);
        let expected: Vec<_> = (0..16).map(|i| (i, i)).collect();
        assert_eq!(lit(&buf), expected);
    }

    #[test]
    fn reversed_line_matches() {
        let (a, b) = (Point::new(1, 2), Point::new(14, 7));
        let mut fwd = buffer(16, 16);
        fwd.line(a, b, PixelOp::Set);
        let mut rev = buffer(16, 16);
        rev.line(b, a, PixelOp::Set);
        assert_eq!(fwd.as_bytes(), rev.as_bytes());
        assert_eq!(fwd.count_ones(fwd.bounds()), 14);
    }

    #[test]
    fn steep_line_steps_along_y() {
        let pts: Vec<_> = LinePoints::new(Point::new(0, 0), Point::new(2, 4)).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(1, 2),
                Point::new(2, 3),
                Point::new(2, 4),
            ]
        );
    }

    #[test]
    fn rounding_is_symmetric_for_negative_slopes() {
        let pts: Vec<_> = LinePoints::new(Point::new(0, 4), Point::new(8, 0)).collect();
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], Point::new(0, 4));
        assert_eq!(pts[1], Point::new(1, 3));
        assert_eq!(pts[4], Point::new(4, 2));
        assert_eq!(pts[8], Point::new(8, 0));
    }

    #[test]
    fn axis_lines_use_spans() {
        let mut buf = buffer(16, 4);
        buf.line(Point::new(12, 1), Point::new(3, 1), PixelOp::Set);
        assert_eq!(buf.row(1).unwrap(), &[0x1F, 0xF8]);
        buf.line(Point::new(0, 3), Point::new(0, 0), PixelOp::Set);
        assert_eq!(buf.count_ones(buf.bounds()), 10 + 4);
        buf.line(Point::new(5, 0), Point::new(5, 3), PixelOp::Set);
        assert_eq!(buf.count_ones(buf.bounds()), 10 + 4 + 4 - 1);
    }

    #[test]
    fn single_point_line() {
        let mut buf = buffer(8, 8);
        buf.line(Point::new(4, 4), Point::new(4, 4), PixelOp::Set);
        assert_eq!(lit(&buf), vec![(4, 4)]);
    }

    #[test]
    fn offscreen_line_is_clipped() {
        let mut buf = buffer(8, 8);
        buf.line(Point::new(-8, -8), Point::new(7, 7), PixelOp::Set);
        assert_eq!(buf.count_ones(buf.bounds()), 8);
        buf.line(Point::new(-30, 2), Point::new(-10, 20), PixelOp::Set);
        assert_eq!(buf.count_ones(buf.bounds()), 8);
    }

    #[test]
    fn invert_line_twice_restores() {
        let mut buf = buffer(16, 16);
        buf.line(Point::new(2, 9), Point::new(13, 1), PixelOp::Invert);
        assert!(buf.count_ones(buf.bounds()) > 0);
        buf.line(Point::new(13, 1), Point::new(2, 9), PixelOp::Invert);
        assert_eq!(buf.count_ones(buf.bounds()), 0);
    }

    #[test]
    fn thick_lines_offset_perpendicular() {
        let mut buf = buffer(16, 16);
        buf.thick_line(Point::new(2, 8), Point::new(12, 8), 3, PixelOp::Set);
        assert_eq!(buf.count_ones(Region::new(0, 7, 16, 3)), 33);
        assert_eq!(buf.count_ones(buf.bounds()), 33);

        let mut steep = buffer(16, 16);
        steep.thick_line(Point::new(8, 0), Point::new(9, 15), 2, PixelOp::Set);
        assert_eq!(steep.count_ones(steep.bounds()), 32);
        assert!(steep.test_pixel(Point::new(7, 0)));
    }

    #[test]
    fn rect_outline_draws_border_once() {
        let mut buf = buffer(16, 16);
        buf.rect_outline(Region::new(2, 3, 6, 5), PixelOp::Invert);
        assert_eq!(buf.count_ones(buf.bounds()), 2 * 6 + 2 * 3);
        assert!(!buf.test_pixel(Point::new(4, 5)));
    }
}
