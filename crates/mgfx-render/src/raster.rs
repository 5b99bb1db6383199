#![forbid(unsafe_code)]

//! Vector primitive rasterization.
//!
//! Icons are described as an ordered list of [`Primitive`]s in a normalized
//! `UNIT × UNIT` design grid. A [`Map`] places that grid on a buffer: it
//! rotates about the grid centre, scales the grid to `size` device pixels,
//! and shifts the result. Each primitive may also carry its own local
//! rotation (about its own origin) and shift, applied before the map.
//!
//! Angles are measured in `FULL_CIRCLE` units per turn. With the y axis
//! pointing down, positive angles turn clockwise on screen.
//!
//! # Example
//!
//! ```
//! use mgfx_core::geometry::{Dim, Point};
//! use mgfx_render::PackedBuffer;
//! use mgfx_render::raster::{Map, Primitive, rasterize};
//!
//! let prims = [Primitive::line(Point::new(0, 0), Point::new(240, 240))];
//! let map = Map::new().size(Dim::new(16, 16));
//! let mut buf = PackedBuffer::new(vec![0u8; 32], 16, 16).unwrap();
//! rasterize(&mut buf, &prims, &map, None);
//! assert_eq!(buf.count_ones(buf.bounds()), 16);
//! ```

use crate::drawing::Draw;
use crate::packed::{PackedBuffer, PixelOp};
use mgfx_core::geometry::{Bounds, Dim, Point};
use std::f32::consts::TAU;

/// Angular units in one full turn.
pub const FULL_CIRCLE: i16 = 360;

/// Side length of the normalized design grid.
pub const UNIT: i16 = 256;

/// Most angular samples taken for one arc ring: the perimeter of the
/// device coordinate plane.
pub const MAX_ARC_STEPS: u32 = 4 * u16::MAX as u32;

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Placement of the design grid on a buffer, plus the pen used to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Map {
    /// Device position of the grid's top-left corner.
    pub shift: Point,
    /// Rotation about the grid centre, in `FULL_CIRCLE` units.
    pub rotation: i16,
    /// Device size of the whole grid.
    pub size: Dim,
    /// Outline thickness in pixels; 0 selects filled rendering.
    pub thickness: u8,
    /// Pixel operator.
    pub op: PixelOp,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            shift: Point::ZERO,
            rotation: 0,
            size: Dim::new(UNIT as u16, UNIT as u16),
            thickness: 1,
            op: PixelOp::Set,
        }
    }
}

impl Map {
    /// A 1:1 map at the origin drawing 1px outlines with [`PixelOp::Set`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device offset (builder).
    pub fn shift(mut self, shift: Point) -> Self {
        self.shift = shift;
        self
    }

    /// Set the rotation (builder).
    pub fn rotation(mut self, rotation: i16) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the device size of the grid (builder).
    pub fn size(mut self, size: Dim) -> Self {
        self.size = size;
        self
    }

    /// Set the outline thickness; 0 means filled (builder).
    pub fn thickness(mut self, thickness: u8) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the pixel operator (builder).
    pub fn op(mut self, op: PixelOp) -> Self {
        self.op = op;
        self
    }

    /// Whether fill primitives are applied.
    #[inline]
    pub const fn is_filled(&self) -> bool {
        self.thickness == 0
    }

    /// Device pixels per grid unit along the larger axis.
    fn pixel_scale(&self) -> f32 {
        self.size.width.max(self.size.height) as f32 / UNIT as f32
    }

    /// Transform a grid-space position into device space.
    fn apply(&self, (x, y): (f32, f32)) -> Point {
        let c = UNIT as f32 / 2.0;
        let (x, y) = rotate((x - c, y - c), self.rotation);
        let x = (x + c) * self.size.width as f32 / UNIT as f32;
        let y = (y + c) * self.size.height as f32 / UNIT as f32;
        Point::new(
            (self.shift.x as f32 + x.round()) as i16,
            (self.shift.y as f32 + y.round()) as i16,
        )
    }
}

fn rotate((x, y): (f32, f32), angle: i16) -> (f32, f32) {
    if angle % FULL_CIRCLE == 0 {
        return (x, y);
    }
    let (sin, cos) = (angle as f32 * TAU / FULL_CIRCLE as f32).sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Geometry of one primitive, in its local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A segment between two points.
    Line { from: Point, to: Point },
    /// An elliptical arc centred on the local origin, from `start` to
    /// `stop` (clockwise). Equal angles describe a full ellipse.
    Arc {
        rx: u16,
        ry: u16,
        start: i16,
        stop: i16,
    },
    /// A flood-fill seed.
    Fill { seed: Point },
}

/// A shape with its own placement and an enable switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub shape: Shape,
    /// Local offset, applied after the local rotation.
    pub shift: Point,
    /// Local rotation about the primitive origin. For arcs this tilts the
    /// ellipse axes.
    pub rotation: i16,
    pub enabled: bool,
}

impl Primitive {
    const fn with_shape(shape: Shape) -> Self {
        Self {
            shape,
            shift: Point::ZERO,
            rotation: 0,
            enabled: true,
        }
    }

    /// A line primitive.
    pub const fn line(from: Point, to: Point) -> Self {
        Self::with_shape(Shape::Line { from, to })
    }

    /// An arc primitive centred on the local origin.
    pub const fn arc(rx: u16, ry: u16, start: i16, stop: i16) -> Self {
        Self::with_shape(Shape::Arc {
            rx,
            ry,
            start,
            stop,
        })
    }

    /// A full circle centred on `center`.
    pub const fn circle(center: Point, radius: u16) -> Self {
        Self::arc(radius, radius, 0, 0).at(center)
    }

    /// A fill seed.
    pub const fn fill(seed: Point) -> Self {
        Self::with_shape(Shape::Fill { seed })
    }

    /// Set the local offset (builder).
    pub const fn at(mut self, shift: Point) -> Self {
        self.shift = shift;
        self
    }

    /// Set the local rotation (builder).
    pub const fn rotated(mut self, rotation: i16) -> Self {
        self.rotation = rotation;
        self
    }

    /// Disable the primitive (builder).
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn local(&self, p: (f32, f32)) -> (f32, f32) {
        let (x, y) = rotate(p, self.rotation);
        (x + self.shift.x as f32, y + self.shift.y as f32)
    }

    fn local_point(&self, p: Point) -> (f32, f32) {
        self.local((p.x as f32, p.y as f32))
    }
}

/// A vector symbol: outline primitives followed by `fill_count` fill seeds.
///
/// Outline rendering (`Map::thickness > 0`) skips the trailing seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon<'a> {
    primitives: &'a [Primitive],
    fill_count: usize,
}

impl<'a> Icon<'a> {
    /// Build an icon. `fill_count` is capped at the primitive count.
    pub fn new(primitives: &'a [Primitive], fill_count: usize) -> Self {
        Self {
            primitives,
            fill_count: fill_count.min(primitives.len()),
        }
    }

    /// All primitives, in order.
    pub fn primitives(&self) -> &'a [Primitive] {
        self.primitives
    }

    /// Number of trailing fill primitives.
    pub fn fill_count(&self) -> usize {
        self.fill_count
    }

    /// Primitives drawn in every mode.
    pub fn outline(&self) -> &'a [Primitive] {
        &self.primitives[..self.primitives.len() - self.fill_count]
    }

    /// Trailing fill primitives, applied in filled mode only.
    pub fn fills(&self) -> &'a [Primitive] {
        &self.primitives[self.primitives.len() - self.fill_count..]
    }

    /// The primitives that `map` would draw.
    fn active(&self, map: &Map) -> &'a [Primitive] {
        if map.is_filled() {
            self.primitives
        } else {
            self.outline()
        }
    }

    /// Draw the icon.
    pub fn render<S: AsRef<[u8]> + AsMut<[u8]>>(
        &self,
        buf: &mut PackedBuffer<S>,
        map: &Map,
        bounds: Option<&mut Bounds>,
    ) {
        rasterize(buf, self.active(map), map, bounds);
    }

    /// Device-space bounding box of the icon under `map`.
    pub fn measure(&self, map: &Map) -> Bounds {
        measure(self.active(map), map)
    }
}

// ---------------------------------------------------------------------------
// Rasterization
// ---------------------------------------------------------------------------

/// Device-space output of the transform walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Line(Point, Point),
    Dot(Point),
    Seed(Point),
}

impl Mark {
    /// Grow `bounds` over what drawing this mark with a `thickness` pen
    /// touches. Thick lines widen across their minor axis the way
    /// [`Draw::thick_line`] offsets them.
    fn include_in(&self, bounds: &mut Bounds, thickness: u8) {
        match *self {
            Self::Line(a, b) => {
                let t = thickness.max(1) as i16;
                let (lo, hi) = (-(t / 2), t - t / 2 - 1);
                let x_major = a.x.abs_diff(b.x) >= a.y.abs_diff(b.y);
                for p in [a, b] {
                    if x_major {
                        bounds.include(p.offset(0, lo));
                        bounds.include(p.offset(0, hi));
                    } else {
                        bounds.include(p.offset(lo, 0));
                        bounds.include(p.offset(hi, 0));
                    }
                }
            }
            Self::Dot(p) | Self::Seed(p) => bounds.include(p),
        }
    }
}

/// Draw every enabled primitive in order.
///
/// Lines use the map's thickness (0 draws 1px), arcs draw one concentric
/// ring per pixel of thickness, and fill seeds pour with the map's
/// operator. When `bounds` is given, every device point produced is
/// accumulated into it.
pub fn rasterize<S: AsRef<[u8]> + AsMut<[u8]>>(
    buf: &mut PackedBuffer<S>,
    primitives: &[Primitive],
    map: &Map,
    mut bounds: Option<&mut Bounds>,
) {
    let span = mgfx_core::debug_span!("rasterize", primitives = primitives.len());
    let _guard = span.enter();

    let thickness = map.thickness.max(1);
    walk(primitives, map, |mark| {
        if let Some(b) = bounds.as_deref_mut() {
            mark.include_in(b, thickness);
        }
        match mark {
            Mark::Line(a, b) => buf.thick_line(a, b, thickness, map.op),
            Mark::Dot(p) => buf.apply_pixel(p, map.op),
            Mark::Seed(p) => {
                buf.pour(p, map.op);
            }
        }
    });
}

/// Bounding box of what [`rasterize`] would touch, without drawing.
pub fn measure(primitives: &[Primitive], map: &Map) -> Bounds {
    let mut bounds = Bounds::new();
    walk(primitives, map, |mark| mark.include_in(&mut bounds, map.thickness));
    bounds
}

fn walk(primitives: &[Primitive], map: &Map, mut emit: impl FnMut(Mark)) {
    for prim in primitives.iter().filter(|p| p.enabled) {
        match prim.shape {
            Shape::Line { from, to } => emit(Mark::Line(
                map.apply(prim.local_point(from)),
                map.apply(prim.local_point(to)),
            )),
            Shape::Arc {
                rx,
                ry,
                start,
                stop,
            } => arc_marks(prim, (rx, ry), (start, stop), map, &mut emit),
            Shape::Fill { seed } => emit(Mark::Seed(map.apply(prim.local_point(seed)))),
        }
    }
}

/// Arc sweep in angular units, in `1..=FULL_CIRCLE`.
fn sweep(start: i16, stop: i16) -> i32 {
    let full = FULL_CIRCLE as i32;
    match (stop as i32 - start as i32).rem_euclid(full) {
        0 => full,
        s => s,
    }
}

/// Emit the dots of an arc, one ring per pixel of thickness.
///
/// The angular step count follows the ring's device circumference, so
/// consecutive samples are at most one pixel apart: no gaps on large radii,
/// little overdraw on small ones. The count is capped at [`MAX_ARC_STEPS`].
/// Repeated samples are dropped so inverting pens flip each pixel once.
fn arc_marks(
    prim: &Primitive,
    (rx, ry): (u16, u16),
    (start, stop): (i16, i16),
    map: &Map,
    emit: &mut impl FnMut(Mark),
) {
    let scale = map.pixel_scale();
    if scale <= 0.0 {
        return;
    }
    let unit = 1.0 / scale;
    let sweep = sweep(start, stop);
    let full = sweep == FULL_CIRCLE as i32;
    let turns = sweep as f32 / FULL_CIRCLE as f32;
    let thickness = map.thickness.max(1) as i32;

    for ring in 0..thickness {
        let offset = unit * (ring - thickness / 2) as f32;
        let (rx, ry) = (rx as f32 + offset, ry as f32 + offset);
        if rx < 0.0 || ry < 0.0 {
            continue;
        }
        let circumference = TAU * rx.max(ry) * scale * turns;
        let steps = (circumference.ceil() as u32).clamp(1, MAX_ARC_STEPS);

        let mut first = None;
        let mut prev = None;
        for i in 0..=steps {
            let angle = start as f32 + sweep as f32 * i as f32 / steps as f32;
            let (sin, cos) = (angle * TAU / FULL_CIRCLE as f32).sin_cos();
            let p = map.apply(prim.local((rx * cos, ry * sin)));
            if prev == Some(p) || (full && i == steps && first == Some(p)) {
                continue;
            }
            emit(Mark::Dot(p));
            prev = Some(p);
            first.get_or_insert(p);
        }
    }
}
