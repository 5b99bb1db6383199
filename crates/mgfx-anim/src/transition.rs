#![forbid(unsafe_code)]

//! Frame-stepped transition state machine.
//!
//! An [`AnimationState`] moves through its steps one [`advance`] call at a
//! time. Each call computes that step's motion from the easing [`Path`],
//! shifts the visible content of the screen region and composites the
//! revealed strip from the scratch buffer, which holds the incoming frame
//! at the same coordinates.
//!
//! ```text
//! stepping:   step = 0 .. step_total           advance() -> true
//! bounce:     step = PHASE_TWO | 0 .. step_total  advance() -> true
//! done:       step == step_total (or PHASE_TWO | step_total)  -> false
//! ```
//!
//! Cancelling a transition is simply not calling [`advance`] again; the
//! state is consistent at every step boundary.
//!
//! [`advance`]: AnimationState::advance

use crate::error::AnimationError;
use crate::kind::{Effect, TransitionKind};
use crate::path::{Path, sum_of_squares};
use mgfx_core::geometry::{Dim, Point, Region};
use mgfx_render::{BlitOp, Direction, PackedBuffer};

/// Step-counter flag marking the snap-back phase of a bounce.
pub const PHASE_TWO: u16 = 0x8000;

/// Largest step count that leaves the phase flag free.
pub const MAX_STEPS: u16 = PHASE_TWO - 1;

// ---------------------------------------------------------------------------
// AnimationState
// ---------------------------------------------------------------------------

/// One in-progress screen transition.
///
/// Plain data: copy it, drop it, or stop advancing it at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    kind: TransitionKind,
    path: Path,
    /// Step within the current phase, plus [`PHASE_TWO`] during snap-back.
    step: u16,
    step_total: u16,
    /// Current displacement of the visible content.
    motion: u16,
    motion_total: u16,
    /// `sum_of_squares(step_total)`, fixed at construction.
    squares: u64,
    start: Point,
    dim: Dim,
}

impl AnimationState {
    /// Prepare a transition over the region at `start` with size `dim`.
    ///
    /// `motion_total` is capped at the region's length along the
    /// transition axis.
    pub fn new(
        kind: TransitionKind,
        path: Path,
        step_total: u16,
        motion_total: u16,
        start: Point,
        dim: Dim,
    ) -> Result<Self, AnimationError> {
        if step_total == 0 {
            return Err(AnimationError::ZeroSteps);
        }
        if step_total > MAX_STEPS {
            return Err(AnimationError::StepsOutOfRange(step_total));
        }
        Ok(Self {
            kind,
            path,
            step: 0,
            step_total,
            motion: 0,
            motion_total: motion_total.min(axis_len(kind, dim)),
            squares: sum_of_squares(step_total),
            start,
            dim,
        })
    }

    /// [`new`](Self::new) from raw kind and path codes.
    pub fn from_codes(
        kind: u8,
        path: u8,
        step_total: u16,
        motion_total: u16,
        start: Point,
        dim: Dim,
    ) -> Result<Self, AnimationError> {
        let kind = TransitionKind::try_from(kind).inspect_err(|_| {
            mgfx_core::warn!(code = kind, "rejected unknown transition kind");
        })?;
        let path = Path::try_from(path).inspect_err(|_| {
            mgfx_core::warn!(code = path, "rejected unknown easing path");
        })?;
        Self::new(kind, path, step_total, motion_total, start, dim)
    }

    #[inline]
    pub const fn kind(&self) -> TransitionKind {
        self.kind
    }

    #[inline]
    pub const fn path(&self) -> Path {
        self.path
    }

    /// Step index within the current phase.
    #[inline]
    pub const fn step(&self) -> u16 {
        self.step & !PHASE_TWO
    }

    /// Whether a bounce has entered its snap-back phase.
    #[inline]
    pub const fn is_phase_two(&self) -> bool {
        self.step & PHASE_TWO != 0
    }

    #[inline]
    pub const fn step_total(&self) -> u16 {
        self.step_total
    }

    /// Current displacement in pixels.
    #[inline]
    pub const fn motion(&self) -> u16 {
        self.motion
    }

    #[inline]
    pub const fn motion_total(&self) -> u16 {
        self.motion_total
    }

    /// The screen region being transitioned.
    #[inline]
    pub const fn region(&self) -> Region {
        Region::from_parts(self.start, self.dim)
    }

    /// Whether [`advance`](Self::advance) has no work left.
    pub const fn is_complete(&self) -> bool {
        if self.kind.is_bounce() {
            self.step == PHASE_TWO | self.step_total
        } else {
            self.step == self.step_total
        }
    }

    /// Motion of step `i` along this transition's easing path.
    pub fn step_size(&self, i: u16) -> u16 {
        if i >= self.step_total {
            return 0;
        }
        let base = self
            .path
            .raw_step(i, self.step_total, self.motion_total, self.squares);
        if i == 0 {
            base + self
                .path
                .remainder(self.step_total, self.motion_total, self.squares)
        } else {
            base
        }
    }

    /// Render one frame. Returns `true` while there was work to do and
    /// `false` once the transition is complete.
    ///
    /// The first call clips the region to the screen's drawable window.
    /// A bounce overwrites `scratch` with the current screen region on its
    /// first step and restores from it during snap-back.
    pub fn advance<S, T>(&mut self, screen: &mut PackedBuffer<S>, scratch: &mut PackedBuffer<T>) -> bool
    where
        S: AsRef<[u8]> + AsMut<[u8]>,
        T: AsRef<[u8]> + AsMut<[u8]>,
    {
        if self.is_complete() {
            return false;
        }
        if self.step == 0 {
            self.clip_to(screen.window());
        }
        let region = self.region();

        let Some((effect, dir)) = self.kind.parts() else {
            screen.blit_area(region.origin(), scratch, region, BlitOp::Assign);
            self.step = self.step_total;
            self.motion = self.motion_total;
            mgfx_core::trace!("transition replaced in one frame");
            return true;
        };

        let i = self.step();
        let amount = self.step_size(i);
        let span = mgfx_core::debug_span!(
            "transition_frame",
            kind = ?self.kind,
            step = i,
            motion = amount
        );
        let _guard = span.enter();

        let frame = Frame {
            region,
            dir,
            axis: axis_len(self.kind, self.dim),
        };

        if self.is_phase_two() {
            let before = self.motion;
            self.motion = before.saturating_sub(amount);
            frame.snap_back(screen, scratch, self.motion, before);
            self.step += 1;
            if self.is_complete() {
                mgfx_core::trace!("bounce settled");
            }
            return true;
        }

        if effect == Effect::Bounce && i == 0 {
            scratch.blit_area(region.origin(), screen, region, BlitOp::Assign);
        }
        let before = self.motion;
        self.motion = before.saturating_add(amount).min(self.motion_total);
        match effect {
            Effect::Push | Effect::Bounce => frame.push(screen, scratch, before, self.motion),
            Effect::Slide => frame.slide(screen, scratch, self.motion),
            Effect::UndoSlide => frame.undo_slide(screen, scratch, before, self.motion),
        }

        let next = i + 1;
        if next == self.step_total && effect == Effect::Bounce {
            self.step = PHASE_TWO;
            mgfx_core::trace!(motion = self.motion, "bounce turning back");
        } else {
            self.step = next;
        }
        true
    }

    /// Shrink the region to the drawable `window` before the first frame,
    /// capping the motion to the clipped axis.
    fn clip_to(&mut self, window: Region) {
        let region = self.region();
        let clipped = region
            .intersection(&window)
            .unwrap_or(Region::from_parts(self.start, Dim::new(0, 0)));
        if clipped == region {
            return;
        }
        self.start = clipped.origin();
        self.dim = clipped.dim();
        self.motion_total = self.motion_total.min(axis_len(self.kind, self.dim));
        mgfx_core::trace!(
            width = self.dim.width,
            height = self.dim.height,
            "transition region clipped to window"
        );
    }
}

/// Region length along the axis a transition moves on.
fn axis_len(kind: TransitionKind, dim: Dim) -> u16 {
    match kind.parts() {
        Some((_, dir)) if !dir.is_horizontal() => dim.height,
        _ => dim.width,
    }
}

// ---------------------------------------------------------------------------
// Frame compositing
// ---------------------------------------------------------------------------

/// Geometry of one transition frame.
///
/// Offsets along the axis are written as if content moves left (or up);
/// [`Frame::band`] mirrors them for right and down.
struct Frame {
    region: Region,
    dir: Direction,
    axis: u16,
}

impl Frame {
    /// The strip `[offset, offset + len)` along the axis, full width across.
    fn band(&self, offset: u16, len: u16) -> Region {
        let offset = match self.dir {
            Direction::Left | Direction::Up => offset,
            Direction::Right | Direction::Down => self.axis.saturating_sub(offset + len),
        };
        let r = self.region;
        if self.dir.is_horizontal() {
            Region::new(advance_coord(r.x, offset), r.y, len, r.height)
        } else {
            Region::new(r.x, advance_coord(r.y, offset), r.width, len)
        }
    }

    fn reveal<S, T>(&self, screen: &mut PackedBuffer<S>, scratch: &PackedBuffer<T>, src: Region, dst: Region)
    where
        S: AsRef<[u8]> + AsMut<[u8]>,
        T: AsRef<[u8]>,
    {
        screen.blit_area(dst.origin(), scratch, src, BlitOp::Assign);
    }

    /// Displacement grows from `before` to `after`; everything moves and
    /// the incoming frame follows the old one in.
    fn push<S, T>(&self, screen: &mut PackedBuffer<S>, scratch: &PackedBuffer<T>, before: u16, after: u16)
    where
        S: AsRef<[u8]> + AsMut<[u8]>,
        T: AsRef<[u8]>,
    {
        let n = after - before;
        screen.shift(self.region, self.dir, n);
        self.reveal(screen, scratch, self.band(before, n), self.band(self.axis.saturating_sub(n), n));
    }

    /// The incoming frame's leading `after` pixels cover the trailing edge.
    fn slide<S, T>(&self, screen: &mut PackedBuffer<S>, scratch: &PackedBuffer<T>, after: u16)
    where
        S: AsRef<[u8]> + AsMut<[u8]>,
        T: AsRef<[u8]>,
    {
        self.reveal(screen, scratch, self.band(0, after), self.band(self.axis.saturating_sub(after), after));
    }

    /// The old frame moves off, uncovering the incoming frame in place.
    fn undo_slide<S, T>(&self, screen: &mut PackedBuffer<S>, scratch: &PackedBuffer<T>, before: u16, after: u16)
    where
        S: AsRef<[u8]> + AsMut<[u8]>,
        T: AsRef<[u8]>,
    {
        let n = after - before;
        screen.shift(self.band(0, self.axis.saturating_sub(before)), self.dir, n);
        let uncovered = self.band(self.axis.saturating_sub(after), n);
        self.reveal(screen, scratch, uncovered, uncovered);
    }

    /// Displacement shrinks from `before` to `after`; content moves back
    /// and the leading edge is restored from the snapshot.
    fn snap_back<S, T>(&self, screen: &mut PackedBuffer<S>, snapshot: &PackedBuffer<T>, after: u16, before: u16)
    where
        S: AsRef<[u8]> + AsMut<[u8]>,
        T: AsRef<[u8]>,
    {
        let n = before - after;
        screen.shift(self.region, self.dir.reverse(), n);
        self.reveal(screen, snapshot, self.band(after, n), self.band(0, n));
    }
}

fn advance_coord(origin: i16, offset: u16) -> i16 {
    (origin as i32 + offset as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

// ---------------------------------------------------------------------------
// TransitionConfig
// ---------------------------------------------------------------------------

/// Builder for [`AnimationState`].
///
/// Defaults: [`TransitionKind::None`], [`Path::Linear`], 8 steps, and a
/// motion that covers the region axis (a quarter of it for bounces).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionConfig {
    kind: TransitionKind,
    path: Path,
    steps: u16,
    motion: Option<u16>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            kind: TransitionKind::None,
            path: Path::Linear,
            steps: 8,
            motion: None,
        }
    }
}

impl TransitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition kind.
    pub fn kind(mut self, kind: TransitionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the easing path.
    pub fn path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Set the number of steps.
    pub fn steps(mut self, steps: u16) -> Self {
        self.steps = steps;
        self
    }

    /// Set the total motion in pixels.
    pub fn motion(mut self, motion: u16) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Build the state for the region at `start` with size `dim`.
    pub fn start(self, start: Point, dim: Dim) -> Result<AnimationState, AnimationError> {
        let motion = self.motion.unwrap_or_else(|| {
            let axis = axis_len(self.kind, dim);
            if self.kind.is_bounce() { axis / 4 } else { axis }
        });
        AnimationState::new(self.kind, self.path, self.steps, motion, start, dim)
    }
}
