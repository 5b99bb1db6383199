#![forbid(unsafe_code)]

//! mgfx public facade crate.
//!
//! Re-exports the drawing, rasterization and transition types from the
//! member crates and offers a prelude for everyday use.
//!
//! ```
//! use mgfx::prelude::*;
//!
//! let mut bytes = [0u8; 2 * 16];
//! let mut buf = PackedBuffer::new(&mut bytes[..], 16, 16)?;
//! buf.line(Point::new(0, 0), Point::new(15, 15), PixelOp::Set);
//! assert_eq!(buf.count_ones(buf.bounds()), 16);
//! # Ok::<(), mgfx::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use mgfx_core::geometry::{Bounds, Dim, Point, Region};

// --- Render re-exports -----------------------------------------------------

pub use mgfx_render::raster::{FULL_CIRCLE, Icon, Map, Primitive, Shape, UNIT, measure, rasterize};
pub use mgfx_render::{
    BlitOp, Direction, Draw, Margins, PackedBuffer, PixelOp, RenderError, bitmask, calc_row_mask,
};

// --- Animation re-exports --------------------------------------------------

pub use mgfx_anim::{
    AnimationError, AnimationState, Effect, MAX_STEPS, PHASE_TWO, Path, TransitionConfig,
    TransitionKind,
};

// --- Errors ---------------------------------------------------------------

/// Any error raised while setting up buffers or transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Buffer construction failed.
    Render(RenderError),
    /// Transition decoding or construction failed.
    Animation(AnimationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(err) => write!(f, "{err}"),
            Self::Animation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::Animation(err) => Some(err),
        }
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl From<AnimationError> for Error {
    fn from(err: AnimationError) -> Self {
        Self::Animation(err)
    }
}

/// Standard result type for mgfx APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimationState, BlitOp, Bounds, Dim, Direction, Draw, Error, Icon, Map, PackedBuffer,
        Path, PixelOp, Point, Primitive, Region, Result, TransitionConfig, TransitionKind,
    };

    pub use crate::{anim, core, render};
}

pub use mgfx_anim as anim;
pub use mgfx_core as core;
pub use mgfx_render as render;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_convert_and_chain() {
        let err: Error = RenderError::ZeroSize.into();
        assert!(std::error::Error::source(&err).is_some());
        let err: Error = AnimationError::UnknownKind(99).into();
        assert_eq!(err.to_string(), "unknown transition kind 99");
    }
}
