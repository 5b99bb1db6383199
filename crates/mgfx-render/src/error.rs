#![forbid(unsafe_code)]

//! Construction errors for packed buffers.

use std::fmt;

/// Failures when wrapping caller storage in a [`PackedBuffer`](crate::PackedBuffer).
///
/// Drawing operations themselves never fail: out-of-window work is clipped
/// and empty work is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Width or height is zero.
    ZeroSize,
    /// The backing slice is shorter than `columns * height` bytes.
    StorageTooSmall { needed: usize, actual: usize },
    /// Margins leave no drawable pixels.
    MarginsExceedSize,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "packed buffer width and height must be non-zero"),
            Self::StorageTooSmall { needed, actual } => write!(
                f,
                "packed buffer storage too small: need {needed} bytes, have {actual}"
            ),
            Self::MarginsExceedSize => {
                write!(f, "packed buffer margins leave no drawable window")
            }
        }
    }
}

impl std::error::Error for RenderError {}
