#![forbid(unsafe_code)]

//! Transition setup errors.

use std::fmt;

/// Failures when decoding or initialising a transition.
///
/// Advancing a valid transition never fails; a step with zero motion is an
/// ordinary empty frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// A transition code outside the known set.
    UnknownKind(u8),
    /// An easing path code outside the known set.
    UnknownPath(u8),
    /// A transition needs at least one step.
    ZeroSteps,
    /// The step count overlaps the phase-two flag bit.
    StepsOutOfRange(u16),
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(code) => write!(f, "unknown transition kind {code}"),
            Self::UnknownPath(code) => write!(f, "unknown easing path {code}"),
            Self::ZeroSteps => write!(f, "transition step count must be non-zero"),
            Self::StepsOutOfRange(steps) => write!(
                f,
                "transition step count {steps} exceeds {}",
                crate::transition::MAX_STEPS
            ),
        }
    }
}

impl std::error::Error for AnimationError {}
