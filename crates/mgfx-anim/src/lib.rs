#![forbid(unsafe_code)]

//! Screen transitions for packed 1-bpp buffers.
//!
//! A transition composites an incoming frame (held in a scratch buffer)
//! onto the visible screen buffer over a fixed number of steps. The caller
//! drives it one frame at a time:
//!
//! ```
//! use mgfx_anim::{Path, TransitionConfig, TransitionKind};
//! use mgfx_core::geometry::{Dim, Point};
//! use mgfx_render::PackedBuffer;
//!
//! let mut screen = PackedBuffer::new(vec![0u8; 64], 32, 16).unwrap();
//! let mut scratch = PackedBuffer::new(vec![0xFFu8; 64], 32, 16).unwrap();
//!
//! let mut state = TransitionConfig::new()
//!     .kind(TransitionKind::PushLeft)
//!     .path(Path::Linear)
//!     .steps(4)
//!     .start(Point::ZERO, Dim::new(32, 16))
//!     .unwrap();
//!
//! while state.advance(&mut screen, &mut scratch) {}
//! assert_eq!(screen.count_ones(screen.bounds()), 32 * 16);
//! ```

pub mod error;
pub mod kind;
pub mod path;
pub mod transition;

pub use error::AnimationError;
pub use kind::{Effect, TransitionKind};
pub use path::Path;
pub use transition::{AnimationState, MAX_STEPS, PHASE_TWO, TransitionConfig};
