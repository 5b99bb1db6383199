#![forbid(unsafe_code)]

//! Render kernel: packed 1-bpp buffers, blits, shifts, and icon rasterization.
//!
//! Everything here operates on caller-owned storage wrapped in a
//! [`PackedBuffer`](packed::PackedBuffer). Nothing allocates framebuffer
//! memory and nothing performs I/O.

pub mod blit;
pub mod drawing;
pub mod error;
pub mod packed;
pub mod pour;
pub mod raster;
pub mod shift;

mod row;

pub use drawing::Draw;
pub use error::RenderError;
pub use packed::{BlitOp, Margins, PackedBuffer, PixelOp, bitmask, calc_row_mask};
pub use shift::Direction;
