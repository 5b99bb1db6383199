#![forbid(unsafe_code)]

//! Bit-granular scanline compositing shared by blits and shifts.

use crate::packed::BlitOp;

/// Composite `width` pixels starting at bit `src_x` of `src` onto `dst`
/// starting at bit `dst_x`.
///
/// Each destination byte is built from the source byte under it and its
/// right-hand neighbour, shifted into alignment; only the first and last
/// destination bytes are partially masked. Source bytes outside `src`
/// read as zero.
///
/// The caller guarantees `dst_x + width <= dst.len() * 8`.
pub(crate) fn compose_row(
    dst: &mut [u8],
    dst_x: usize,
    src: &[u8],
    src_x: usize,
    width: usize,
    op: BlitOp,
) {
    if width == 0 {
        return;
    }
    debug_assert!(dst_x + width <= dst.len() * 8);

    let last = dst_x + width - 1;
    let first_byte = dst_x >> 3;
    let last_byte = last >> 3;
    // Source bit that lines up with bit 0 of the first destination byte.
    let base = src_x as isize - (dst_x & 7) as isize;

    for (i, byte) in (first_byte..=last_byte).enumerate() {
        let bits = fetch_byte(src, base + i as isize * 8);
        let mut mask = 0xFF;
        if byte == first_byte {
            mask &= 0xFF >> (dst_x & 7);
        }
        if byte == last_byte {
            mask &= 0xFF << (7 - (last & 7));
        }
        dst[byte] = op.apply(dst[byte], bits, mask);
    }
}

/// Eight source bits starting at (possibly negative) bit position `bit`.
#[inline]
fn fetch_byte(src: &[u8], bit: isize) -> u8 {
    let index = bit.div_euclid(8);
    let shift = bit.rem_euclid(8) as u32;
    if shift == 0 {
        return byte_at(src, index);
    }
    let word = (byte_at(src, index) as u16) << 8 | byte_at(src, index + 1) as u16;
    (word << shift >> 8) as u8
}

#[inline]
fn byte_at(src: &[u8], index: isize) -> u8 {
    usize::try_from(index)
        .ok()
        .and_then(|i| src.get(i).copied())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_copy_is_bytewise() {
        let mut dst = [0u8; 3];
        compose_row(&mut dst, 8, &[0xA5, 0x3C], 0, 16, BlitOp::Assign);
        assert_eq!(dst, [0x00, 0xA5, 0x3C]);
    }

    #[test]
    fn shifted_right_by_three() {
        let mut dst = [0u8; 2];
        compose_row(&mut dst, 3, &[0xFF], 0, 8, BlitOp::Set);
        assert_eq!(dst, [0x1F, 0xE0]);
    }

    #[test]
    fn shifted_left_reads_neighbour() {
        let mut dst = [0u8; 1];
        compose_row(&mut dst, 0, &[0x0F, 0xF0], 4, 8, BlitOp::Set);
        assert_eq!(dst, [0xFF]);
    }

    #[test]
    fn single_byte_window_masks_both_edges() {
        let mut dst = [0xFFu8];
        compose_row(&mut dst, 2, &[0x00], 0, 3, BlitOp::Assign);
        assert_eq!(dst, [0xC7]);
    }

    #[test]
    fn source_past_end_reads_zero() {
        let mut dst = [0u8; 2];
        compose_row(&mut dst, 0, &[0xFF], 4, 12, BlitOp::Set);
        assert_eq!(dst, [0xF0, 0x00]);
    }

    #[test]
    fn zero_width_is_noop() {
        let mut dst = [0x5Au8];
        compose_row(&mut dst, 3, &[0xFF], 0, 0, BlitOp::Assign);
        assert_eq!(dst, [0x5A]);
    }
}
