#![forbid(unsafe_code)]

//! Easing paths.
//!
//! A path splits a transition's total motion into per-step amounts. Every
//! path is exact: the per-step amounts of a transition always sum to its
//! total motion. Integer division leaves a remainder, which is added to the
//! first step.

use crate::error::AnimationError;

/// Distribution of motion over the steps of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Path {
    /// The same amount every step.
    #[default]
    Linear = 0,
    /// Step `i` moves in proportion to `(steps - i)²`: large steps first.
    Squared = 1,
    /// Step `i` moves in proportion to `(i + 1)²`: large steps last.
    SquaredUndo = 2,
}

/// `1² + 2² + … + n²`.
#[inline]
pub const fn sum_of_squares(n: u16) -> u64 {
    let n = n as u64;
    n * (n + 1) * (2 * n + 1) / 6
}

impl Path {
    /// Stable numeric code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Motion of step `i` before the remainder correction.
    ///
    /// `squares` must be `sum_of_squares(steps)`; `steps` must be non-zero.
    pub(crate) const fn raw_step(self, i: u16, steps: u16, total: u16, squares: u64) -> u16 {
        let total = total as u64;
        let amount = match self {
            Self::Linear => total / steps as u64,
            Self::Squared => {
                let k = (steps - i) as u64;
                total * k * k / squares
            }
            Self::SquaredUndo => {
                let k = i as u64 + 1;
                total * k * k / squares
            }
        };
        amount as u16
    }

    /// Motion left over after every step takes its rounded-down share.
    pub(crate) fn remainder(self, steps: u16, total: u16, squares: u64) -> u16 {
        let spent: u64 = match self {
            Self::Linear => (total / steps) as u64 * steps as u64,
            _ => (0..steps)
                .map(|i| self.raw_step(i, steps, total, squares) as u64)
                .sum(),
        };
        (total as u64 - spent) as u16
    }

    /// Motion of step `i` of a `steps`-step transition covering `total`
    /// pixels. Out-of-range steps move nothing.
    pub fn step_size(self, i: u16, steps: u16, total: u16) -> u16 {
        if i >= steps {
            return 0;
        }
        let squares = sum_of_squares(steps);
        let base = self.raw_step(i, steps, total, squares);
        if i == 0 {
            base + self.remainder(steps, total, squares)
        } else {
            base
        }
    }
}

impl TryFrom<u8> for Path {
    type Error = AnimationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Linear),
            1 => Ok(Self::Squared),
            2 => Ok(Self::SquaredUndo),
            _ => Err(AnimationError::UnknownPath(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(path: Path, n: u16, total: u16) -> Vec<u16> {
        (0..n).map(|i| path.step_size(i, n, total)).collect()
    }

    #[test]
    fn sum_of_squares_closed_form() {
        assert_eq!(sum_of_squares(1), 1);
        assert_eq!(sum_of_squares(5), 55);
        assert_eq!(sum_of_squares(0x7FFF), (1..=0x7FFFu64).map(|k| k * k).sum());
    }

    #[test]
    fn linear_even_split() {
        assert_eq!(steps(Path::Linear, 5, 100), [20; 5]);
    }

    #[test]
    fn linear_remainder_goes_first() {
        assert_eq!(steps(Path::Linear, 3, 100), [34, 33, 33]);
    }

    #[test]
    fn squared_front_loads() {
        let s = steps(Path::Squared, 5, 110);
        assert_eq!(s, [50, 32, 18, 8, 2]);
        assert_eq!(s.iter().sum::<u16>(), 110);
    }

    #[test]
    fn squared_undo_back_loads() {
        let s = steps(Path::SquaredUndo, 5, 110);
        assert_eq!(s, [2, 8, 18, 32, 50]);
    }

    #[test]
    fn squared_undo_correction_lands_on_first_step() {
        let s = steps(Path::SquaredUndo, 4, 100);
        // 100 * k² / 30 for k = 1..4 rounds down to 3, 13, 30, 53.
        assert_eq!(s, [4, 13, 30, 53]);
    }

    #[test]
    fn tail_steps_may_be_zero() {
        let s = steps(Path::Squared, 10, 5);
        assert_eq!(s.iter().sum::<u16>(), 5);
        assert_eq!(s[9], 0);
    }

    #[test]
    fn out_of_range_step_is_zero() {
        assert_eq!(Path::Linear.step_size(5, 5, 100), 0);
    }

    #[test]
    fn codes_decode() {
        assert_eq!(Path::try_from(2), Ok(Path::SquaredUndo));
        assert_eq!(Path::try_from(3), Err(AnimationError::UnknownPath(3)));
        assert_eq!(Path::Squared.code(), 1);
    }
}
