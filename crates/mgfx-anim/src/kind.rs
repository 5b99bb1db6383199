#![forbid(unsafe_code)]

//! The closed set of transition kinds.
//!
//! Kinds have stable numeric codes so that transitions named in loaded UI
//! descriptions can be decoded with [`TransitionKind::try_from`].

use crate::error::AnimationError;
use mgfx_render::Direction;

/// How the incoming frame replaces the visible one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Old content moves out while the new content follows it in.
    Push,
    /// New content slides in over static old content.
    Slide,
    /// Content is pushed out, then snaps back to where it started.
    Bounce,
    /// Old content slides away, uncovering static new content.
    UndoSlide,
}

/// A screen transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TransitionKind {
    /// Replace the frame in one step.
    #[default]
    None = 0,
    PushLeft = 1,
    PushRight = 2,
    PushUp = 3,
    PushDown = 4,
    SlideLeft = 5,
    SlideRight = 6,
    SlideUp = 7,
    SlideDown = 8,
    BounceLeft = 9,
    BounceRight = 10,
    BounceUp = 11,
    BounceDown = 12,
    UndoSlideLeft = 13,
    UndoSlideRight = 14,
    UndoSlideUp = 15,
    UndoSlideDown = 16,
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

const EFFECTS: [Effect; 4] = [Effect::Push, Effect::Slide, Effect::Bounce, Effect::UndoSlide];

impl TransitionKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 17] = [
        Self::None,
        Self::PushLeft,
        Self::PushRight,
        Self::PushUp,
        Self::PushDown,
        Self::SlideLeft,
        Self::SlideRight,
        Self::SlideUp,
        Self::SlideDown,
        Self::BounceLeft,
        Self::BounceRight,
        Self::BounceUp,
        Self::BounceDown,
        Self::UndoSlideLeft,
        Self::UndoSlideRight,
        Self::UndoSlideUp,
        Self::UndoSlideDown,
    ];

    /// Compose a kind from an effect and a direction.
    pub const fn new(effect: Effect, dir: Direction) -> Self {
        let e = match effect {
            Effect::Push => 0,
            Effect::Slide => 1,
            Effect::Bounce => 2,
            Effect::UndoSlide => 3,
        };
        let d = match dir {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        };
        Self::ALL[1 + e * 4 + d]
    }

    /// Stable numeric code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Effect and direction, or `None` for [`TransitionKind::None`].
    pub const fn parts(self) -> Option<(Effect, Direction)> {
        match self.code() {
            0 => None,
            code => {
                let i = (code - 1) as usize;
                Some((EFFECTS[i / 4], DIRECTIONS[i % 4]))
            }
        }
    }

    /// Whether the kind runs a second, snap-back phase.
    #[inline]
    pub const fn is_bounce(self) -> bool {
        matches!(self.parts(), Some((Effect::Bounce, _)))
    }
}

impl TryFrom<u8> for TransitionKind {
    type Error = AnimationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(AnimationError::UnknownKind(code))
    }
}

impl From<TransitionKind> for u8 {
    fn from(kind: TransitionKind) -> Self {
        kind.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for (i, kind) in TransitionKind::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, i);
            assert_eq!(TransitionKind::try_from(i as u8), Ok(*kind));
        }
    }

    #[test]
    fn unknown_codes_rejected() {
        assert_eq!(
            TransitionKind::try_from(17),
            Err(AnimationError::UnknownKind(17))
        );
        assert_eq!(
            TransitionKind::try_from(255),
            Err(AnimationError::UnknownKind(255))
        );
    }

    #[test]
    fn parts_and_new_agree() {
        assert_eq!(TransitionKind::None.parts(), None);
        for kind in &TransitionKind::ALL[1..] {
            let (effect, dir) = kind.parts().unwrap();
            assert_eq!(TransitionKind::new(effect, dir), *kind);
        }
        assert_eq!(
            TransitionKind::new(Effect::UndoSlide, Direction::Up),
            TransitionKind::UndoSlideUp
        );
    }

    #[test]
    fn only_bounce_kinds_bounce() {
        let bouncing: Vec<_> = TransitionKind::ALL
            .iter()
            .filter(|k| k.is_bounce())
            .collect();
        assert_eq!(
            bouncing,
            [
                &TransitionKind::BounceLeft,
                &TransitionKind::BounceRight,
                &TransitionKind::BounceUp,
                &TransitionKind::BounceDown,
            ]
        );
    }
}
