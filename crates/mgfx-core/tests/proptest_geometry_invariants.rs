//! Property-based invariant tests for `Region` and `Bounds`.
//!
//! 1. Intersection is commutative.
//! 2. Intersection fits within both inputs.
//! 3. `contains` agrees with intersection membership.
//! 4. Bounds always contain every included point.

use mgfx_core::geometry::{Bounds, Point, Region};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn region_strategy() -> impl Strategy<Value = Region> {
    (-200i16..=200, -200i16..=200, 0u16..=300, 0u16..=300)
        .prop_map(|(x, y, w, h)| Region::new(x, y, w, h))
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-300i16..=300, -300i16..=300).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn intersection_commutative(a in region_strategy(), b in region_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_within_inputs(a in region_strategy(), b in region_strategy()) {
        if let Some(i) = a.intersection(&b) {
            prop_assert!(!i.is_empty());
            prop_assert!(i.x >= a.x && i.x >= b.x);
            prop_assert!(i.y >= a.y && i.y >= b.y);
            prop_assert!(i.right() <= a.right() && i.right() <= b.right());
            prop_assert!(i.bottom() <= a.bottom() && i.bottom() <= b.bottom());
        }
    }

    #[test]
    fn contains_agrees_with_intersection(
        a in region_strategy(),
        b in region_strategy(),
        p in point_strategy(),
    ) {
        let in_both = a.contains(p) && b.contains(p);
        let in_isect = a.intersection(&b).is_some_and(|i| i.contains(p));
        prop_assert_eq!(in_both, in_isect);
    }

    #[test]
    fn bounds_cover_all_points(points in prop::collection::vec(point_strategy(), 1..32)) {
        let mut bounds = Bounds::new();
        for &p in &points {
            bounds.include(p);
        }
        let region = bounds.region().expect("non-empty");
        for p in points {
            prop_assert!(region.contains(p), "{:?} outside {:?}", p, region);
        }
    }
}
