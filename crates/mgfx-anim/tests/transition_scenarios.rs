//! End-to-end transition scenarios driven through the public API.

use mgfx_anim::{AnimationError, AnimationState, Path, TransitionConfig, TransitionKind};
use mgfx_core::geometry::{Dim, Point, Region};
use mgfx_render::PackedBuffer;

fn buffer(width: u16, height: u16) -> PackedBuffer<Vec<u8>> {
    let len = PackedBuffer::<Vec<u8>>::required_len(width, height);
    PackedBuffer::new(vec![0; len], width, height).unwrap()
}

fn pixels(buf: &PackedBuffer<Vec<u8>>, region: Region) -> Vec<bool> {
    let mut out = Vec::with_capacity(region.area() as usize);
    for y in region.y..region.bottom() as i16 {
        for x in region.x..region.right() as i16 {
            out.push(buf.test_pixel(Point::new(x, y)));
        }
    }
    out
}

/// Vertical stripes every 7 columns, so horizontal motion is visible.
fn striped(width: u16, height: u16) -> PackedBuffer<Vec<u8>> {
    let mut buf = buffer(width, height);
    for x in (0..width as i16).step_by(7) {
        buf.set_area(Region::new(x, 0, 1, height));
    }
    buf
}

#[test]
fn push_left_linear_hundred_pixels() {
    let region = Region::new(0, 0, 100, 4);
    let mut screen = buffer(100, 4);
    screen.set_pixel(Point::new(99, 0));
    let mut scratch = striped(100, 4);

    let mut state = AnimationState::new(
        TransitionKind::PushLeft,
        Path::Linear,
        5,
        100,
        Point::ZERO,
        Dim::new(100, 4),
    )
    .unwrap();

    for call in 1..=5u16 {
        assert!(state.advance(&mut screen, &mut scratch), "call {call}");
        assert_eq!(state.motion(), call * 20);
        // The marker pixel travels 20px left per call until it leaves.
        let marker = 99 - call as i16 * 20;
        if marker >= 0 {
            assert!(screen.test_pixel(Point::new(marker, 0)), "call {call}");
        }
        // The revealed strip is the leading part of the incoming frame.
        let shown = 20 * call;
        let revealed = Region::new(100 - shown as i16, 0, shown, 4);
        let source = Region::new(0, 0, shown, 4);
        assert_eq!(pixels(&screen, revealed), pixels(&scratch, source));
    }
    assert_eq!(pixels(&screen, region), pixels(&scratch, region));
    assert!(state.is_complete());
    assert!(!state.advance(&mut screen, &mut scratch));
}

#[test]
fn invalid_kind_reports_error_and_touches_nothing() {
    let screen = striped(16, 4);
    let before = screen.as_bytes().to_vec();
    let result = AnimationState::from_codes(255, 0, 4, 16, Point::ZERO, Dim::new(16, 4));
    assert_eq!(result, Err(AnimationError::UnknownKind(255)));
    assert_eq!(screen.as_bytes(), &before[..]);
}

#[test]
fn every_kind_reaches_its_final_frame() {
    let dim = Dim::new(40, 24);
    let region = Region::from_dim(dim);
    for kind in TransitionKind::ALL {
        for path in [Path::Linear, Path::Squared, Path::SquaredUndo] {
            let original = striped(40, 24);
            let mut screen = original.clone();
            let mut scratch = buffer(40, 24);
            scratch.set_area(Region::new(5, 5, 20, 10));
            let incoming = scratch.clone();

            let mut state = TransitionConfig::new()
                .kind(kind)
                .path(path)
                .steps(6)
                .start(Point::ZERO, dim)
                .unwrap();
            let mut calls = 0;
            while state.advance(&mut screen, &mut scratch) {
                calls += 1;
                assert!(calls <= 12, "{kind:?} did not finish");
            }

            let expected_calls = match kind {
                TransitionKind::None => 1,
                k if k.is_bounce() => 12,
                _ => 6,
            };
            assert_eq!(calls, expected_calls, "{kind:?} {path:?}");
            let expected = if kind.is_bounce() { &original } else { &incoming };
            assert_eq!(
                pixels(&screen, region),
                pixels(expected, region),
                "{kind:?} {path:?}"
            );
        }
    }
}

#[test]
fn squared_paths_front_and_back_load() {
    let dim = Dim::new(64, 8);
    let run = |path| {
        let mut screen = buffer(64, 8);
        let mut scratch = buffer(64, 8);
        let mut state = TransitionConfig::new()
            .kind(TransitionKind::SlideRight)
            .path(path)
            .steps(4)
            .start(Point::ZERO, dim)
            .unwrap();
        let mut motions = Vec::new();
        while state.advance(&mut screen, &mut scratch) {
            motions.push(state.motion());
        }
        motions
    };
    let fast_first = run(Path::Squared);
    let slow_first = run(Path::SquaredUndo);
    assert_eq!(fast_first.last(), Some(&64));
    assert_eq!(slow_first.last(), Some(&64));
    assert!(fast_first[0] > slow_first[0]);
}

#[test]
fn cancelled_transition_leaves_consistent_frame() {
    let mut screen = striped(32, 8);
    let mut scratch = buffer(32, 8);
    let mut state = TransitionConfig::new()
        .kind(TransitionKind::UndoSlideDown)
        .steps(4)
        .start(Point::ZERO, Dim::new(32, 8))
        .unwrap();
    assert!(state.advance(&mut screen, &mut scratch));
    assert!(state.advance(&mut screen, &mut scratch));
    // Half way: the old stripes moved into the bottom half and the empty
    // incoming frame is uncovered above them.
    assert_eq!(state.motion(), 4);
    assert_eq!(screen.count_ones(Region::new(0, 0, 32, 4)), 0);
    assert!(screen.count_ones(Region::new(0, 4, 32, 4)) > 0);
    assert!(!state.is_complete());
}
