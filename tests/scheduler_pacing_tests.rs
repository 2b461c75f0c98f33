use approx::assert_relative_eq;
use proptest::prelude::*;

use viewer_rs::backend::NullBackend;
use viewer_rs::core::{SourceDescriptor, SourceDimensions};
use viewer_rs::scheduler::{FRAME_INTERVAL_MS, MIN_TICK_DELAY_MS, next_frame_delay};
use viewer_rs::{Viewer, ViewerConfig};

#[test]
fn idle_tick_chain_holds_a_sixty_hertz_cadence() {
    let mut viewer =
        Viewer::new(NullBackend::default(), ViewerConfig::default(), 0.0).expect("viewer init");
    viewer.pump(1.5); // retire the initial auto-hide countdown task
    viewer.open(
        SourceDescriptor::new(SourceDimensions::new(100, 100)),
        2.0,
    );

    let mut previous = 2.0;
    for _ in 0..20 {
        let deadline = viewer.next_deadline().expect("tick armed");
        assert_relative_eq!(deadline - previous, FRAME_INTERVAL_MS, epsilon = 1e-9);
        viewer.pump(deadline);
        previous = deadline;
    }
}

#[test]
fn animating_tick_chain_runs_at_the_minimum_delay() {
    let mut viewer =
        Viewer::new(NullBackend::default(), ViewerConfig::default(), 0.0).expect("viewer init");
    viewer.pump(1.5);
    viewer.open(
        SourceDescriptor::new(SourceDimensions::new(100, 100)),
        2.0,
    );

    let first = viewer.next_deadline().expect("tick armed");
    viewer.pump(first);
    viewer
        .viewport_mut()
        .expect("open")
        .pending_animation_frames = 5;

    let mut previous = viewer.next_deadline().expect("tick armed");
    viewer.pump(previous);
    for _ in 0..4 {
        let deadline = viewer.next_deadline().expect("tick armed");
        assert_relative_eq!(deadline - previous, MIN_TICK_DELAY_MS, epsilon = 1e-9);
        viewer.pump(deadline);
        previous = deadline;
    }
}

#[test]
fn a_late_tick_does_not_accumulate_drift() {
    let mut viewer =
        Viewer::new(NullBackend::default(), ViewerConfig::default(), 0.0).expect("viewer init");
    viewer.pump(1.5);
    viewer.open(
        SourceDescriptor::new(SourceDimensions::new(100, 100)),
        2.0,
    );

    // Run the first tick 6ms past its deadline.
    let deadline = viewer.next_deadline().expect("tick armed");
    let late = deadline + 6.0;
    viewer.pump(late);

    // The chain re-anchors on the actual run time; subsequent ticks stay
    // evenly spaced instead of compounding the slip.
    let next = viewer.next_deadline().expect("tick armed");
    assert_relative_eq!(next - late, FRAME_INTERVAL_MS, epsilon = 1e-9);
}

proptest! {
    #[test]
    fn idle_delay_stays_within_frame_bounds(
        prev in 0.0f64..1.0e9,
        lateness in 0.0f64..1_000.0,
    ) {
        let delay = next_frame_delay(false, Some(prev), prev + lateness);
        prop_assert!(delay >= MIN_TICK_DELAY_MS);
        // Allow a few ULPs of slack: at large timestamps the subtraction is
        // not exact.
        prop_assert!(delay <= FRAME_INTERVAL_MS + 1e-6);
    }

    #[test]
    fn idle_delay_compensates_for_lateness_exactly(
        prev in 0.0f64..1.0e6,
        lateness in 0.0f64..15.0,
    ) {
        let delay = next_frame_delay(false, Some(prev), prev + lateness);
        let expected = (FRAME_INTERVAL_MS - lateness).max(MIN_TICK_DELAY_MS);
        prop_assert!((delay - expected).abs() < 1e-9);
    }

    #[test]
    fn animating_delay_is_always_the_floor(
        prev in 0.0f64..1.0e9,
        now_offset in 0.0f64..1_000.0,
    ) {
        let delay = next_frame_delay(true, Some(prev), prev + now_offset);
        prop_assert!((delay - MIN_TICK_DELAY_MS).abs() < f64::EPSILON);
    }
}
