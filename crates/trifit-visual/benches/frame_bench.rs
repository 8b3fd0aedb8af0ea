//! Per-frame classifier cost
//!
//! Everything here runs once per rendered frame, so it has to stay far
//! below a 33 ms frame budget.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trifit_core::Side;
use trifit_test::SkeletonBuilder;
use trifit_visual::{Gesture, GestureDebouncer, GestureRecognizer, StabilityTracker};

fn bench_stability(c: &mut Criterion) {
    let good = SkeletonBuilder::well_framed().build();
    let mut tracker = StabilityTracker::default();

    c.bench_function("stability_update", |b| {
        b.iter(|| tracker.update(black_box(Some(&good))))
    });
}

fn bench_gesture(c: &mut Criterion) {
    let raised = SkeletonBuilder::well_framed().raise(Side::Left).build();
    let recognizer = GestureRecognizer::new();
    let mut debouncer = GestureDebouncer::default();

    c.bench_function("gesture_classify_debounce", |b| {
        b.iter(|| {
            let gesture = recognizer.classify(black_box(Some(&raised)));
            if debouncer.update(gesture).is_some() {
                debouncer.update(Gesture::None);
            }
        })
    });
}

criterion_group!(benches, bench_stability, bench_gesture);
criterion_main!(benches);
