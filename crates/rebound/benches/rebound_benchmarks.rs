//! Benchmarks for spring evaluation and scroll sampling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rebound::{Scroll, Spring, SpringParams};

fn pulled(params: SpringParams) -> Spring {
    let mut spring = Spring::with_params(params).unwrap();
    spring.snap(100.0, 0.0);
    spring.set_end(0.0, 0.0, 0.0);
    spring
}

fn benchmark_spring_eval(c: &mut Criterion) {
    let over = pulled(SpringParams::new(1.0, 90.0, 20.0));
    let critical = pulled(SpringParams::new(1.0, 100.0, 20.0));
    let under = pulled(SpringParams::new(1.0, 400.0, 10.0));

    c.bench_function("Spring::x overdamped", |b| {
        b.iter(|| black_box(over.x(black_box(0.25))));
    });

    c.bench_function("Spring::x critically damped", |b| {
        b.iter(|| black_box(critical.x(black_box(0.25))));
    });

    c.bench_function("Spring::x underdamped", |b| {
        b.iter(|| black_box(under.x(black_box(0.25))));
    });
}

fn benchmark_spring_retarget(c: &mut Criterion) {
    c.bench_function("Spring::set_end", |b| {
        let mut spring = pulled(SpringParams::default());
        let mut target = 0.0;
        b.iter(|| {
            target = -target + 50.0;
            spring.set_end(black_box(target), 0.0, 0.1);
        });
    });
}

fn benchmark_scroll_gesture(c: &mut Criterion) {
    c.bench_function("Scroll gesture 120 frames", |b| {
        let mut scroll = Scroll::new(1000.0);
        b.iter(|| {
            scroll.set(-900.0, -1500.0);
            for frame in 1..=120 {
                let t = f64::from(frame) / 60.0;
                black_box(scroll.x(t));
                black_box(scroll.dx(t));
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_spring_eval,
    benchmark_spring_retarget,
    benchmark_scroll_gesture
);
criterion_main!(benches);
