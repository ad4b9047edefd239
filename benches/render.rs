//! Frame fill benchmarks.
//!
//! Run with: cargo bench

#[macro_use]
extern crate criterion;
extern crate mandelexplorer;

use criterion::Criterion;
use mandelexplorer::Mandelbrot;

fn engine() -> Mandelbrot {
    let mut m = Mandelbrot::new(320, 180);
    m.set_iteration_depth(200);
    m
}

fn single(c: &mut Criterion) {
    let m = engine();
    c.bench_function("fill_frame_single 320x180", move |b| b.iter(|| m.fill_frame_single()));
}

fn threaded(c: &mut Criterion) {
    let m = engine();
    c.bench_function("fill_frame 320x180", move |b| b.iter(|| m.fill_frame().unwrap()));
}

fn zoomed(c: &mut Criterion) {
    let mut m = engine();
    m.set_bounds(-0.7454, -0.7452, 0.1130, 0.1132).unwrap();
    m.set_iteration_depth(1000);
    c.bench_function("fill_frame seahorse valley", move |b| b.iter(|| m.fill_frame().unwrap()));
}

criterion_group!(benches, single, threaded, zoomed);
criterion_main!(benches);
